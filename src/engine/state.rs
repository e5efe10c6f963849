//! The dashboard state owned by the UI thread.

use crate::engine::display::DashboardView;
use crate::engine::status::{ConnectionStatus, StatusBoard};
use crate::network::AppMessage;

/// Everything the dashboard displays. Only the UI thread mutates it, one
/// [`AppMessage`] at a time, in the order the background tasks sent them.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub view: DashboardView,
    pub connection: ConnectionStatus,
    pub statuses: StatusBoard,
    /// Number of telemetry frames applied since startup.
    pub frames_seen: u64,
}

impl DashboardState {
    pub fn apply(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Connection(status) => {
                if status != self.connection {
                    log::info!("Stream {}", status.label().to_lowercase());
                }
                self.connection = status;
            }
            AppMessage::Telemetry(frame) => {
                self.view.apply(&frame);
                self.frames_seen += 1;
            }
            AppMessage::Command(target, status) => self.statuses.apply(target, status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::display::SignalState;
    use crate::engine::status::{CommandStatus, StatusTarget};
    use crate::types::TelemetryFrame;

    fn telemetry(payload: &str) -> AppMessage {
        AppMessage::Telemetry(Box::new(TelemetryFrame::parse(payload)))
    }

    #[test]
    fn open_then_close_or_error_flips_status() {
        let mut state = DashboardState::default();
        assert_eq!(state.connection, ConnectionStatus::Disconnected);

        state.apply(AppMessage::Connection(ConnectionStatus::Connected));
        assert_eq!(state.connection.label(), "Connected");

        state.apply(AppMessage::Connection(ConnectionStatus::Disconnected));
        assert_eq!(state.connection.label(), "Disconnected");
    }

    #[test]
    fn frames_apply_in_order_and_last_one_wins() {
        let mut state = DashboardState::default();
        state.apply(telemetry(r#"{"price":1.0,"pre_signal":true}"#));
        state.apply(telemetry(r#"{"price":2.0}"#));
        assert_eq!(state.view.price, "2.00");
        assert_eq!(state.view.pre_signal, SignalState::Idle);
        assert_eq!(state.frames_seen, 2);
    }

    #[test]
    fn commands_do_not_touch_stream_state() {
        let mut state = DashboardState::default();
        state.apply(AppMessage::Connection(ConnectionStatus::Connected));
        state.apply(telemetry(r#"{"symbol":"XAUUSD"}"#));
        let before = state.view.clone();

        state.apply(AppMessage::Command(
            StatusTarget::Trade,
            CommandStatus::Error("Error: margin".into()),
        ));
        assert_eq!(state.view, before);
        assert!(state.connection.is_online());
        assert_eq!(state.statuses.trade.text(), "Error: margin");
    }
}
