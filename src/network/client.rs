//! Background WebSocket listener for the telemetry stream.

use crate::engine::status::ConnectionStatus;
use crate::error::{AppError, Result};
use crate::network::{AppMessage, Repaint, UiSender};
use crate::types::TelemetryFrame;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as WsMessage};

/// Long-running async task: holds the single stream connection and forwards
/// every frame to the UI thread in delivery order.
///
/// There is no reconnect. When the connection fails, closes, or errors the UI
/// is told `Disconnected` and the task ends. It also ends quietly when the UI
/// has gone away.
pub async fn run_stream_listener<R: Repaint>(url: String, ui: UiSender<R>) {
    match listen(&url, &ui).await {
        Ok(()) => {}
        Err(AppError::ChannelClosed) => {
            log::info!("UI closed, stopping stream listener.");
            return;
        }
        Err(e) => log::warn!("WS error: {e}"),
    }
    if ui.connection(ConnectionStatus::Disconnected).is_err() {
        log::debug!("UI closed before the disconnect could be shown.");
    }
}

async fn listen<R: Repaint>(url: &str, ui: &UiSender<R>) -> Result<()> {
    let (mut ws_stream, response) = connect_async(url).await?;
    log::info!("WS connected to {url} ({})", response.status());
    ui.connection(ConnectionStatus::Connected)?;

    while let Some(result) = ws_stream.next().await {
        match result? {
            WsMessage::Text(text) => forward(ui, TelemetryFrame::parse(text.as_str()))?,
            WsMessage::Binary(bytes) => {
                let frame = match std::str::from_utf8(&bytes) {
                    Ok(text) => TelemetryFrame::parse(text),
                    Err(e) => {
                        log::debug!("Binary frame is not UTF-8 ({e}), treating as empty");
                        TelemetryFrame::default()
                    }
                };
                forward(ui, frame)?;
            }
            WsMessage::Ping(payload) => ws_stream.send(WsMessage::Pong(payload)).await?,
            WsMessage::Close(_) => {
                log::info!("WS closed by server.");
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

fn forward<R: Repaint>(ui: &UiSender<R>, frame: TelemetryFrame) -> Result<()> {
    ui.send(AppMessage::Telemetry(Box::new(frame)))
}
