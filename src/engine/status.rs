//! Connection and command status state machines.

use std::fmt;

// ── Connection ─────────────────────────────────────────────────────────────────

/// Stream connection state, driven only by stream lifecycle events. A close
/// and a transport error both land on `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    pub fn is_online(self) -> bool {
        self == ConnectionStatus::Connected
    }

    /// Text shown next to the status dot.
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }

    /// Style class of the status dot; exactly one of the two is ever applied.
    pub fn marker_class(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "dot-online",
            ConnectionStatus::Disconnected => "dot-offline",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Commands ───────────────────────────────────────────────────────────────────

/// Which status line a command writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTarget {
    Trade,
    Train,
}

/// Lifecycle of one status line: `Idle → InFlight → {Success, Error}`.
///
/// Each variant carries the text to display. Every new invocation restarts at
/// `InFlight`, and completions are applied in arrival order, so overlapping
/// invocations resolve last-write-wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandStatus {
    #[default]
    Idle,
    InFlight(String),
    Success(String),
    Error(String),
}

impl CommandStatus {
    pub fn text(&self) -> &str {
        match self {
            CommandStatus::Idle => "",
            CommandStatus::InFlight(t) | CommandStatus::Success(t) | CommandStatus::Error(t) => {
                t.as_str()
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, CommandStatus::InFlight(_))
    }
}

/// The two command status lines shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBoard {
    pub trade: CommandStatus,
    pub train: CommandStatus,
}

impl StatusBoard {
    /// Overwrite one line with a new state.
    pub fn apply(&mut self, target: StatusTarget, status: CommandStatus) {
        match target {
            StatusTarget::Trade => self.trade = status,
            StatusTarget::Train => self.train = status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_label_and_marker_agree() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
        assert_eq!(ConnectionStatus::Connected.label(), "Connected");
        assert_eq!(ConnectionStatus::Connected.marker_class(), "dot-online");
        assert_eq!(ConnectionStatus::Disconnected.label(), "Disconnected");
        assert_eq!(ConnectionStatus::Disconnected.marker_class(), "dot-offline");
    }

    #[test]
    fn lines_are_independent() {
        let mut board = StatusBoard::default();
        board.apply(StatusTarget::Trade, CommandStatus::InFlight("Sending BUY...".into()));
        assert!(board.trade.is_in_flight());
        assert_eq!(board.train, CommandStatus::Idle);
        assert_eq!(board.train.text(), "");
    }

    #[test]
    fn overlapping_invocations_are_last_write_wins() {
        let mut board = StatusBoard::default();
        board.apply(StatusTarget::Trade, CommandStatus::InFlight("Sending BUY...".into()));
        board.apply(StatusTarget::Trade, CommandStatus::InFlight("Sending SELL...".into()));
        board.apply(StatusTarget::Trade, CommandStatus::Error("Error: margin".into()));
        // The earlier BUY resolves after the SELL failure and overwrites it.
        board.apply(StatusTarget::Trade, CommandStatus::Success("OK: BUY 1 (10009)".into()));
        assert_eq!(board.trade.text(), "OK: BUY 1 (10009)");
    }
}
