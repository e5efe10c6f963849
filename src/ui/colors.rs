//! Static colours for connection, signal, and action visualisation.

use eframe::egui::Color32;

use crate::engine::display::SignalState;
use crate::engine::status::{CommandStatus, ConnectionStatus};

pub const DOT_ONLINE: Color32 = Color32::from_rgb(34, 197, 94);
pub const DOT_OFFLINE: Color32 = Color32::from_rgb(239, 68, 68);

pub const SIGNAL_ON: Color32 = Color32::from_rgb(250, 204, 21);
pub const SIGNAL_OFF: Color32 = Color32::from_rgb(115, 115, 115);

pub const BUY: Color32 = Color32::from_rgb(22, 163, 74);
pub const SELL: Color32 = Color32::from_rgb(220, 38, 38);
pub const AUTO: Color32 = Color32::from_rgb(37, 99, 235);
pub const TRAIN: Color32 = Color32::from_rgb(147, 51, 234);

pub const STATUS_ERROR: Color32 = Color32::from_rgb(248, 113, 113);
pub const STATUS_OK: Color32 = Color32::from_rgb(134, 239, 172);
pub const STATUS_PENDING: Color32 = Color32::from_rgb(203, 213, 225);

pub fn connection(status: ConnectionStatus) -> Color32 {
    if status.is_online() { DOT_ONLINE } else { DOT_OFFLINE }
}

pub fn signal(state: SignalState) -> Color32 {
    if state.is_active() { SIGNAL_ON } else { SIGNAL_OFF }
}

pub fn command(status: &CommandStatus) -> Color32 {
    match status {
        CommandStatus::Error(_) => STATUS_ERROR,
        CommandStatus::Success(_) => STATUS_OK,
        CommandStatus::Idle | CommandStatus::InFlight(_) => STATUS_PENDING,
    }
}
