//! Network layer: inter-thread message types shared by the stream listener and
//! the command dispatcher.

pub mod client;
pub mod commands;

use std::sync::mpsc::Sender as StdSender;

use crate::engine::status::{CommandStatus, ConnectionStatus, StatusTarget};
use crate::error::{AppError, Result};
use crate::types::TelemetryFrame;

/// Messages sent from background tasks to the UI thread.
#[derive(Debug)]
pub enum AppMessage {
    Connection(ConnectionStatus),
    Telemetry(Box<TelemetryFrame>),
    Command(StatusTarget, CommandStatus),
}

/// Wakes the UI after a message was queued.
pub trait Repaint: Clone + Send + Sync + 'static {
    fn request_repaint(&self);
}

impl Repaint for egui::Context {
    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Headless repaint hook for tests.
#[cfg(test)]
impl Repaint for () {
    fn request_repaint(&self) {}
}

/// Sending half of the UI channel, paired with the repaint hook.
#[derive(Clone)]
pub struct UiSender<R: Repaint> {
    tx: StdSender<AppMessage>,
    repaint: R,
}

impl<R: Repaint> UiSender<R> {
    pub fn new(tx: StdSender<AppMessage>, repaint: R) -> Self {
        Self { tx, repaint }
    }

    pub fn send(&self, msg: AppMessage) -> Result<()> {
        self.tx.send(msg).map_err(|_| AppError::ChannelClosed)?;
        self.repaint.request_repaint();
        Ok(())
    }

    pub fn connection(&self, status: ConnectionStatus) -> Result<()> {
        self.send(AppMessage::Connection(status))
    }

    pub fn command(&self, target: StatusTarget, status: CommandStatus) -> Result<()> {
        self.send(AppMessage::Command(target, status))
    }
}
