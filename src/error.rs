//! Application-level error types.

use thiserror::Error;

/// Errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// A backend action answered with a non-success status. The payload is the
    /// backend's `error` field, or the HTTP reason phrase when it sent none.
    #[error("{0}")]
    Request(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UI error: {0}")]
    Ui(#[from] eframe::Error),

    #[error("Channel send error: receiver dropped")]
    ChannelClosed,
}

/// Convenience alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
