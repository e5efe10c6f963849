//! Shared data-model types for the telemetry stream and the command REST API.
//!
//! # Deserialization strategy
//!
//! Telemetry payloads are pushed by the backend with every field optional and
//! loosely typed. Deriving `Deserialize` on a struct would reject the whole
//! message when a single field has an unexpected type, so a frame is parsed to
//! a generic [`serde_json::Value`] first and each field is then extracted on
//! its own. A field of the wrong type is simply absent; its neighbours are
//! unaffected.
//!
//! Command responses are handled the same way: the backend may return `null`,
//! non-JSON, or partial bodies, and the summaries degrade to placeholders.

use jiff::Timestamp;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::utils::{js_display, parse_timestamp, truthy};

// ── WebSocket: Telemetry Frame ─────────────────────────────────────────────────

/// One backend push, decoded field by field.
///
/// A frame only lives for a single render pass; the next frame replaces it
/// wholesale. Values are stored faithfully (a zero stays `Some(0.0)`); the
/// display layer decides which values count as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryFrame {
    /// The payload exactly as parsed, for the diagnostic region.
    pub raw: Value,
    pub symbol: Option<String>,
    pub price: Option<f64>,
    pub ai_prob_up: Option<f64>,
    pub ai_prob_down: Option<f64>,
    pub ai_confidence: Option<f64>,
    pub ai_direction: Option<String>,
    pub rsi: Option<f64>,
    pub rsi_zone: Option<String>,
    pub macd_hist: Option<f64>,
    pub atr: Option<f64>,
    pub adx: Option<f64>,
    pub regime: Option<String>,
    /// Whether the LSTM model augments the rule-based engine.
    pub use_lstm: bool,
    pub pre_signal: bool,
    pub confirm_signal: bool,
    pub pre_timestamp: Option<Timestamp>,
    pub confirm_timestamp: Option<Timestamp>,
    pub loop_started: Option<Timestamp>,
    pub open_trades: Option<f64>,
}

impl TelemetryFrame {
    /// Parse a raw stream payload. Never fails: an empty or malformed payload
    /// decodes as the empty object `{}`.
    pub fn parse(payload: &str) -> Self {
        let payload = if payload.is_empty() { "{}" } else { payload };
        let raw = match serde_json::from_str::<Value>(payload) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Malformed telemetry payload ({e}), treating as empty");
                Value::Object(Map::new())
            }
        };
        Self::from_value(raw)
    }

    /// Decode an already-parsed value. Non-object values keep their raw form
    /// but every field reads as absent.
    pub fn from_value(raw: Value) -> Self {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);

        Self {
            symbol: label(obj, "symbol"),
            price: number(obj, "price"),
            ai_prob_up: number(obj, "ai_prob_up"),
            ai_prob_down: number(obj, "ai_prob_down"),
            ai_confidence: number(obj, "ai_confidence"),
            ai_direction: label(obj, "ai_direction"),
            rsi: number(obj, "rsi"),
            rsi_zone: label(obj, "rsi_zone"),
            macd_hist: number(obj, "macd_hist"),
            atr: number(obj, "atr"),
            adx: number(obj, "adx"),
            regime: label(obj, "regime"),
            use_lstm: flag(obj, "use_lstm"),
            pre_signal: flag(obj, "pre_signal"),
            confirm_signal: flag(obj, "confirm_signal"),
            pre_timestamp: obj.get("pre_timestamp").and_then(parse_timestamp),
            confirm_timestamp: obj.get("confirm_timestamp").and_then(parse_timestamp),
            loop_started: obj.get("loop_started").and_then(parse_timestamp),
            open_trades: number(obj, "open_trades"),
            raw,
        }
    }
}

impl Default for TelemetryFrame {
    fn default() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

/// Labels are shown verbatim. Numbers and booleans are accepted in their text
/// form; `null` and structured values are absent.
fn label(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Array(_) | Value::Object(_) => None,
        other => js_display(other),
    }
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).is_some_and(truthy)
}

// ── REST: Order ────────────────────────────────────────────────────────────────

/// Side of a dashboard order. `Auto` lets the backend pick from the latest AI
/// probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
    Auto,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
            OrderSide::Auto => "AUTO",
        })
    }
}

/// Body of `POST /api/order`.
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub side: OrderSide,
}

/// What the order endpoint echoed back, rendered for the status line.
///
/// The executed side may differ from the requested one (`AUTO` resolves to
/// `BUY` or `SELL` on the backend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub side: Option<String>,
    pub volume: Option<String>,
    pub retcode: Option<String>,
}

impl OrderReceipt {
    /// Extract the receipt from a response body, tolerating `None` and
    /// missing sub-fields.
    pub fn from_body(body: Option<&Value>) -> Self {
        let field = |key: &str| body.and_then(|b| b.get(key)).and_then(js_display);
        Self {
            side: field("side"),
            volume: field("volume"),
            retcode: body
                .and_then(|b| b.get("result"))
                .and_then(|r| r.get("retcode"))
                .and_then(js_display),
        }
    }
}

impl fmt::Display for OrderReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side.as_deref().unwrap_or("-");
        let volume = self.volume.as_deref().unwrap_or("-");
        let retcode = self.retcode.as_deref().unwrap_or("-");
        write!(f, "OK: {side} {volume} ({retcode})")
    }
}

// ── REST: Retrain ──────────────────────────────────────────────────────────────

/// Body of `POST /api/train_ai` (serializes to `{}`).
#[derive(Debug, Serialize)]
pub struct RetrainRequest {}

/// Status phrase used when the retrain endpoint supplies no message.
pub const RETRAIN_DEFAULT_MESSAGE: &str = "Training started";

/// Acknowledgement returned by the retrain endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrainAck {
    pub message: Option<String>,
}

impl RetrainAck {
    pub fn from_body(body: Option<&Value>) -> Self {
        let message = body
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_owned);
        Self { message }
    }
}

impl fmt::Display for RetrainAck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or(RETRAIN_DEFAULT_MESSAGE))
    }
}
