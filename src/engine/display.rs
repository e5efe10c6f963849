//! Projection of a [`TelemetryFrame`] onto the dashboard's display slots.
//!
//! Every text slot that can be empty has one entry in the policy table
//! ([`policy`]): the fallback text and which values count as absent. The
//! only slot whose fallback is not `-` is the big probability-up readout,
//! which shows `0%`.
//!
//! Slots are computed independently from their own field; one odd value can
//! only ever change its own slot.

use jiff::Timestamp;

use crate::types::TelemetryFrame;
use crate::utils::{format_local, js_number, to_fixed};

pub const PLACEHOLDER: &str = "-";

/// Engine-mode phrases for the `use_lstm` flag.
pub const MODE_AUGMENTED: &str = "LSTM + Rule-based";
pub const MODE_BASELINE: &str = "Rule-based";

// ── Policy table ───────────────────────────────────────────────────────────────

/// Text slots that fall back to a placeholder when their value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Symbol,
    Price,
    PriceBig,
    AiUpBig,
    AiDown,
    AiConf,
    AiDir,
    AiDirSmall,
    Rsi,
    RsiZone,
    RsiZoneSmall,
    MacdHist,
    Atr,
    Adx,
    Regime,
    RegimeSmall,
    PreTimestamp,
    ConfirmTimestamp,
    LoopStarted,
    OpenTrades,
}

impl Slot {
    #[cfg(test)]
    pub const ALL: [Slot; 20] = [
        Slot::Symbol,
        Slot::Price,
        Slot::PriceBig,
        Slot::AiUpBig,
        Slot::AiDown,
        Slot::AiConf,
        Slot::AiDir,
        Slot::AiDirSmall,
        Slot::Rsi,
        Slot::RsiZone,
        Slot::RsiZoneSmall,
        Slot::MacdHist,
        Slot::Atr,
        Slot::Adx,
        Slot::Regime,
        Slot::RegimeSmall,
        Slot::PreTimestamp,
        Slot::ConfirmTimestamp,
        Slot::LoopStarted,
        Slot::OpenTrades,
    ];
}

/// Which present values are still treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// Only a missing or `null` field.
    Null,
    /// Missing, `null`, zero, or the empty string.
    Falsy,
}

impl Absence {
    fn admits_number(self, value: f64) -> bool {
        match self {
            Absence::Null => true,
            Absence::Falsy => value != 0.0,
        }
    }

    fn admits_text(self, value: &str) -> bool {
        match self {
            Absence::Null => true,
            Absence::Falsy => !value.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPolicy {
    pub fallback: &'static str,
    pub absence: Absence,
}

const fn rule(fallback: &'static str, absence: Absence) -> SlotPolicy {
    SlotPolicy { fallback, absence }
}

pub fn policy(slot: Slot) -> SlotPolicy {
    use Absence::{Falsy, Null};
    match slot {
        Slot::AiUpBig => rule("0%", Falsy),
        Slot::AiDown | Slot::AiConf => rule(PLACEHOLDER, Falsy),
        Slot::Rsi | Slot::MacdHist | Slot::Atr | Slot::Adx => rule(PLACEHOLDER, Falsy),
        Slot::Price | Slot::PriceBig | Slot::OpenTrades => rule(PLACEHOLDER, Null),
        Slot::Symbol
        | Slot::AiDir
        | Slot::AiDirSmall
        | Slot::RsiZone
        | Slot::RsiZoneSmall
        | Slot::Regime
        | Slot::RegimeSmall => rule(PLACEHOLDER, Null),
        // Falsy raw timestamps (`0`, `""`) never parse, so only presence is left.
        Slot::PreTimestamp | Slot::ConfirmTimestamp | Slot::LoopStarted => rule(PLACEHOLDER, Null),
    }
}

fn numeric(slot: Slot, value: Option<f64>, render: impl FnOnce(f64) -> String) -> String {
    let p = policy(slot);
    match value {
        Some(v) if p.absence.admits_number(v) => render(v),
        _ => p.fallback.to_owned(),
    }
}

fn text(slot: Slot, value: Option<&str>) -> String {
    let p = policy(slot);
    match value {
        Some(v) if p.absence.admits_text(v) => v.to_owned(),
        _ => p.fallback.to_owned(),
    }
}

fn moment(slot: Slot, value: Option<Timestamp>) -> String {
    let p = policy(slot);
    debug_assert_eq!(p.absence, Absence::Null);
    value.map_or_else(|| p.fallback.to_owned(), format_local)
}

// ── Signal slots ───────────────────────────────────────────────────────────────

/// Visual state of a signal flag. The on/off classes come from one value, so
/// a slot can never carry both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalState {
    Active,
    #[default]
    Idle,
}

impl SignalState {
    pub fn from_flag(flag: bool) -> Self {
        if flag { SignalState::Active } else { SignalState::Idle }
    }

    pub fn is_active(self) -> bool {
        self == SignalState::Active
    }

    pub fn text(self) -> &'static str {
        match self {
            SignalState::Active => "ACTIVE",
            SignalState::Idle => "IDLE",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            SignalState::Active => "signal-on",
            SignalState::Idle => "signal-off",
        }
    }
}

// ── View model ─────────────────────────────────────────────────────────────────

/// Every display slot on the dashboard, built once at startup and replaced
/// in full on each telemetry frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub symbol: String,
    pub price: String,
    pub price_big: String,
    pub ai_up_big: String,
    pub ai_down: String,
    pub ai_conf: String,
    pub ai_dir: String,
    pub ai_dir_small: String,
    pub rsi: String,
    pub rsi_zone: String,
    pub rsi_zone_small: String,
    pub macd_hist: String,
    pub atr: String,
    pub adx: String,
    pub regime: String,
    pub regime_small: String,
    pub use_lstm: &'static str,
    pub pre_signal: SignalState,
    pub confirm_signal: SignalState,
    pub pre_ts: String,
    pub confirm_ts: String,
    pub loop_started: String,
    pub open_trades: String,
    pub raw_json: String,
}

impl DashboardView {
    pub fn project(frame: &TelemetryFrame) -> Self {
        Self {
            symbol: text(Slot::Symbol, frame.symbol.as_deref()),
            price: numeric(Slot::Price, frame.price, |v| to_fixed(v, 2)),
            price_big: numeric(Slot::PriceBig, frame.price, |v| to_fixed(v, 2)),
            ai_up_big: numeric(Slot::AiUpBig, frame.ai_prob_up, |v| {
                format!("{}%", to_fixed(v * 100.0, 1))
            }),
            ai_down: numeric(Slot::AiDown, frame.ai_prob_down, |v| {
                format!("{}%", to_fixed(v * 100.0, 2))
            }),
            ai_conf: numeric(Slot::AiConf, frame.ai_confidence, |v| to_fixed(v, 2)),
            ai_dir: text(Slot::AiDir, frame.ai_direction.as_deref()),
            ai_dir_small: text(Slot::AiDirSmall, frame.ai_direction.as_deref()),
            rsi: numeric(Slot::Rsi, frame.rsi, |v| to_fixed(v, 2)),
            rsi_zone: text(Slot::RsiZone, frame.rsi_zone.as_deref()),
            rsi_zone_small: text(Slot::RsiZoneSmall, frame.rsi_zone.as_deref()),
            macd_hist: numeric(Slot::MacdHist, frame.macd_hist, |v| to_fixed(v, 4)),
            atr: numeric(Slot::Atr, frame.atr, |v| to_fixed(v, 3)),
            adx: numeric(Slot::Adx, frame.adx, |v| to_fixed(v, 2)),
            regime: text(Slot::Regime, frame.regime.as_deref()),
            regime_small: text(Slot::RegimeSmall, frame.regime.as_deref()),
            use_lstm: if frame.use_lstm { MODE_AUGMENTED } else { MODE_BASELINE },
            pre_signal: SignalState::from_flag(frame.pre_signal),
            confirm_signal: SignalState::from_flag(frame.confirm_signal),
            pre_ts: moment(Slot::PreTimestamp, frame.pre_timestamp),
            confirm_ts: moment(Slot::ConfirmTimestamp, frame.confirm_timestamp),
            loop_started: moment(Slot::LoopStarted, frame.loop_started),
            open_trades: numeric(Slot::OpenTrades, frame.open_trades, js_number),
            raw_json: pretty(frame),
        }
    }

    /// Replace every slot with the projection of `frame`. Nothing from the
    /// previous frame survives.
    pub fn apply(&mut self, frame: &TelemetryFrame) {
        *self = Self::project(frame);
    }

    /// Current text of a fallback-capable slot.
    #[cfg(test)]
    pub fn slot(&self, slot: Slot) -> &str {
        match slot {
            Slot::Symbol => &self.symbol,
            Slot::Price => &self.price,
            Slot::PriceBig => &self.price_big,
            Slot::AiUpBig => &self.ai_up_big,
            Slot::AiDown => &self.ai_down,
            Slot::AiConf => &self.ai_conf,
            Slot::AiDir => &self.ai_dir,
            Slot::AiDirSmall => &self.ai_dir_small,
            Slot::Rsi => &self.rsi,
            Slot::RsiZone => &self.rsi_zone,
            Slot::RsiZoneSmall => &self.rsi_zone_small,
            Slot::MacdHist => &self.macd_hist,
            Slot::Atr => &self.atr,
            Slot::Adx => &self.adx,
            Slot::Regime => &self.regime,
            Slot::RegimeSmall => &self.regime_small,
            Slot::PreTimestamp => &self.pre_ts,
            Slot::ConfirmTimestamp => &self.confirm_ts,
            Slot::LoopStarted => &self.loop_started,
            Slot::OpenTrades => &self.open_trades,
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::project(&TelemetryFrame::default())
    }
}

/// Two-space pretty print of the received payload, keys in received order.
fn pretty(frame: &TelemetryFrame) -> String {
    serde_json::to_string_pretty(&frame.raw).unwrap_or_else(|_| frame.raw.to_string())
}
