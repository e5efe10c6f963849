//! Value coercion and formatting helpers shared by the display projection and
//! the command layer.
//!
//! The backend payloads are loosely typed JSON, and the dashboard mirrors the
//! rendering rules of a browser client: JavaScript truthiness for flags,
//! `Number.prototype.toFixed` for fixed-digit numbers and plain `Number`
//! display for echoed values. The helpers below reproduce those rules.

use jiff::{Timestamp, civil, tz::TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

/// Extra fractional digits printed when looking for an exact rounding tie.
/// Any double that is not an exact tie deviates from one within this window.
const TIE_WINDOW_DIGITS: usize = 25;

/// `Number` display uses exponent form outside `[EXPONENT_BELOW, EXPONENT_ABOVE)`.
const EXPONENT_ABOVE: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

/// Layout used for every rendered date-time.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Truthiness ─────────────────────────────────────────────────────────────────

/// JavaScript truthiness of a JSON value: `null`, `false`, `0` and `""` are
/// false, everything else (including empty arrays/objects) is true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ── Number formatting ──────────────────────────────────────────────────────────

/// Format `value` with exactly `digits` fractional digits, rounding the way
/// `Number.prototype.toFixed` does.
///
/// Rust's `{:.N}` rounds exact binary ties to even (`0.125` → `"0.12"`), while
/// `toFixed` rounds them away from zero (`"0.13"`). Ties are detected on the
/// exact decimal expansion and re-rounded with `rust_decimal`. Magnitudes of
/// `1e21` and above print in exponent form, as `toFixed` does.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= EXPONENT_ABOVE {
        return js_number(value);
    }
    // -0.0 prints without its sign.
    let value = if value == 0.0 { 0.0 } else { value };

    let expansion = format!("{:.*}", digits + TIE_WINDOW_DIGITS, value.abs());
    let tail = &expansion[expansion.len() - TIE_WINDOW_DIGITS..];
    if tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0') {
        let exact = &expansion[..expansion.len() - TIE_WINDOW_DIGITS + 1];
        if let Ok(exact) = exact.parse::<Decimal>() {
            let rounded =
                exact.round_dp_with_strategy(digits as u32, RoundingStrategy::MidpointAwayFromZero);
            let sign = if value < 0.0 { "-" } else { "" };
            return format!("{sign}{rounded:.digits$}");
        }
    }

    format!("{value:.digits$}")
}

/// Display a number the way JavaScript string interpolation does
/// (`1.0` → `"1"`, `0.1` → `"0.1"`, `1e21` → `"1e+21"`, `1e-7` → `"1e-7"`).
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if value == 0.0 {
        "0".to_owned()
    } else if value.abs() >= EXPONENT_ABOVE || value.abs() < EXPONENT_BELOW {
        let sci = format!("{value:e}");
        match sci.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => sci,
        }
    } else {
        value.to_string()
    }
}

/// Display an echoed JSON scalar. `null` yields `None` so callers can apply a
/// placeholder; integers keep their exact digits.
pub fn js_display(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => js_number(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

// ── Timestamps ─────────────────────────────────────────────────────────────────

/// Interpret a JSON value as a point in time.
///
/// * numbers are Unix epoch milliseconds;
/// * strings are RFC 3339 / ISO 8601 with an offset, falling back to a civil
///   date-time or date in the local time zone.
///
/// Falsy values (`0`, `""`) and anything unparseable yield `None`.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    if !truthy(value) {
        return None;
    }
    match value {
        Value::Number(n) => {
            let millis = n.as_f64()?;
            Timestamp::from_millisecond(millis.trunc() as i64).ok()
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<Timestamp>()
                .ok()
                .or_else(|| parse_civil(s, TimeZone::system()))
        }
        _ => None,
    }
}

fn parse_civil(s: &str, tz: TimeZone) -> Option<Timestamp> {
    if let Ok(dt) = s.parse::<civil::DateTime>() {
        return dt.to_zoned(tz).ok().map(|z| z.timestamp());
    }
    let date = s.parse::<civil::Date>().ok()?;
    date.to_zoned(tz).ok().map(|z| z.timestamp())
}

/// Render a timestamp in the local time zone.
pub fn format_local(ts: Timestamp) -> String {
    format_in(ts, TimeZone::system())
}

/// Render a timestamp in the given time zone.
pub fn format_in(ts: Timestamp, tz: TimeZone) -> String {
    ts.to_zoned(tz).strftime(DATETIME_FORMAT).to_string()
}
