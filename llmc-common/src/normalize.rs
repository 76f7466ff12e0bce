//! Source normalization
//!
//! Converts loosely-typed raw values from the registry, pricing and
//! benchmark sources into the canonical scalar types. Every function here
//! is total: unparseable input resolves to a safe default (absent, a
//! pass-through string, `false` or `0`) and never surfaces as an error.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::languages;

/// Parse a parameter count into billions
///
/// `"7B"` → 7.0, `"1.8T"` → 1800.0, `13` → 13.0. Empty, null or
/// unparseable values are absent.
pub fn parse_parameters(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            let parsed = if s.contains('T') {
                s.replace('T', "").trim().parse::<f64>().map(|v| v * 1000.0)
            } else {
                s.replace('B', "").trim().parse::<f64>()
            };
            match parsed {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(value = %s, "Unparseable parameter count, treating as absent");
                    None
                }
            }
        }
        _ => None,
    }
}

/// Parse a price string such as `"$0.15"` into a float
pub fn clean_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            let digits = s.strip_prefix('$').unwrap_or(s).trim();
            match digits.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(value = %s, "Unparseable price, treating as absent");
                    None
                }
            }
        }
        _ => None,
    }
}

/// Resolve one language code or name to its display name
///
/// Unresolvable entries pass through trimmed and lowercased.
fn language_name(raw: &str) -> String {
    let cleaned = raw.trim().to_lowercase();
    languages::name_for_code(&cleaned)
        .or_else(|| languages::name_for_name(&cleaned))
        .map(str::to_string)
        .unwrap_or(cleaned)
}

/// Expand a list or comma-separated string of languages into display names
///
/// Returns the names joined with `", "`. A missing value stays absent.
pub fn map_languages(value: &Value) -> Option<String> {
    let entries: Vec<String> = match value {
        Value::Null => return None,
        Value::String(s) => s.split(',').map(language_name).collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => language_name(s),
                other => language_name(&other.to_string()),
            })
            .collect(),
        other => return Some(other.to_string()),
    };
    Some(entries.join(", "))
}

/// Strip the temperature annotation from a benchmark model name
///
/// `"llama-3-8b-t0.0--llama-3-8b-t0.0"` → `"llama-3-8b"`. The annotation is
/// `-t<0|1>.<digit>--`; everything from its first occurrence is dropped.
pub fn clean_model_name(name: &str) -> String {
    let bytes = name.as_bytes();
    let cut = (0..bytes.len()).find(|&i| {
        let window = &bytes[i..];
        window.len() >= 7
            && window[0] == b'-'
            && window[1] == b't'
            && matches!(window[2], b'0' | b'1')
            && window[3] == b'.'
            && window[4].is_ascii_digit()
            && window[5] == b'-'
            && window[6] == b'-'
    });
    match cut {
        Some(i) => name[..i].to_string(),
        None => name.to_string(),
    }
}

/// Read `model_config.multimodality.<field>` from a registry entry
///
/// Missing keys or non-boolean values give `false`.
pub fn modality_flag(model_config: &Value, field: &str) -> bool {
    model_config
        .get("multimodality")
        .and_then(|m| m.get(field))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Normalize a context size to thousands of tokens
///
/// `"128k"` → 128, `32` → 32, `"32.0"` → 32; anything else → 0.
pub fn parse_context_size(value: &Value) -> i64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace('k', "").trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => v as i64,
        _ => 0,
    }
}

/// Parse a registry release date
///
/// Accepts `YYYY-MM-DD` (optional time suffix), `YYYY-MM` and `YYYY`; the
/// short forms resolve to the first day of the month or year.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    let parsed = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok())
        .or_else(|| {
            let year = raw.parse::<i32>().ok().filter(|_| raw.len() == 4)?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        });
    if parsed.is_none() && !raw.is_empty() {
        warn!(value = %raw, "Unparseable release date, treating as absent");
    }
    parsed
}
