//! Pattern-based extraction of single tags
//!
//! `BinaryState` and `InsightParams` are scraped from the reply with a
//! regular expression rather than decoded as XML. Firmware replies are not
//! always well-formed documents, and these two values only need the content
//! of one known tag.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ApiError, Result};
use crate::model::{BinaryState, InsightParams};

static BINARY_STATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<BinaryState>(\d+)</BinaryState>").expect("valid pattern"));

static INSIGHT_PARAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<InsightParams>(.+)</InsightParams>").expect("valid pattern"));

/// Number of `|`-separated fields in an InsightParams value
pub const INSIGHT_FIELD_COUNT: usize = 11;

/// Extract the integer content of the `BinaryState` tag
pub fn binary_state(body: &str) -> Result<BinaryState> {
    let raw = capture(&BINARY_STATE, body, "BinaryState")?;
    raw.parse::<i32>()
        .map(BinaryState::new)
        .map_err(|e| ApiError::Format(format!("BinaryState {:?} is not an integer: {}", raw, e)))
}

/// Extract and split the `InsightParams` telemetry string
///
/// The value is eleven `|`-separated fields, e.g.
/// `8|1471416661|8|3244|3182|15377|19|7300|1011115|1011115.000000|8000`.
/// Field 4 feeds both `on_today` and `on_total`.
pub fn insight_params(body: &str) -> Result<InsightParams> {
    let raw = capture(&INSIGHT_PARAMS, body, "InsightParams")?;

    let fields: Vec<&str> = raw.split('|').collect();
    if fields.len() != INSIGHT_FIELD_COUNT {
        return Err(ApiError::Format(format!(
            "InsightParams has {} fields, expected {}: {:?}",
            fields.len(),
            INSIGHT_FIELD_COUNT,
            raw
        )));
    }

    Ok(InsightParams {
        on_for: field(&fields, 2, "OnFor")?,
        on_today: field(&fields, 4, "OnToday")?,
        on_total: field(&fields, 4, "OnTotal")?,
        wifi_strength: field(&fields, 6, "WifiStrength")?,
        current_power: field(&fields, 7, "CurrentPower")?,
        today_power: field(&fields, 8, "TodayPower")?,
        total_power: field(&fields, 9, "TotalPower")?,
        power_threshold: field(&fields, 10, "PowerThreshold")?,
    })
}

fn capture<'a>(pattern: &Regex, body: &'a str, tag: &str) -> Result<&'a str> {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ApiError::Format(format!("no {} tag in response", tag)))
}

fn field<T: FromStr>(fields: &[&str], index: usize, name: &'static str) -> Result<T> {
    let value = fields[index];
    value.parse().map_err(|_| ApiError::InvalidField {
        field: name,
        value: value.to_string(),
    })
}
