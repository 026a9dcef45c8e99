//! Estimated-time hint parsing.
//!
//! Catalog authors write hints such as `"45 min"`, `"1h 30m"`, `"2-3 weeks"`.
//! They are parsed into a [`Duration`] so pathway totals can be summed in a
//! common unit. A range counts as its upper bound; a day is 24 hours and a week
//! is seven days.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// One `<amount>[-<amount>] <unit>` token.
static HINT_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)(?:\s*(?:-|–|to)\s*(\d+(?:\.\d+)?))?\s*([a-z]+)").unwrap()
});

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;

fn unit_seconds(unit: &str) -> Option<f64> {
    match unit {
        "m" | "min" | "mins" | "minute" | "minutes" => Some(MINUTE),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(HOUR),
        "d" | "day" | "days" => Some(DAY),
        "w" | "wk" | "wks" | "week" | "weeks" => Some(WEEK),
        _ => None,
    }
}

/// Parse an estimated-time hint.
///
/// Returns `None` for empty or malformed hints; callers decide whether that is
/// worth a warning.
#[must_use]
pub fn parse_time_hint(hint: &str) -> Option<Duration> {
    let lower = hint.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    let mut total = 0.0_f64;
    let mut cursor = 0;
    let mut matched = false;

    for caps in HINT_TOKEN_REGEX.captures_iter(&lower) {
        let whole = caps.get(0)?;
        if !is_separator(&lower[cursor..whole.start()]) {
            return None;
        }
        cursor = whole.end();

        let low: f64 = caps.get(1)?.as_str().parse().ok()?;
        let amount = match caps.get(2) {
            Some(high) => {
                let high: f64 = high.as_str().parse().ok()?;
                if high < low {
                    return None;
                }
                high
            }
            None => low,
        };
        total += amount * unit_seconds(caps.get(3)?.as_str())?;
        matched = true;
    }

    if !matched || !is_separator(&lower[cursor..]) {
        return None;
    }

    Duration::try_from_secs_f64(total).ok()
}

fn is_separator(text: &str) -> bool {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .all(|word| word.is_empty() || word == "and" || word == "+")
}

/// Render a duration the way hints are written, e.g. `"1w 2d 3h 15m"`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let mut minutes = duration.as_secs() / 60;
    if minutes == 0 {
        return "0m".to_string();
    }

    let mut parts = Vec::new();
    for (suffix, size) in [("w", 7 * 24 * 60), ("d", 24 * 60), ("h", 60), ("m", 1)] {
        let count = minutes / size;
        if count > 0 {
            parts.push(format!("{count}{suffix}"));
            minutes %= size;
        }
    }
    parts.join(" ")
}
