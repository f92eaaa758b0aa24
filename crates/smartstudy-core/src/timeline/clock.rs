//! Countdown and label helpers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Whole days and remaining whole hours until a target time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
}

/// Time left until `target`, floored to whole days and hours.
///
/// Both fields are clamped to zero, so a past target reports `0d 0h`.
pub fn countdown(target: DateTime<Utc>, now: DateTime<Utc>) -> Countdown {
    let diff = target.signed_duration_since(now).num_seconds();
    let days = diff.div_euclid(SECS_PER_DAY).max(0);
    let hours = (diff - days * SECS_PER_DAY).div_euclid(SECS_PER_HOUR).max(0);
    Countdown {
        days: days as u64,
        hours: hours as u64,
    }
}

/// Whole days until `target`, clamped to zero.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    countdown(target, now).days
}

/// 12-hour clock label for a minute-of-day, e.g. `490` -> `"08:10 AM"`.
///
/// Values past midnight wrap around.
pub fn minutes_to_label(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let hours = minutes / 60;
    let mins = minutes % 60;
    let display = match hours % 12 {
        0 => 12,
        h => h,
    };
    let suffix = if hours >= 12 { "PM" } else { "AM" };
    format!("{display:02}:{mins:02} {suffix}")
}

/// `Today`, `Tomorrow`, then `+Nd`.
pub fn format_day_label(day_offset: u32) -> String {
    match day_offset {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("+{n}d"),
    }
}
