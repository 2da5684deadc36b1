//! Daily focus schedule and window-membership evaluation.
//!
//! Times are stored as zero-padded 24-hour `"HH:MM"` strings and compared
//! lexicographically, which is correct only because the format is fixed-width.
//! `validate()` is the gate that keeps the fixed-width invariant true.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A daily focus window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Window start, zero-padded 24h `"HH:MM"`.
    pub start: String,
    /// Window end, zero-padded 24h `"HH:MM"`, inclusive.
    pub end: String,
    pub enabled: bool,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            start: "09:00".into(),
            end: "17:00".into(),
            enabled: true,
        }
    }
}

impl Schedule {
    /// Whether `now` falls inside the focus window.
    ///
    /// Always false when the schedule is disabled. Both ends are inclusive.
    ///
    /// Known limitation kept from the reference behavior: a window that
    /// crosses midnight (`start > end`) is never satisfied.
    pub fn is_within(&self, now: NaiveTime) -> bool {
        if !self.enabled {
            return false;
        }
        let current = format_hhmm(now);
        self.start.as_str() <= current.as_str() && current.as_str() <= self.end.as_str()
    }

    /// Check that both endpoints are well-formed `"HH:MM"` strings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for t in [&self.start, &self.end] {
            if !is_valid_hhmm(t) {
                return Err(ValidationError::InvalidTime(t.clone()));
            }
        }
        Ok(())
    }
}

/// Format a time of day as zero-padded 24h `"HH:MM"`.
pub fn format_hhmm(t: NaiveTime) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

fn is_valid_hhmm(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = |r: std::ops::Range<usize>| s[r].chars().all(|c| c.is_ascii_digit());
    if !digits(0..2) || !digits(3..5) {
        return false;
    }
    let hh: u32 = s[0..2].parse().unwrap_or(99);
    let mm: u32 = s[3..5].parse().unwrap_or(99);
    hh < 24 && mm < 60
}
