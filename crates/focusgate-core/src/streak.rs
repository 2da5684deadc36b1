//! Daily focus streak transitions.
//!
//! The streak counts consecutive calendar days on which focus mode was
//! confirmed active at least once. `advance` runs on an hourly timer, not
//! at day boundaries, so it must be idempotent for repeated same-day calls.

use chrono::{DateTime, Duration, Local};

use crate::state::FocusState;

/// Outcome of a streak transition, for logging and persistence decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// `last_focus_date` was yesterday: streak continued.
    Continued,
    /// A day was missed: counter reset to zero.
    Reset,
    /// Already counted today: nothing to do.
    AlreadyCounted,
}

/// Advance the streak for the day containing `now`.
///
/// Known limitation kept from the reference behavior: "yesterday" is
/// computed by subtracting exactly 86 400 seconds rather than one calendar
/// day, so the transition is naive across DST shifts.
pub fn advance(state: &mut FocusState, now: DateTime<Local>) -> StreakTransition {
    let today = now.date_naive();
    let yesterday = (now - Duration::seconds(86_400)).date_naive();

    let transition = if state.last_focus_date == Some(yesterday) {
        state.streak_count += 1;
        StreakTransition::Continued
    } else if state.last_focus_date != Some(today) {
        state.streak_count = 0;
        StreakTransition::Reset
    } else {
        StreakTransition::AlreadyCounted
    };

    state.last_focus_date = Some(today);
    state.best_streak = state.best_streak.max(state.streak_count);
    transition
}

/// Unconditionally reset the counter (user-initiated override).
///
/// `last_focus_date` is deliberately left untouched: the day still counts
/// as "focus confirmed", only the run is broken.
pub fn break_streak(state: &mut FocusState) {
    state.streak_count = 0;
}
