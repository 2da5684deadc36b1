//! Focus state: the single persistent record the controller owns.
//!
//! Field names serialize in camelCase so the persisted keys match the
//! message surface (`isActive`, `blockedSites`, ...). Persistence is
//! incremental: mutations are expressed as a [`StatePatch`] carrying only
//! the fields that changed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;

/// Sites seeded into the blocked list on first run.
pub const DEFAULT_BLOCKED_SITES: [&str; 6] = [
    "youtube.com",
    "twitter.com",
    "instagram.com",
    "facebook.com",
    "reddit.com",
    "netflix.com",
];

/// The controller-owned focus state.
///
/// One instance per process; external surfaces only ever see snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusState {
    /// User's manual focus toggle.
    pub is_active: bool,
    /// Blocked domains, insertion-ordered for display.
    pub blocked_sites: Vec<String>,
    pub schedule: Schedule,
    pub streak_count: u32,
    /// High-water mark of `streak_count`.
    pub best_streak: u32,
    /// Last calendar day focus was confirmed active, if any.
    pub last_focus_date: Option<NaiveDate>,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            is_active: false,
            blocked_sites: DEFAULT_BLOCKED_SITES.iter().map(|s| s.to_string()).collect(),
            schedule: Schedule::default(),
            streak_count: 0,
            best_streak: 0,
            last_focus_date: None,
        }
    }
}

/// A partial [`FocusState`]: only the fields present are touched.
///
/// Used three ways: as the incremental persistence payload, as the
/// `updateSettings` request body, and as an external storage-change
/// notification. Keys outside the schema (UI-only preferences) are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_sites: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_streak: Option<u32>,
    // Double Option: outer = key present in the patch, inner = value or cleared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_focus_date: Option<Option<NaiveDate>>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge this patch into `state`. Returns true if anything changed.
    pub fn apply(&self, state: &mut FocusState) -> bool {
        let mut changed = false;
        if let Some(v) = &self.is_active {
            changed |= state.is_active != *v;
            state.is_active = *v;
        }
        if let Some(v) = &self.blocked_sites {
            changed |= state.blocked_sites != *v;
            state.blocked_sites = v.clone();
        }
        if let Some(v) = &self.schedule {
            changed |= state.schedule != *v;
            state.schedule = v.clone();
        }
        if let Some(v) = &self.streak_count {
            changed |= state.streak_count != *v;
            state.streak_count = *v;
        }
        if let Some(v) = &self.best_streak {
            changed |= state.best_streak != *v;
            state.best_streak = *v;
        }
        if let Some(v) = &self.last_focus_date {
            changed |= state.last_focus_date != *v;
            state.last_focus_date = *v;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_seeds_six_sites_and_standard_schedule() {
        let state = FocusState::default();
        assert_eq!(state.blocked_sites.len(), 6);
        assert!(state.blocked_sites.contains(&"reddit.com".to_string()));
        assert_eq!(state.schedule, Schedule::default());
        assert!(!state.is_active);
        assert_eq!(state.streak_count, 0);
        assert!(state.last_focus_date.is_none());
    }

    #[test]
    fn patch_apply_reports_changes() {
        let mut state = FocusState::default();
        let patch = StatePatch {
            is_active: Some(true),
            streak_count: Some(3),
            ..Default::default()
        };
        assert!(patch.apply(&mut state));
        assert!(state.is_active);
        assert_eq!(state.streak_count, 3);

        // Re-applying the same patch is a no-op.
        assert!(!patch.apply(&mut state));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut state = FocusState::default();
        let before = state.clone();
        assert!(!StatePatch::default().apply(&mut state));
        assert_eq!(state, before);
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = StatePatch {
            is_active: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "isActive": true }));
    }

    #[test]
    fn state_round_trips_with_camel_case_keys() {
        let state = FocusState::default();
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("blockedSites").is_some());
        assert!(json.get("streakCount").is_some());
        let back: FocusState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
