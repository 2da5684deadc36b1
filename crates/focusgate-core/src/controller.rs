//! The focus controller: single writer of [`FocusState`].
//!
//! All state transitions go through here. Each operation locks the state,
//! mutates it in memory, and only then awaits persistence and rule
//! reconciliation -- the lock is held across both, so operations are
//! serialized and the "mutate, then persist" ordering can never invert.
//!
//! Storage and rule-store failures are logged and absorbed: the in-memory
//! state stays authoritative and the next trigger retries implicitly.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::error::ValidationError;
use crate::rules::{self, RuleStore};
use crate::sites;
use crate::state::{FocusState, StatePatch};
use crate::storage::StateStore;
use crate::streak::{self, StreakTransition};

/// Cadence of the recurring streak check.
pub const STREAK_CHECK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(3600);

/// Owns the process-wide [`FocusState`] behind a single-writer boundary.
pub struct FocusController<S, R> {
    state: Mutex<FocusState>,
    store: S,
    rules: R,
}

impl<S: StateStore, R: RuleStore> FocusController<S, R> {
    /// Controller starting from defaults; call [`initialize`] to load
    /// persisted state and install the initial rule set.
    ///
    /// [`initialize`]: FocusController::initialize
    pub fn new(store: S, rules: R) -> Self {
        Self {
            state: Mutex::new(FocusState::default()),
            store,
            rules,
        }
    }

    /// Load persisted state (missing fields fall back to defaults) and
    /// perform the initial reconciliation.
    pub async fn initialize(&self) {
        let mut state = self.state.lock().await;
        match self.store.load().await {
            Ok(patch) => {
                patch.apply(&mut state);
                info!("initial state loaded: streak={}, {} blocked sites", state.streak_count, state.blocked_sites.len());
            }
            Err(e) => {
                warn!("failed to load persisted state, starting from defaults: {e}");
            }
        }
        self.reconcile_locked(&state).await;
    }

    /// Read-only snapshot for external callers.
    pub async fn state(&self) -> FocusState {
        self.state.lock().await.clone()
    }

    /// The single blocking predicate: inside the schedule window AND the
    /// manual focus toggle is on.
    pub async fn should_block_now(&self) -> bool {
        let state = self.state.lock().await;
        Self::should_block(&state, Local::now())
    }

    /// Flip the manual focus toggle. Returns the new value.
    pub async fn toggle_focus(&self) -> bool {
        let mut state = self.state.lock().await;
        state.is_active = !state.is_active;
        info!("focus toggled to {}", state.is_active);
        self.persist_logged(&StatePatch {
            is_active: Some(state.is_active),
            ..Default::default()
        })
        .await;
        self.reconcile_locked(&state).await;
        state.is_active
    }

    /// Merge partial settings into the state, persist them and
    /// re-reconcile.
    ///
    /// A patch carrying a malformed schedule is rejected whole, so the
    /// fixed-width `"HH:MM"` invariant holds for everything that lands in
    /// the state.
    pub async fn update_settings(&self, patch: StatePatch) -> Result<(), ValidationError> {
        if let Some(schedule) = &patch.schedule {
            schedule.validate()?;
        }
        let mut state = self.state.lock().await;
        patch.apply(&mut state);
        self.persist_logged(&patch).await;
        self.reconcile_locked(&state).await;
        Ok(())
    }

    /// Add a site to the blocked list. Input is normalized first;
    /// malformed domains and duplicates are rejected and never reach the
    /// list. Returns the updated list.
    pub async fn add_site(&self, input: &str) -> Result<Vec<String>, ValidationError> {
        let site = sites::normalize_site(input);
        let mut state = self.state.lock().await;
        sites::validate_site(&site, &state.blocked_sites)?;
        state.blocked_sites.push(site);
        self.persist_logged(&StatePatch {
            blocked_sites: Some(state.blocked_sites.clone()),
            ..Default::default()
        })
        .await;
        self.reconcile_locked(&state).await;
        Ok(state.blocked_sites.clone())
    }

    /// Remove a site from the blocked list. Unknown sites are a no-op.
    /// Returns the updated list.
    pub async fn remove_site(&self, site: &str) -> Vec<String> {
        let site = sites::normalize_site(site);
        let mut state = self.state.lock().await;
        let before = state.blocked_sites.len();
        state.blocked_sites.retain(|s| s != &site);
        if state.blocked_sites.len() != before {
            self.persist_logged(&StatePatch {
                blocked_sites: Some(state.blocked_sites.clone()),
                ..Default::default()
            })
            .await;
            self.reconcile_locked(&state).await;
        }
        state.blocked_sites.clone()
    }

    /// User-initiated override: reset the streak counter. Blocking status
    /// is unaffected, so no reconciliation happens here.
    pub async fn break_streak(&self) -> u32 {
        let mut state = self.state.lock().await;
        streak::break_streak(&mut state);
        self.persist_logged(&StatePatch {
            streak_count: Some(state.streak_count),
            ..Default::default()
        })
        .await;
        state.streak_count
    }

    /// Recurring streak check, driven by the hourly timer. Idempotent for
    /// repeated same-day calls.
    pub async fn on_streak_timer(&self) {
        let now = Local::now();
        let mut state = self.state.lock().await;
        let transition = streak::advance(&mut state, now);
        match transition {
            StreakTransition::Continued => info!("streak continued: {}", state.streak_count),
            StreakTransition::Reset => info!("streak reset"),
            StreakTransition::AlreadyCounted => debug!("streak already counted today"),
        }
        self.persist_logged(&StatePatch {
            streak_count: Some(state.streak_count),
            best_streak: Some(state.best_streak),
            last_focus_date: Some(state.last_focus_date),
            ..Default::default()
        })
        .await;
        self.reconcile_locked(&state).await;
    }

    /// React to a storage mutation made by another surface: overwrite the
    /// in-memory fields present in `patch` and re-reconcile.
    ///
    /// A patch that changes nothing (the echo of our own write) skips the
    /// extra reconciliation pass; reconciliation is idempotent, so the
    /// guard is an optimization rather than a correctness requirement.
    pub async fn on_external_change(&self, patch: StatePatch) {
        let mut state = self.state.lock().await;
        if patch.apply(&mut state) {
            debug!("external storage change, re-reconciling");
            self.reconcile_locked(&state).await;
        }
    }

    /// Recompute and commit the rule set for the current blocking intent.
    pub async fn reconcile(&self) {
        let state = self.state.lock().await;
        self.reconcile_locked(&state).await;
    }

    fn should_block(state: &FocusState, now: DateTime<Local>) -> bool {
        state.is_active && state.schedule.is_within(now.time())
    }

    async fn reconcile_locked(&self, state: &FocusState) {
        let should_block = Self::should_block(state, Local::now());
        let update = rules::reconcile(&state.blocked_sites, should_block);
        debug!(
            "reconciling rules: should_block={should_block}, {} rules",
            update.add.len()
        );
        if let Err(e) = self.rules.apply(&update).await {
            warn!("rule set commit failed, will retry on next trigger: {e}");
        }
    }

    async fn persist_logged(&self, patch: &StatePatch) {
        if let Err(e) = self.store.persist(patch).await {
            warn!("failed to persist state, in-memory state remains authoritative: {e}");
        }
    }
}
