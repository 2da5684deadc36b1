//! Declarative redirect rules and reconciliation.
//!
//! Blocking is expressed as a set of redirect rules, one per blocked
//! domain, committed to a [`RuleStore`]. Reconciliation is a full replace:
//! every pass removes the entire id range and (when blocking is on)
//! re-adds one rule per site. No stale rule can linger, at the cost of a
//! transient unblocked window during the swap.

use log::warn;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::RuleStoreError;

/// Fixed rule capacity. Sites beyond this are silently unrepresented.
pub const MAX_RULES: u32 = 100;

/// Interstitial page shown instead of a blocked site. The matched site is
/// carried as a query parameter.
pub const BLOCKED_PAGE_URL: &str = "focusgate://blocked";

/// Request classes a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Top-level page loads only.
    MainFrame,
}

/// A single redirect rule.
///
/// Rule ids are positional: the site at list position `i` always maps to
/// rule id `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRule {
    pub id: u32,
    pub priority: u32,
    /// Wildcard host match, `*://*.{site}/*`.
    pub url_filter: String,
    pub resource_types: Vec<ResourceType>,
    pub redirect_url: String,
}

impl RedirectRule {
    fn for_site(site: &str, position: usize) -> Self {
        Self {
            id: position as u32 + 1,
            priority: 1,
            url_filter: format!("*://*.{site}/*"),
            resource_types: vec![ResourceType::MainFrame],
            redirect_url: format!("{BLOCKED_PAGE_URL}?site={}", urlencoding::encode(site)),
        }
    }
}

/// A full-replace update: remove the whole id range, then add `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSetUpdate {
    pub remove_ids: Vec<u32>,
    pub add: Vec<RedirectRule>,
}

/// Compute the rule set update for the current blocking decision.
pub fn reconcile(blocked_sites: &[String], should_block: bool) -> RuleSetUpdate {
    let remove_ids = (1..=MAX_RULES).collect();
    if !should_block {
        return RuleSetUpdate {
            remove_ids,
            add: Vec::new(),
        };
    }
    if blocked_sites.len() > MAX_RULES as usize {
        warn!(
            "{} blocked sites exceed the {MAX_RULES}-rule capacity; excess sites are not enforced",
            blocked_sites.len()
        );
    }
    let add = blocked_sites
        .iter()
        .take(MAX_RULES as usize)
        .enumerate()
        .map(|(i, site)| RedirectRule::for_site(site, i))
        .collect();
    RuleSetUpdate { remove_ids, add }
}

/// The platform's declarative rule facility.
///
/// Commits are fallible; the controller logs failures and retries on the
/// next reconciliation rather than crashing.
pub trait RuleStore {
    fn apply(&self, update: &RuleSetUpdate)
        -> impl Future<Output = Result<(), RuleStoreError>> + Send;
}

/// In-memory rule store, for tests and embedders that enforce rules
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    installed: std::sync::Mutex<Vec<RedirectRule>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the currently installed rules, ordered by id.
    pub fn installed(&self) -> Vec<RedirectRule> {
        self.installed.lock().unwrap().clone()
    }
}

impl RuleStore for MemoryRuleStore {
    async fn apply(&self, update: &RuleSetUpdate) -> Result<(), RuleStoreError> {
        let mut rules = self.installed.lock().unwrap();
        rules.retain(|r| !update.remove_ids.contains(&r.id));
        rules.extend(update.add.iter().cloned());
        rules.sort_by_key(|r| r.id);
        Ok(())
    }
}

/// File-backed rule store: maintains the installed rule set as a JSON
/// array for an external enforcement agent to consume. This is the
/// system's stand-in for a platform-native declarative rule facility.
#[derive(Debug, Clone)]
pub struct JsonRuleStore {
    path: std::path::PathBuf,
}

impl JsonRuleStore {
    /// Store backed by `rules.json` in the default data directory.
    pub fn open_default() -> Result<Self, crate::error::StorageError> {
        Ok(Self::at(crate::storage::data_dir()?.join("rules.json")))
    }

    pub fn at(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_installed(&self) -> Result<Vec<RedirectRule>, RuleStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| RuleStoreError::CommitFailed(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| RuleStoreError::CommitFailed(e.to_string()))
    }
}

impl RuleStore for JsonRuleStore {
    async fn apply(&self, update: &RuleSetUpdate) -> Result<(), RuleStoreError> {
        let mut rules = self.read_installed()?;
        rules.retain(|r| !update.remove_ids.contains(&r.id));
        rules.extend(update.add.iter().cloned());
        rules.sort_by_key(|r| r.id);

        let body = serde_json::to_string_pretty(&rules)
            .map_err(|e| RuleStoreError::CommitFailed(e.to_string()))?;
        // Temp file plus rename, so the enforcement agent never reads a
        // half-written rule set.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| RuleStoreError::CommitFailed(e.to_string()))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| RuleStoreError::CommitFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sites(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blocking_adds_one_rule_per_site_with_positional_ids() {
        let update = reconcile(&sites(&["a.com", "b.com"]), true);
        assert_eq!(update.remove_ids, (1..=100).collect::<Vec<u32>>());
        assert_eq!(update.add.len(), 2);
        assert_eq!(update.add[0].id, 1);
        assert_eq!(update.add[1].id, 2);
        assert_eq!(update.add[0].url_filter, "*://*.a.com/*");
        assert_eq!(update.add[0].resource_types, vec![ResourceType::MainFrame]);
        assert_eq!(update.add[0].redirect_url, "focusgate://blocked?site=a.com");
    }

    #[test]
    fn not_blocking_removes_everything_and_adds_nothing() {
        let update = reconcile(&sites(&["a.com", "b.com", "c.com"]), false);
        assert_eq!(update.remove_ids.len(), 100);
        assert!(update.add.is_empty());
    }

    #[test]
    fn sites_beyond_capacity_are_dropped() {
        let many: Vec<String> = (0..150).map(|i| format!("site{i}.com")).collect();
        let update = reconcile(&many, true);
        assert_eq!(update.add.len(), 100);
        assert_eq!(update.add.last().unwrap().id, 100);
    }

    #[test]
    fn redirect_url_encodes_the_site() {
        let update = reconcile(&sites(&["news.ycombinator.com"]), true);
        assert_eq!(
            update.add[0].redirect_url,
            "focusgate://blocked?site=news.ycombinator.com"
        );
    }

    #[tokio::test]
    async fn memory_store_full_replace_is_idempotent() {
        let store = MemoryRuleStore::new();
        let update = reconcile(&sites(&["a.com", "b.com"]), true);
        store.apply(&update).await.unwrap();
        store.apply(&update).await.unwrap();
        assert_eq!(store.installed().len(), 2);

        let clear = reconcile(&[], false);
        store.apply(&clear).await.unwrap();
        assert!(store.installed().is_empty());
    }

    #[tokio::test]
    async fn json_store_replaces_rule_file_on_each_commit() {
        let dir = tempdir().unwrap();
        let store = JsonRuleStore::at(dir.path().join("rules.json"));

        store
            .apply(&reconcile(&sites(&["a.com", "b.com"]), true))
            .await
            .unwrap();
        let installed = store.read_installed().unwrap();
        assert_eq!(installed.len(), 2);

        store
            .apply(&reconcile(&sites(&["c.com"]), true))
            .await
            .unwrap();
        let installed = store.read_installed().unwrap();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].url_filter, "*://*.c.com/*");

        store.apply(&reconcile(&[], false)).await.unwrap();
        assert!(store.read_installed().unwrap().is_empty());
    }
}
