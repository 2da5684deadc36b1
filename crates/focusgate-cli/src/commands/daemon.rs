//! Background controller loop.
//!
//! Drives the two external triggers the controller needs: the recurring
//! streak check (hourly, first fire immediately) and storage-change
//! notifications, approximated by polling the state file and feeding any
//! observed difference through `on_external_change`. The controller's
//! self-echo guard keeps our own writes from causing a second
//! reconciliation pass.

use std::time::Duration;

use focusgate_core::{FocusController, JsonRuleStore, JsonStateStore, StateStore, STREAK_CHECK_INTERVAL};
use log::{info, warn};

use super::CmdResult;

const STORAGE_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub async fn run() -> CmdResult {
    let store = JsonStateStore::open_default()?;
    // Second handle on the same file, used only to observe writes made by
    // other surfaces.
    let watch = store.clone();
    let rules = JsonRuleStore::open_default()?;
    info!("rule set exported to {}", rules.path().display());

    let ctl = FocusController::new(store, rules);
    ctl.initialize().await;

    let mut streak_tick = tokio::time::interval(STREAK_CHECK_INTERVAL);
    let mut storage_tick = tokio::time::interval(STORAGE_POLL_INTERVAL);

    loop {
        tokio::select! {
            _ = streak_tick.tick() => {
                ctl.on_streak_timer().await;
            }
            _ = storage_tick.tick() => {
                match watch.load().await {
                    Ok(patch) => ctl.on_external_change(patch).await,
                    Err(e) => warn!("could not read state file for change detection: {e}"),
                }
            }
        }
    }
}
