pub mod daemon;
pub mod schedule;
pub mod sites;
pub mod status;
pub mod streak;

use focusgate_core::{FocusController, JsonRuleStore, JsonStateStore};

pub type Controller = FocusController<JsonStateStore, JsonRuleStore>;
pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Build a controller over the default stores and load persisted state.
/// Every invocation reconciles the rule file on the way up, so a stale
/// rule set heals on the next command.
pub async fn controller() -> Result<Controller, Box<dyn std::error::Error>> {
    let ctl = FocusController::new(JsonStateStore::open_default()?, JsonRuleStore::open_default()?);
    ctl.initialize().await;
    Ok(ctl)
}
