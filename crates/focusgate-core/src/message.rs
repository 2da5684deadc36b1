//! Request/response surface for popup, options and page-script callers.
//!
//! Wire shape mirrors the persisted keys: `{"action": "...", "data": ...}`
//! in, an untagged response object out.

use serde::{Deserialize, Serialize};

use crate::controller::FocusController;
use crate::rules::RuleStore;
use crate::state::{FocusState, StatePatch};
use crate::storage::StateStore;

/// Inbound message from an external surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Request {
    GetState,
    UpdateSettings(StatePatch),
    ToggleFocus,
    BreakStreak,
    ShouldBlock,
}

/// Reply to a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum Response {
    State(FocusState),
    Success { success: bool },
    Toggled { is_active: bool },
    Streak { streak_count: u32 },
    ShouldBlock { should_block: bool },
    Error { error: String },
}

impl<S: StateStore, R: RuleStore> FocusController<S, R> {
    /// Dispatch one inbound request.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::GetState => Response::State(self.state().await),
            Request::UpdateSettings(patch) => match self.update_settings(patch).await {
                Ok(()) => Response::Success { success: true },
                Err(e) => Response::Error {
                    error: e.to_string(),
                },
            },
            Request::ToggleFocus => Response::Toggled {
                is_active: self.toggle_focus().await,
            },
            Request::BreakStreak => Response::Streak {
                streak_count: self.break_streak().await,
            },
            Request::ShouldBlock => Response::ShouldBlock {
                should_block: self.should_block_now().await,
            },
        }
    }
}
