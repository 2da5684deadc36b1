//! # Focusgate Core Library
//!
//! Core logic for Focusgate, a schedule-driven distraction blocker. The
//! library decides whether blocking should be active right now and keeps a
//! declarative redirect-rule set reconciled against that decision; thin
//! surfaces (CLI, popup, options page) talk to it through a small
//! request/response message surface.
//!
//! ## Key Components
//!
//! - [`FocusController`]: single writer of the persistent focus state;
//!   handles install, the hourly streak timer, inbound requests and
//!   external storage changes
//! - [`Schedule`]: pure daily-window evaluation over `"HH:MM"` strings
//! - [`streak`]: calendar-day streak transitions
//! - [`rules`]: full-replace redirect-rule reconciliation
//! - [`StateStore`] / [`RuleStore`]: capabilities for durable storage and
//!   the platform's declarative rule facility

pub mod controller;
pub mod error;
pub mod message;
pub mod rules;
pub mod schedule;
pub mod sites;
pub mod state;
pub mod storage;
pub mod streak;

pub use controller::{FocusController, STREAK_CHECK_INTERVAL};
pub use error::{CoreError, RuleStoreError, StorageError, ValidationError};
pub use message::{Request, Response};
pub use rules::{JsonRuleStore, MemoryRuleStore, RedirectRule, RuleSetUpdate, RuleStore, MAX_RULES};
pub use schedule::Schedule;
pub use state::{FocusState, StatePatch, DEFAULT_BLOCKED_SITES};
pub use storage::{data_dir, JsonStateStore, MemoryStateStore, StateStore};
pub use streak::StreakTransition;
