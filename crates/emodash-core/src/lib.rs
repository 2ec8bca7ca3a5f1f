//! # emodash-core
//!
//! Reactive state engine for the emodash dashboard.
//!
//! This crate provides:
//! - **Entity Cache** - tasks and emails mirrored from the store, replaced
//!   wholesale after every mutation
//! - **Mood Signal Monitor** - classifies the polled emotion feed and drives
//!   the negative-mood flag
//! - **Suggestion Deduplicator** - cooldown rule for activity suggestions
//! - **Task View Filter** - quick-only mode, priority chips and the "all"
//!   override
//! - **Mailbox View** - tabs, list and detail view-models, compose and
//!   reply
//! - **Mood Journal** - daily entries, manual logging and summaries
//! - **Dashboard** - the event-driven engine and its runtime loop

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cache;
mod config;
pub mod dashboard;
mod error;
pub mod journal;
pub mod mailbox;
pub mod mood;
pub mod presenter;
pub mod runtime;
pub mod service;
pub mod state;
pub mod suggestion;
pub mod tasks;
mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::EntityCache;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, EmailOp, Event, Pending, TaskOp};
pub use error::{Error, Result};
pub use journal::{JournalDay, SummaryView};
pub use mailbox::{ComposeField, ComposeState, EmailDetail, EmailRow, OpenAction, RowAction};
pub use mood::{MoodClass, MoodMonitor, MoodReading, Theme};
pub use presenter::{Modal, Presenter};
pub use state::{Tab, TaskFilter, ViewState};
pub use suggestion::{SuggestionDeduplicator, SuggestionPopup};
pub use tasks::{TaskView, compute_visible};
pub use validation::{ValidationError, validate_recipient, validate_task_text};
