//! # emodash-api
//!
//! Gateway to the emodash backend store.
//!
//! ## Features
//!
//! - **Wire types**: tasks, emails, classifier samples, suggestions, journal
//! - **`RemoteStore`**: the request/response contract the dashboard engine
//!   depends on; swap in a fake for tests
//! - **`HttpStore`**: JSON-over-HTTP implementation built on `reqwest`
//!
//! ## Quick Start
//!
//! ```ignore
//! use emodash_api::{HttpStore, RemoteStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = HttpStore::new("http://127.0.0.1:5000")?;
//!     for task in store.list_tasks().await? {
//!         println!("[{}] {}", task.priority, task.text);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod http;
pub mod model;
mod store;

pub use error::{Error, Result};
pub use http::HttpStore;
pub use model::{
    Email, EmailId, EmailPatch, EmailQuery, Folder, MoodEntry, MoodSource, MoodSummary,
    NewMoodEntry, NewTask, OutgoingEmail, Priority, RecentSample, Suggestion, Task, TaskId,
    TaskPatch,
};
pub use store::RemoteStore;
