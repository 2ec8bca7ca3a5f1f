//! Wire types shared with the store.

mod email;
mod mood;
mod task;

pub use email::{Email, EmailId, EmailPatch, EmailQuery, Folder, OutgoingEmail};
pub use mood::{
    Created, MoodEntry, MoodSource, MoodSummary, NewMoodEntry, RecentSample, Suggestion,
};
pub use task::{NewTask, Priority, Task, TaskId, TaskPatch};
