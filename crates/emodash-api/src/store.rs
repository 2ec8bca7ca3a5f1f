//! The store gateway contract.

use std::future::Future;

use chrono::NaiveDate;

use crate::error::Result;
use crate::model::{
    Email, EmailId, EmailPatch, EmailQuery, MoodEntry, MoodSummary, NewMoodEntry, NewTask,
    OutgoingEmail, RecentSample, Suggestion, Task, TaskId, TaskPatch,
};

/// Request/response access to the task, email and mood store.
///
/// Every method is a single stateless round trip. Implementations never
/// retry and never cache; callers reload collections after mutating them.
pub trait RemoteStore: Send + Sync + 'static {
    /// Lists all tasks in store order.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// Creates a task and returns its id.
    fn create_task(&self, task: &NewTask) -> impl Future<Output = Result<TaskId>> + Send;

    /// Applies a partial update to a task.
    fn update_task(&self, id: TaskId, patch: &TaskPatch)
    -> impl Future<Output = Result<()>> + Send;

    /// Deletes a task.
    fn delete_task(&self, id: TaskId) -> impl Future<Output = Result<()>> + Send;

    /// Lists emails, most recent first, optionally filtered.
    fn list_emails(&self, query: EmailQuery) -> impl Future<Output = Result<Vec<Email>>> + Send;

    /// Creates or updates a draft and returns its id.
    fn save_draft(&self, draft: &OutgoingEmail) -> impl Future<Output = Result<EmailId>> + Send;

    /// Sends a message (promoting the draft when `id` is set) and returns its id.
    fn send_email(&self, message: &OutgoingEmail)
    -> impl Future<Output = Result<EmailId>> + Send;

    /// Applies a partial update to an email.
    fn update_email(
        &self,
        id: EmailId,
        patch: &EmailPatch,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Deletes an email.
    fn delete_email(&self, id: EmailId) -> impl Future<Output = Result<()>> + Send;

    /// Most recent classifier samples, newest first.
    fn recent_mood_samples(&self) -> impl Future<Output = Result<Vec<RecentSample>>> + Send;

    /// The latest activity suggestion.
    fn current_suggestion(&self) -> impl Future<Output = Result<Suggestion>> + Send;

    /// Journal entries for a local calendar date.
    ///
    /// `tz_offset_min` is UTC minus local time in minutes.
    fn mood_entries(
        &self,
        date: NaiveDate,
        tz_offset_min: i32,
    ) -> impl Future<Output = Result<Vec<MoodEntry>>> + Send;

    /// Appends a mood entry.
    fn log_mood(&self, entry: &NewMoodEntry) -> impl Future<Output = Result<()>> + Send;

    /// Per-emotion counts for a local calendar date.
    fn mood_summary(
        &self,
        date: NaiveDate,
        tz_offset_min: i32,
    ) -> impl Future<Output = Result<MoodSummary>> + Send;
}
