//! In-memory store and presenter for engine tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use emodash_api::{
    Email, EmailId, EmailPatch, EmailQuery, Error, Folder, MoodEntry, MoodSummary, NewMoodEntry,
    NewTask, OutgoingEmail, RecentSample, RemoteStore, Result, Suggestion, Task, TaskId, TaskPatch,
};

use crate::journal::SummaryView;
use crate::mailbox::{ComposeState, EmailDetail, EmailRow};
use crate::mood::Theme;
use crate::presenter::{Modal, Presenter};
use crate::state::{Tab, TaskFilter};
use crate::tasks::TaskView;

#[derive(Debug, Default)]
struct FakeState {
    next_id: i64,
    tasks: Vec<Task>,
    emails: Vec<Email>,
    samples: Vec<RecentSample>,
    suggestion: Suggestion,
    entries: Vec<MoodEntry>,
    summary: MoodSummary,
    calls: Vec<String>,
    fail_mutations: bool,
    unreachable: bool,
    fail_polls: bool,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Store that keeps everything in memory, ordered newest first the way the
/// backend lists it, and records every call.
#[derive(Debug, Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        self.edit(|s| {
            s.next_id = s.next_id.max(tasks.iter().map(|t| t.id.0).max().unwrap_or(0));
            s.tasks = tasks;
        });
        self
    }

    pub fn with_emails(self, emails: Vec<Email>) -> Self {
        self.edit(|s| {
            s.next_id = s.next_id.max(emails.iter().map(|e| e.id.0).max().unwrap_or(0));
            s.emails = emails;
        });
        self
    }

    pub fn set_samples(&self, samples: Vec<RecentSample>) {
        self.edit(|s| s.samples = samples);
    }

    pub fn set_suggestion(&self, emotion: &str, activity: &str) {
        self.edit(|s| {
            s.suggestion = Suggestion {
                emotion: emotion.into(),
                activity: activity.into(),
            };
        });
    }

    pub fn set_entries(&self, entries: Vec<MoodEntry>) {
        self.edit(|s| s.entries = entries);
    }

    pub fn set_summary(&self, summary: MoodSummary) {
        self.edit(|s| s.summary = summary);
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.edit(|s| s.fail_mutations = fail);
    }

    /// Mutations fail before reaching the store, as when the connection drops.
    pub fn unreachable(&self, unreachable: bool) {
        self.edit(|s| s.unreachable = unreachable);
    }

    /// Removes a task behind the dashboard's back.
    pub fn remove_task(&self, id: TaskId) {
        self.edit(|s| s.tasks.retain(|t| t.id != id));
    }

    pub fn fail_polls(&self, fail: bool) {
        self.edit(|s| s.fail_polls = fail);
    }

    pub fn calls(&self) -> Vec<String> {
        self.edit(|s| s.calls.clone())
    }

    /// Number of recorded calls whose name starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.edit(|s| s.calls.iter().filter(|c| c.starts_with(prefix)).count())
    }

    pub fn emails(&self) -> Vec<Email> {
        self.edit(|s| s.emails.clone())
    }

    fn edit<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    fn record(&self, call: String, mutation: bool) -> Result<()> {
        self.edit(|s| {
            s.calls.push(call);
            if mutation && s.unreachable {
                Err(transport_error())
            } else if (mutation && s.fail_mutations) || (!mutation && s.fail_polls) {
                Err(Error::status(500, "fake failure"))
            } else {
                Ok(())
            }
        })
    }

    fn upsert_email(&self, message: &OutgoingEmail, folder: Folder, default_body: &str) -> EmailId {
        self.edit(|s| {
            let id = match message.id {
                Some(id) => id,
                None => EmailId(s.next_id()),
            };
            let previous = s
                .emails
                .iter()
                .position(|e| e.id == id)
                .map(|idx| s.emails.remove(idx));
            let to = Some(message.to.clone())
                .filter(|to| !to.is_empty())
                .or_else(|| previous.as_ref().and_then(|p| p.to.clone()));
            s.emails.insert(
                0,
                Email {
                    id,
                    folder,
                    sender: "You <me@local>".into(),
                    to,
                    subject: if message.subject.is_empty() {
                        "(no subject)".into()
                    } else {
                        message.subject.clone()
                    },
                    content: if message.content.is_empty() {
                        default_body.into()
                    } else {
                        message.content.clone()
                    },
                    date: "Wed, 05 Jun 2025, 09:00 AM".into(),
                    starred: previous.is_some_and(|p| p.starred),
                    read: true,
                },
            );
            id
        })
    }
}

/// A genuine reqwest error, built without touching the network.
fn transport_error() -> Error {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("relative URL must be rejected");
    Error::Http(err)
}

impl RemoteStore for FakeStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.record("list_tasks".into(), false)?;
        Ok(self.edit(|s| s.tasks.clone()))
    }

    async fn create_task(&self, task: &NewTask) -> Result<TaskId> {
        self.record(format!("create_task {}", task.text), true)?;
        Ok(self.edit(|s| {
            let id = TaskId(s.next_id());
            s.tasks.insert(
                0,
                Task {
                    id,
                    text: task.text.clone(),
                    done: task.done,
                    priority: task.priority,
                    quick: task.quick,
                },
            );
            id
        }))
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<()> {
        self.record(format!("update_task {id}"), true)?;
        self.edit(|s| {
            if let Some(task) = s.tasks.iter_mut().find(|t| t.id == id) {
                if let Some(text) = &patch.text {
                    task.text.clone_from(text);
                }
                if let Some(done) = patch.done {
                    task.done = done;
                }
                if let Some(priority) = patch.priority {
                    task.priority = priority;
                }
                if let Some(quick) = patch.quick {
                    task.quick = quick;
                }
            }
        });
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        self.record(format!("delete_task {id}"), true)?;
        self.edit(|s| s.tasks.retain(|t| t.id != id));
        Ok(())
    }

    async fn list_emails(&self, query: EmailQuery) -> Result<Vec<Email>> {
        self.record("list_emails".into(), false)?;
        Ok(self.edit(|s| {
            s.emails
                .iter()
                .filter(|e| query.folder.is_none_or(|f| e.folder == f))
                .filter(|e| query.starred.is_none_or(|st| e.starred == st))
                .cloned()
                .collect()
        }))
    }

    async fn save_draft(&self, draft: &OutgoingEmail) -> Result<EmailId> {
        self.record(format!("save_draft {:?}", draft.id.map(|id| id.0)), true)?;
        Ok(self.upsert_email(draft, Folder::Draft, ""))
    }

    async fn send_email(&self, message: &OutgoingEmail) -> Result<EmailId> {
        self.record(format!("send_email {:?}", message.id.map(|id| id.0)), true)?;
        Ok(self.upsert_email(message, Folder::Sent, "(no content)"))
    }

    async fn update_email(&self, id: EmailId, patch: &EmailPatch) -> Result<()> {
        self.record(format!("update_email {id}"), true)?;
        self.edit(|s| {
            if let Some(email) = s.emails.iter_mut().find(|e| e.id == id) {
                if let Some(starred) = patch.starred {
                    email.starred = starred;
                }
                if let Some(read) = patch.read {
                    email.read = read;
                }
                if let Some(folder) = patch.folder {
                    email.folder = folder;
                }
            }
        });
        Ok(())
    }

    async fn delete_email(&self, id: EmailId) -> Result<()> {
        self.record(format!("delete_email {id}"), true)?;
        self.edit(|s| s.emails.retain(|e| e.id != id));
        Ok(())
    }

    async fn recent_mood_samples(&self) -> Result<Vec<RecentSample>> {
        self.record("recent_mood_samples".into(), false)?;
        Ok(self.edit(|s| s.samples.clone()))
    }

    async fn current_suggestion(&self) -> Result<Suggestion> {
        self.record("current_suggestion".into(), false)?;
        Ok(self.edit(|s| s.suggestion.clone()))
    }

    async fn mood_entries(&self, date: NaiveDate, tz_offset_min: i32) -> Result<Vec<MoodEntry>> {
        self.record(format!("mood_entries {date} {tz_offset_min}"), false)?;
        Ok(self.edit(|s| s.entries.clone()))
    }

    async fn log_mood(&self, entry: &NewMoodEntry) -> Result<()> {
        self.record(format!("log_mood {}", entry.emotion), true)?;
        self.edit(|s| {
            s.entries.push(MoodEntry {
                ts: "2025-06-05T09:00:00+00:00".into(),
                emotion: entry.emotion.clone(),
                note: Some(entry.note.clone()),
                source: entry.source,
            });
        });
        Ok(())
    }

    async fn mood_summary(&self, date: NaiveDate, tz_offset_min: i32) -> Result<MoodSummary> {
        self.record(format!("mood_summary {date} {tz_offset_min}"), false)?;
        Ok(self.edit(|s| s.summary.clone()))
    }
}

/// Presenter that keeps the last thing drawn on each surface.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub tab: Option<Tab>,
    pub rows: Vec<EmailRow>,
    pub detail: Option<EmailDetail>,
    pub task_view: TaskView,
    pub task_filter: TaskFilter,
    pub compose: Option<ComposeState>,
    pub mood_log: Vec<String>,
    pub themes: Vec<Theme>,
    pub modals: Vec<Modal>,
    pub toasts: Vec<String>,
    pub charts: Vec<BTreeMap<String, u32>>,
}

impl RecordingPresenter {
    pub fn suggestion_count(&self) -> usize {
        self.modals
            .iter()
            .filter(|m| matches!(m, Modal::Suggestion(_)))
            .count()
    }

    pub fn last_summary(&self) -> Option<&SummaryView> {
        self.modals.iter().rev().find_map(|m| match m {
            Modal::Summary { view, .. } => Some(view),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render_email_list(&mut self, tab: Tab, rows: &[EmailRow]) {
        self.tab = Some(tab);
        self.rows = rows.to_vec();
    }

    fn render_email_detail(&mut self, detail: &EmailDetail) {
        self.detail = Some(detail.clone());
    }

    fn render_task_list(&mut self, view: &TaskView, filter: TaskFilter) {
        self.task_view = view.clone();
        self.task_filter = filter;
    }

    fn render_compose(&mut self, compose: Option<&ComposeState>) {
        self.compose = compose.cloned();
    }

    fn render_mood_log(&mut self, lines: &[String]) {
        self.mood_log = lines.to_vec();
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.themes.push(theme);
    }

    fn show_modal(&mut self, modal: &Modal) {
        self.modals.push(modal.clone());
    }

    fn show_toast(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }

    fn draw_bar_chart(&mut self, counts: &BTreeMap<String, u32>) {
        self.charts.push(counts.clone());
    }
}
