//! The dashboard engine.
//!
//! [`Dashboard::update`] applies one [`Event`] to the owned state and
//! returns the store requests it started as [`Pending`] futures. Each
//! future resolves to another event carrying the response, so all state
//! changes happen inside `update` and every event runs to completion before
//! the next one is applied.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use emodash_api::{
    Email, EmailId, MoodEntry, MoodSummary, NewTask, Priority, RecentSample, RemoteStore,
    Suggestion, Task, TaskId, TaskPatch,
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::EntityCache;
use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::journal::{self, JournalDay, SummaryView};
use crate::mailbox::{ComposeField, ComposeState, EmailDetail, OpenAction, email_rows};
use crate::mood::{MoodMonitor, status_lines};
use crate::presenter::{Modal, Presenter};
use crate::service::{self, Reloaded};
use crate::state::{Tab, TaskFilter, ViewState};
use crate::suggestion::SuggestionDeduplicator;
use crate::tasks::{TaskView, compute_visible};
use crate::validation::validate_task_text;

/// A store request in flight, resolving to the event that carries its result.
pub type Pending = Pin<Box<dyn Future<Output = Event> + Send + 'static>>;

/// What a task reload confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOp {
    /// Plain load.
    Load,
    /// A task was created.
    Add,
    /// A task's text was edited.
    Edit,
    /// Done, priority or quick flag changed.
    Change,
    /// A task was deleted.
    Delete,
}

impl TaskOp {
    const fn toast(self) -> Option<&'static str> {
        match self {
            Self::Add => Some("Task added"),
            Self::Edit => Some("Task updated"),
            Self::Delete => Some("Task deleted"),
            Self::Load | Self::Change => None,
        }
    }

    const fn action(self) -> &'static str {
        match self {
            Self::Load => "load tasks",
            Self::Add => "add task",
            Self::Edit | Self::Change => "update task",
            Self::Delete => "delete task",
        }
    }
}

/// What an email reload confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailOp {
    /// Plain load.
    Load,
    /// An email was marked read.
    Read,
    /// An email was starred or unstarred.
    Star,
    /// An email was deleted.
    Delete {
        /// Whether it was a draft.
        draft: bool,
    },
}

impl EmailOp {
    const fn action(self) -> &'static str {
        match self {
            Self::Load => "load emails",
            Self::Read | Self::Star => "update email",
            Self::Delete { .. } => "delete email",
        }
    }
}

/// Input to [`Dashboard::update`]: user commands, timer ticks and store
/// responses.
#[derive(Debug)]
pub enum Event {
    /// Initial load.
    Start,
    /// Mood poll timer fired.
    MoodTick,
    /// Suggestion poll timer fired.
    SuggestionTick,
    /// Flip the emotion detection toggle.
    ToggleDetection,

    /// Switch mailbox tab.
    SelectTab(Tab),
    /// Open an email (drafts open in compose).
    OpenEmail(EmailId),
    /// Flip an email's starred flag.
    ToggleStar(EmailId),
    /// Delete an email.
    DeleteEmail(EmailId),
    /// Reply to the email in the detail pane.
    ReplyToCurrent,

    /// Open a blank compose window.
    ComposeNew,
    /// Replace a compose field.
    ComposeEdit(ComposeField, String),
    /// Toggle the minimized compose window.
    ComposeMinimize,
    /// Close compose, discarding unsaved edits.
    ComposeClose,
    /// Save compose as a draft.
    SaveDraft,
    /// Send compose.
    Send,

    /// Select a task filter chip.
    SetTaskFilter(TaskFilter),
    /// Create a task.
    AddTask {
        /// Task text.
        text: String,
        /// Priority.
        priority: Priority,
        /// Quick flag.
        quick: bool,
    },
    /// Flip a task's done flag.
    ToggleTaskDone(TaskId),
    /// Edit a task's text. Blank text keeps the previous text.
    EditTaskText(TaskId, String),
    /// Advance a task's priority.
    CyclePriority(TaskId),
    /// Set a task's quick flag.
    SetTaskQuick(TaskId, bool),
    /// Delete a task.
    DeleteTask(TaskId),
    /// Move a task within the local list.
    MoveTask(TaskId, isize),

    /// Show the journal for a date (today if `None`).
    OpenJournal(Option<NaiveDate>),
    /// Log a manual mood entry.
    LogMood {
        /// Emotion (blank logs "Unknown").
        emotion: String,
        /// Note.
        note: String,
        /// Journal date to show afterwards.
        date: Option<NaiveDate>,
    },
    /// Show the daily summary for a date (today if `None`).
    OpenSummary(Option<NaiveDate>),

    /// Tasks reloaded.
    TasksLoaded {
        /// Operation being confirmed.
        op: TaskOp,
        /// Reloaded tasks, with the store's answer to the mutation.
        result: Result<Reloaded<(), Vec<Task>>>,
    },
    /// Emails reloaded.
    EmailsLoaded {
        /// Operation being confirmed.
        op: EmailOp,
        /// Reloaded emails, with the store's answer to the mutation.
        result: Result<Reloaded<(), Vec<Email>>>,
    },
    /// Draft save answered; carries its id and the reloaded emails.
    DraftSaved(Result<Reloaded<EmailId, Vec<Email>>>),
    /// Send answered; carries the reloaded emails.
    Sent(Result<Reloaded<EmailId, Vec<Email>>>),
    /// Mood samples polled.
    MoodPolled {
        /// State version when the poll was issued.
        issued_at: u64,
        /// Polled samples.
        result: emodash_api::Result<Vec<RecentSample>>,
    },
    /// Suggestion polled.
    SuggestionPolled(emodash_api::Result<Suggestion>),
    /// Journal entries loaded.
    JournalLoaded {
        /// Day shown.
        day: JournalDay,
        /// Whether a manual entry was just logged.
        logged: bool,
        /// Entries.
        result: Result<Vec<MoodEntry>>,
    },
    /// Summary loaded.
    SummaryLoaded {
        /// Day shown.
        day: JournalDay,
        /// Summary.
        result: Result<MoodSummary>,
    },
}

fn perform<T, F, M>(future: F, map: M) -> Pending
where
    F: Future<Output = T> + Send + 'static,
    M: FnOnce(T) -> Event + Send + 'static,
{
    Box::pin(async move { map(future.await) })
}

/// The dashboard engine.
pub struct Dashboard<S, P> {
    store: Arc<S>,
    presenter: P,
    config: DashboardConfig,
    state: ViewState,
    cache: EntityCache,
    mood: MoodMonitor,
    suggestions: SuggestionDeduplicator,
    compose: Option<ComposeState>,
}

impl<S: RemoteStore, P: Presenter> Dashboard<S, P> {
    /// Creates an engine with empty caches.
    pub fn new(store: S, presenter: P, config: DashboardConfig) -> Self {
        Self {
            store: Arc::new(store),
            presenter,
            state: ViewState::new(config.detection_enabled),
            cache: EntityCache::new(),
            mood: MoodMonitor::new(),
            suggestions: SuggestionDeduplicator::new(config.suggestion_cooldown()),
            compose: None,
            config,
        }
    }

    /// Configuration.
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// View state.
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Cached entities.
    pub const fn cache(&self) -> &EntityCache {
        &self.cache
    }

    /// Open compose window, if any.
    pub const fn compose(&self) -> Option<&ComposeState> {
        self.compose.as_ref()
    }

    /// Mood monitor.
    pub const fn mood(&self) -> &MoodMonitor {
        &self.mood
    }

    /// The store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The presenter.
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Current task view.
    pub fn task_view(&self) -> TaskView {
        compute_visible(
            self.cache.tasks(),
            self.state.task_filter(),
            self.state.negative_mood_active(),
            self.state.show_all_override(),
        )
    }

    /// Applies an event and returns the requests it started.
    pub fn update(&mut self, event: Event) -> Vec<Pending> {
        match event {
            Event::Start => {
                info!(detection = self.state.detection_enabled(), "dashboard starting");
                self.render_all();
                vec![self.reload_tasks(TaskOp::Load), self.reload_emails(EmailOp::Load)]
            }
            Event::MoodTick => self.poll_mood(),
            Event::SuggestionTick => self.poll_suggestion(),
            Event::ToggleDetection => {
                let enabled = self.state.toggle_detection();
                info!(enabled, "emotion detection toggled");
                self.presenter.show_toast(if enabled {
                    "Emotion detection on"
                } else {
                    "Emotion detection off"
                });
                Vec::new()
            }

            Event::SelectTab(tab) => {
                self.state.select_tab(tab);
                self.render_mailbox();
                Vec::new()
            }
            Event::OpenEmail(id) => self.open_email(id),
            Event::ToggleStar(id) => {
                let Some(starred) = self.cache.email(id).map(|e| e.starred) else {
                    return Vec::new();
                };
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::mail::set_starred(&*store, id, !starred).await },
                    |result| Event::EmailsLoaded {
                        op: EmailOp::Star,
                        result,
                    },
                )]
            }
            Event::DeleteEmail(id) => {
                let Some(draft) = self.cache.email(id).map(Email::is_draft) else {
                    return Vec::new();
                };
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::mail::delete(&*store, id).await },
                    move |result| Event::EmailsLoaded {
                        op: EmailOp::Delete { draft },
                        result,
                    },
                )]
            }
            Event::ReplyToCurrent => {
                let Some(email) = self.state.open_email_id().and_then(|id| self.cache.email(id))
                else {
                    self.presenter.show_toast("No email selected");
                    return Vec::new();
                };
                self.compose = Some(ComposeState::reply(email));
                self.state.set_editing_draft(None);
                self.render_compose();
                Vec::new()
            }

            Event::ComposeNew => {
                self.compose = Some(ComposeState::blank());
                self.state.set_editing_draft(None);
                self.render_compose();
                Vec::new()
            }
            Event::ComposeEdit(field, value) => {
                if let Some(compose) = self.compose.as_mut() {
                    compose.set(field, value);
                }
                Vec::new()
            }
            Event::ComposeMinimize => {
                if let Some(compose) = self.compose.as_mut() {
                    compose.toggle_minimized();
                }
                self.render_compose();
                Vec::new()
            }
            Event::ComposeClose => {
                self.compose = None;
                self.state.set_editing_draft(None);
                self.render_compose();
                Vec::new()
            }
            Event::SaveDraft => {
                let Some(compose) = &self.compose else {
                    return Vec::new();
                };
                let draft = compose.draft_payload(self.state.editing_draft_id());
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::mail::save_draft(&*store, &draft).await },
                    Event::DraftSaved,
                )]
            }
            Event::Send => {
                let Some(compose) = &self.compose else {
                    return Vec::new();
                };
                let message = match compose.send_payload(self.state.editing_draft_id()) {
                    Ok(message) => message,
                    Err(err) => {
                        self.report("send message", &err.into());
                        return Vec::new();
                    }
                };
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::mail::send(&*store, &message).await },
                    Event::Sent,
                )]
            }

            Event::SetTaskFilter(filter) => {
                self.state.select_task_filter(filter);
                self.render_tasks();
                Vec::new()
            }
            Event::AddTask {
                text,
                priority,
                quick,
            } => {
                let text = match validate_task_text(&text) {
                    Ok(text) => text.to_string(),
                    Err(err) => {
                        self.report("add task", &err.into());
                        return Vec::new();
                    }
                };
                let task = NewTask::new(text, priority).quick(quick);
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::tasks::create(&*store, &task).await },
                    |result| Event::TasksLoaded {
                        op: TaskOp::Add,
                        result,
                    },
                )]
            }
            Event::ToggleTaskDone(id) => {
                self.patch_task(id, TaskOp::Change, |task| TaskPatch::done(!task.done))
            }
            Event::EditTaskText(id, text) => self.patch_task(id, TaskOp::Edit, |task| {
                let text = text.trim();
                TaskPatch::text(if text.is_empty() { task.text.as_str() } else { text })
            }),
            Event::CyclePriority(id) => self.patch_task(id, TaskOp::Change, |task| {
                TaskPatch::priority(task.priority.cycle())
            }),
            Event::SetTaskQuick(id, quick) => {
                self.patch_task(id, TaskOp::Change, |_| TaskPatch::quick(quick))
            }
            Event::DeleteTask(id) => {
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::tasks::delete(&*store, id).await },
                    |result| Event::TasksLoaded {
                        op: TaskOp::Delete,
                        result,
                    },
                )]
            }
            Event::MoveTask(id, delta) => {
                if self.cache.move_task(id, delta) {
                    self.render_tasks();
                }
                Vec::new()
            }

            Event::OpenJournal(date) => vec![self.load_journal(JournalDay::local(date), false)],
            Event::LogMood {
                emotion,
                note,
                date,
            } => {
                let entry = journal::manual_entry(&emotion, &note);
                let day = JournalDay::local(date);
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::journal::log(&*store, &entry, day).await },
                    move |result| Event::JournalLoaded {
                        day,
                        logged: true,
                        result,
                    },
                )]
            }
            Event::OpenSummary(date) => {
                let day = JournalDay::local(date);
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::journal::summary(&*store, day).await },
                    move |result| Event::SummaryLoaded { day, result },
                )]
            }

            Event::TasksLoaded { op, result } => {
                match result {
                    Ok(Reloaded { outcome, items }) => {
                        self.cache.replace_tasks(items);
                        self.render_tasks();
                        match outcome {
                            Ok(()) => {
                                if let Some(toast) = op.toast() {
                                    self.presenter.show_toast(toast);
                                }
                            }
                            Err(err) => self.report(op.action(), &err.into()),
                        }
                    }
                    Err(err) => self.report(op.action(), &err),
                }
                Vec::new()
            }
            Event::EmailsLoaded { op, result } => {
                match result {
                    Ok(Reloaded { outcome, items }) => {
                        self.replace_emails(items);
                        match (outcome, op) {
                            (Ok(()), EmailOp::Delete { draft }) => {
                                self.state.close_email();
                                self.render_mailbox();
                                self.presenter
                                    .show_toast(if draft { "Draft deleted" } else { "Email deleted" });
                            }
                            (Ok(()), _) => {}
                            (Err(err), _) => self.report(op.action(), &err.into()),
                        }
                    }
                    Err(err) => self.report(op.action(), &err),
                }
                Vec::new()
            }
            Event::DraftSaved(result) => {
                match result {
                    Ok(Reloaded { outcome, items }) => {
                        self.replace_emails(items);
                        match outcome {
                            Ok(id) => {
                                self.state.set_editing_draft(Some(id));
                                self.state.select_tab(Tab::Draft);
                                self.render_mailbox();
                                self.presenter.show_toast("Draft saved");
                            }
                            Err(err) => self.report("save draft", &err.into()),
                        }
                    }
                    Err(err) => self.report("save draft", &err),
                }
                Vec::new()
            }
            Event::Sent(result) => match result {
                Ok(Reloaded { outcome, items }) => {
                    self.replace_emails(items);
                    if let Err(err) = outcome {
                        self.report("send message", &err.into());
                        return Vec::new();
                    }
                    self.state.set_editing_draft(None);
                    self.state.select_tab(Tab::Sent);
                    self.render_mailbox();
                    let newest_sent = self
                        .cache
                        .emails()
                        .iter()
                        .find(|e| e.folder == emodash_api::Folder::Sent)
                        .map(|e| e.id);
                    let pending = newest_sent.map(|id| self.open_email(id)).unwrap_or_default();
                    self.presenter.show_toast("Message sent");
                    self.compose = None;
                    self.render_compose();
                    pending
                }
                Err(err) => {
                    self.report("send message", &err);
                    Vec::new()
                }
            },
            Event::MoodPolled { issued_at, result } => {
                self.apply_mood_poll(issued_at, result);
                Vec::new()
            }
            Event::SuggestionPolled(result) => {
                self.apply_suggestion_poll(result);
                Vec::new()
            }
            Event::JournalLoaded {
                day,
                logged,
                result,
            } => {
                match result {
                    Ok(entries) => {
                        let lines = journal::entry_lines(&entries, &Local);
                        self.presenter.show_modal(&Modal::Journal { day, lines });
                        if logged {
                            self.presenter.show_toast("Mood logged");
                        }
                    }
                    Err(err) => self.report(if logged { "log mood" } else { "load journal" }, &err),
                }
                Vec::new()
            }
            Event::SummaryLoaded { day, result } => {
                match result {
                    Ok(summary) => {
                        let view = SummaryView::from(summary);
                        self.presenter.draw_bar_chart(&view.counts);
                        self.presenter.show_modal(&Modal::Summary { day, view });
                    }
                    Err(err) => self.report("load summary", &err),
                }
                Vec::new()
            }
        }
    }

    /// Applies an event and drives every request it starts, one at a time,
    /// until nothing is left in flight.
    pub async fn settle(&mut self, event: Event) {
        let mut queue: VecDeque<Pending> = self.update(event).into();
        while let Some(pending) = queue.pop_front() {
            let next = pending.await;
            queue.extend(self.update(next));
        }
    }

    fn open_email(&mut self, id: EmailId) -> Vec<Pending> {
        let Some(email) = self.cache.email(id) else {
            debug!(%id, "open ignored: email not cached");
            return Vec::new();
        };
        match OpenAction::for_email(email) {
            OpenAction::EditDraft(id) => {
                self.compose = Some(ComposeState::from_draft(email));
                self.state.set_editing_draft(Some(id));
                self.render_compose();
                Vec::new()
            }
            OpenAction::Display(id) => {
                let already_read = email.read;
                self.state.open_email(id);
                self.render_mailbox();
                if already_read {
                    return Vec::new();
                }
                let store = Arc::clone(&self.store);
                vec![perform(
                    async move { service::mail::mark_read(&*store, id).await },
                    |result| Event::EmailsLoaded {
                        op: EmailOp::Read,
                        result,
                    },
                )]
            }
        }
    }

    fn patch_task(
        &self,
        id: TaskId,
        op: TaskOp,
        make: impl FnOnce(&Task) -> TaskPatch,
    ) -> Vec<Pending> {
        let Some(task) = self.cache.task(id) else {
            debug!(%id, "task update ignored: not cached");
            return Vec::new();
        };
        let patch = make(task);
        let store = Arc::clone(&self.store);
        vec![perform(
            async move { service::tasks::update(&*store, id, &patch).await },
            move |result| Event::TasksLoaded { op, result },
        )]
    }

    fn reload_tasks(&self, op: TaskOp) -> Pending {
        let store = Arc::clone(&self.store);
        perform(
            async move { service::tasks::reload(&*store).await.map(Reloaded::loaded) },
            move |result| Event::TasksLoaded { op, result },
        )
    }

    fn reload_emails(&self, op: EmailOp) -> Pending {
        let store = Arc::clone(&self.store);
        perform(
            async move { service::mail::reload(&*store).await.map(Reloaded::loaded) },
            move |result| Event::EmailsLoaded { op, result },
        )
    }

    fn load_journal(&self, day: JournalDay, logged: bool) -> Pending {
        let store = Arc::clone(&self.store);
        perform(
            async move { service::journal::entries(&*store, day).await },
            move |result| Event::JournalLoaded {
                day,
                logged,
                result,
            },
        )
    }

    fn poll_mood(&self) -> Vec<Pending> {
        if !self.state.detection_enabled() {
            return Vec::new();
        }
        let issued_at = self.state.version();
        let store = Arc::clone(&self.store);
        vec![perform(
            async move { store.recent_mood_samples().await },
            move |result| Event::MoodPolled { issued_at, result },
        )]
    }

    fn poll_suggestion(&self) -> Vec<Pending> {
        if !self.state.detection_enabled() {
            return Vec::new();
        }
        let store = Arc::clone(&self.store);
        vec![perform(
            async move { store.current_suggestion().await },
            Event::SuggestionPolled,
        )]
    }

    fn apply_mood_poll(&mut self, issued_at: u64, result: emodash_api::Result<Vec<RecentSample>>) {
        let samples = match result {
            Ok(samples) => samples,
            Err(err) => {
                warn!(error = %err, "mood poll failed");
                return;
            }
        };
        if !self.state.detection_enabled() {
            debug!("mood poll response dropped: detection disabled");
            return;
        }
        if issued_at != self.state.version() {
            debug!(
                issued_at,
                current = self.state.version(),
                "mood poll response applied after a state change"
            );
        }

        self.presenter
            .render_mood_log(&status_lines(&samples, &Local));
        let Some(reading) = self.mood.observe(&samples) else {
            return;
        };
        self.state.apply_mood(reading.class);
        self.presenter.apply_theme(reading.class.theme());
        self.render_tasks();
    }

    fn apply_suggestion_poll(&mut self, result: emodash_api::Result<Suggestion>) {
        let suggestion = match result {
            Ok(suggestion) => suggestion,
            Err(err) => {
                warn!(error = %err, "suggestion poll failed");
                return;
            }
        };
        if !self.state.detection_enabled() {
            return;
        }
        if let Some(popup) = self.suggestions.offer(&suggestion, Instant::now()) {
            info!(emotion = %popup.emotion, activity = %popup.activity, "suggestion surfaced");
            self.presenter.show_modal(&Modal::Suggestion(popup));
        }
    }

    fn replace_emails(&mut self, emails: Vec<Email>) {
        self.cache.replace_emails(emails);
        if let Some(id) = self.state.open_email_id()
            && self.cache.email(id).is_none()
        {
            debug!(%id, "open email no longer cached");
            self.state.close_email();
        }
        self.render_mailbox();
    }

    fn report(&mut self, action: &str, err: &Error) {
        match err {
            Error::Validation(invalid) => {
                debug!(field = invalid.field(), action, "input rejected");
                self.presenter
                    .show_modal(&Modal::Alert(invalid.message().to_string()));
            }
            Error::Store(_) => {
                warn!(error = %err, action, "store request failed");
                self.presenter
                    .show_toast(&format!("Could not {action}: {err}"));
            }
        }
    }

    fn render_all(&mut self) {
        self.render_mailbox();
        self.render_tasks();
        self.render_compose();
    }

    fn render_tasks(&mut self) {
        let view = self.task_view();
        self.presenter
            .render_task_list(&view, self.state.task_filter());
    }

    fn render_mailbox(&mut self) {
        let tab = self.state.active_tab();
        let rows = email_rows(self.cache.emails(), tab);
        self.presenter.render_email_list(tab, &rows);
        let detail = EmailDetail::for_open(self.cache.emails(), self.state.open_email_id());
        self.presenter.render_email_detail(&detail);
    }

    fn render_compose(&mut self) {
        self.presenter.render_compose(self.compose.as_ref());
    }
}
