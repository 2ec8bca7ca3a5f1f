//! Presentation sink.

use std::collections::BTreeMap;

use crate::journal::{JournalDay, SummaryView};
use crate::mailbox::{ComposeState, EmailDetail, EmailRow};
use crate::mood::Theme;
use crate::state::{Tab, TaskFilter};
use crate::suggestion::SuggestionPopup;
use crate::tasks::TaskView;

/// Modal dialog kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Activity suggestion.
    Suggestion(SuggestionPopup),
    /// Blocking validation message.
    Alert(String),
    /// Journal entries for a day.
    Journal {
        /// Day shown.
        day: JournalDay,
        /// Rendered entry lines.
        lines: Vec<String>,
    },
    /// Daily summary.
    Summary {
        /// Day shown.
        day: JournalDay,
        /// Summary contents.
        view: SummaryView,
    },
}

/// Side-effecting sink for view-models.
///
/// The engine calls these after every change and makes no assumption about
/// how they render.
pub trait Presenter {
    /// Draws the email list for a tab.
    fn render_email_list(&mut self, tab: Tab, rows: &[EmailRow]);

    /// Draws the detail pane.
    fn render_email_detail(&mut self, detail: &EmailDetail);

    /// Draws the task list.
    fn render_task_list(&mut self, view: &TaskView, filter: TaskFilter);

    /// Draws the compose window, or hides it when `None`.
    fn render_compose(&mut self, compose: Option<&ComposeState>);

    /// Replaces the mood status log.
    fn render_mood_log(&mut self, lines: &[String]);

    /// Applies a visual theme.
    fn apply_theme(&mut self, theme: Theme);

    /// Shows a modal dialog.
    fn show_modal(&mut self, modal: &Modal);

    /// Shows a transient message.
    fn show_toast(&mut self, message: &str);

    /// Draws a bar chart of per-emotion counts.
    fn draw_bar_chart(&mut self, counts: &BTreeMap<String, u32>);
}
