//! Plain-text presenter.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::Write;

use emodash_core::mailbox::EMPTY_DETAIL_PLACEHOLDER;
use emodash_core::{
    ComposeState, EmailDetail, EmailRow, Modal, Presenter, Tab, TaskFilter, TaskView, Theme,
};

const BAR_WIDTH: u32 = 24;

/// Writes every view as lines of text.
pub struct TerminalPresenter<W> {
    out: W,
}

impl TerminalPresenter<std::io::Stdout> {
    /// Presenter on standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Presenter on any writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(err) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %err, "failed to write output");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_email_list(&mut self, tab: Tab, rows: &[EmailRow]) {
        self.line(format_args!("== {} ({}) ==", tab.label(), rows.len()));
        for row in rows {
            let unread = if row.unread { " *" } else { "" };
            self.line(format_args!(
                "{} #{} [{}] {}: {} | {} ({}){unread}",
                row.star_glyph(),
                row.id,
                row.avatar,
                row.sender,
                row.subject,
                row.preview,
                row.time,
            ));
        }
    }

    fn render_email_detail(&mut self, detail: &EmailDetail) {
        match detail {
            EmailDetail::Empty => self.line(EMPTY_DETAIL_PLACEHOLDER),
            EmailDetail::Open {
                id,
                sender,
                to_line,
                subject,
                date,
                content,
            } => {
                self.line(format_args!("-- #{id} {subject}"));
                self.line(format_args!("From: {sender}"));
                if let Some(to_line) = to_line {
                    self.line(to_line);
                }
                self.line(format_args!("Date: {date}"));
                self.line("");
                self.line(content);
            }
        }
    }

    fn render_task_list(&mut self, view: &TaskView, filter: TaskFilter) {
        self.line(format_args!("== Tasks [{}] {} ==", filter.label(), view.counts_label()));
        if view.banner_visible {
            self.line("Quick-only mode: showing quick tasks");
        }
        for task in &view.active {
            let quick = if task.quick { " ⚡" } else { "" };
            self.line(format_args!("[ ] #{} ({}){quick} {}", task.id, task.priority, task.text));
        }
        if !view.completed.is_empty() {
            self.line(format_args!("Completed ({})", view.completed.len()));
            for task in &view.completed {
                self.line(format_args!("[x] #{} {}", task.id, task.text));
            }
        }
    }

    fn render_compose(&mut self, compose: Option<&ComposeState>) {
        match compose {
            None => self.line("(compose closed)"),
            Some(compose) if compose.minimized => self.line("(compose minimized)"),
            Some(compose) => {
                self.line("== Compose ==");
                self.line(format_args!("To: {}", compose.to));
                self.line(format_args!("Subject: {}", compose.subject));
                self.line(&compose.body);
            }
        }
    }

    fn render_mood_log(&mut self, lines: &[String]) {
        self.line(format_args!("mood: {}", lines.join(" | ")));
    }

    fn apply_theme(&mut self, theme: Theme) {
        let name = match theme {
            Theme::Calm => "calm",
            Theme::Subdued => "subdued",
            Theme::Neutral => "neutral",
        };
        self.line(format_args!("theme: {name}"));
    }

    fn show_modal(&mut self, modal: &Modal) {
        match modal {
            Modal::Suggestion(popup) => {
                self.line(format_args!("🧠 Emotion Detected: {}", popup.emotion));
                self.line(format_args!("💡 Suggested Activity: {}", popup.activity));
            }
            Modal::Alert(message) => self.line(format_args!("! {message}")),
            Modal::Journal { day, lines } => {
                self.line(format_args!("== Mood journal {} ==", day.date));
                for line in lines {
                    self.line(line);
                }
            }
            Modal::Summary { day, view } => {
                self.line(format_args!("== Daily summary {} ==", day.date));
                for line in &view.lines {
                    self.line(line);
                }
                self.line(&view.top_line);
            }
        }
    }

    fn show_toast(&mut self, message: &str) {
        self.line(format_args!(">> {message}"));
    }

    fn draw_bar_chart(&mut self, counts: &BTreeMap<String, u32>) {
        let max = counts.values().copied().max().unwrap_or(0).max(1);
        let label_width = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        for (emotion, &n) in counts {
            let cells = (u64::from(n) * u64::from(BAR_WIDTH)).div_ceil(u64::from(max));
            let width = usize::try_from(cells).unwrap_or_default();
            self.line(format_args!(
                "{emotion:<label_width$} {} {n}",
                "█".repeat(width)
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emodash_api::{Priority, Task, TaskId};
    use emodash_core::{SuggestionPopup, SummaryView};

    fn output(f: impl FnOnce(&mut TerminalPresenter<Vec<u8>>)) -> String {
        let mut presenter = TerminalPresenter::new(Vec::new());
        f(&mut presenter);
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_task_list_with_banner() {
        let view = TaskView {
            active: vec![Task {
                id: TaskId(4),
                text: "stretch".into(),
                done: false,
                priority: Priority::Low,
                quick: true,
            }],
            completed: Vec::new(),
            banner_visible: true,
            open_count: 3,
        };
        let out = output(|p| p.render_task_list(&view, TaskFilter::All));
        assert!(out.contains("Open: 3 • Completed: 0"));
        assert!(out.contains("Quick-only mode"));
        assert!(out.contains("[ ] #4 (low) ⚡ stretch"));
    }

    #[test]
    fn test_empty_detail_placeholder() {
        let out = output(|p| p.render_email_detail(&EmailDetail::Empty));
        assert_eq!(out, "Select an email to read...\n");
    }

    #[test]
    fn test_suggestion_modal() {
        let out = output(|p| {
            p.show_modal(&Modal::Suggestion(SuggestionPopup {
                emotion: "Tired".into(),
                activity: "sip cool water".into(),
            }));
        });
        assert!(out.contains("Emotion Detected: Tired"));
        assert!(out.contains("Suggested Activity: sip cool water"));
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let counts = BTreeMap::from([("Calm".to_string(), 4), ("Sad".to_string(), 2)]);
        let out = output(|p| p.draw_bar_chart(&counts));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].matches('█').count(), 24);
        assert_eq!(lines[1].matches('█').count(), 12);
        assert!(lines[1].starts_with("Sad  "));
    }

    #[test]
    fn test_bar_chart_handles_huge_counts() {
        let counts = BTreeMap::from([("Calm".to_string(), u32::MAX), ("Sad".to_string(), 1)]);
        let out = output(|p| p.draw_bar_chart(&counts));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].matches('█').count(), 24);
        assert_eq!(lines[1].matches('█').count(), 1);
    }

    #[test]
    fn test_summary_modal() {
        let view = SummaryView {
            lines: vec!["Calm: 3".into()],
            top_line: "Top emotion: Calm".into(),
            counts: BTreeMap::new(),
        };
        let day = emodash_core::JournalDay::local(None);
        let out = output(|p| p.show_modal(&Modal::Summary { day, view }));
        assert!(out.contains("Calm: 3\nTop emotion: Calm"));
    }
}
