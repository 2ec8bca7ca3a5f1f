//! Process-wide view state.
//!
//! Fields are private. Each one is written only through the method of the
//! component that owns it, and every write bumps [`ViewState::version`] so
//! a response can be compared against the state it was requested under.

use emodash_api::{EmailId, Folder, Priority};

use crate::mood::MoodClass;

/// Mailbox tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    /// Inbox folder.
    #[default]
    Inbox,
    /// Sent folder.
    Sent,
    /// Draft folder.
    Draft,
    /// Starred mail from any folder.
    Starred,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 4] = [Self::Inbox, Self::Sent, Self::Draft, Self::Starred];

    /// Folder shown by this tab, `None` for the cross-folder starred tab.
    #[must_use]
    pub const fn folder(self) -> Option<Folder> {
        match self {
            Self::Inbox => Some(Folder::Inbox),
            Self::Sent => Some(Folder::Sent),
            Self::Draft => Some(Folder::Draft),
            Self::Starred => None,
        }
    }

    /// Group label shown above the list.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Sent => "Sent",
            Self::Draft => "Draft",
            Self::Starred => "Starred",
        }
    }

    /// Parses a tab name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "inbox" => Some(Self::Inbox),
            "sent" => Some(Self::Sent),
            "draft" | "drafts" => Some(Self::Draft),
            "starred" => Some(Self::Starred),
            _ => None,
        }
    }
}

/// Task filter chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskFilter {
    /// No filter (and, when chosen, overrides mood-driven quick-only mode).
    #[default]
    All,
    /// Quick tasks only.
    Quick,
    /// High priority only.
    High,
    /// Medium priority only.
    Medium,
    /// Low priority only.
    Low,
}

impl TaskFilter {
    /// Chips in display order.
    pub const ALL: [Self; 5] = [Self::All, Self::Quick, Self::High, Self::Medium, Self::Low];

    /// Priority this filter selects, if it is a priority filter.
    #[must_use]
    pub const fn priority(self) -> Option<Priority> {
        match self {
            Self::High => Some(Priority::High),
            Self::Medium => Some(Priority::Medium),
            Self::Low => Some(Priority::Low),
            Self::All | Self::Quick => None,
        }
    }

    /// Chip label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Quick => "Quick",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parses a filter key, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "quick" => Some(Self::Quick),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// View state for one session. Reset on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    version: u64,
    active_tab: Tab,
    task_filter: TaskFilter,
    negative_mood_active: bool,
    show_all_override: bool,
    detection_enabled: bool,
    editing_draft_id: Option<EmailId>,
    open_email_id: Option<EmailId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ViewState {
    /// Fresh state: inbox tab, "all" filter, calm mood.
    #[must_use]
    pub const fn new(detection_enabled: bool) -> Self {
        Self {
            version: 0,
            active_tab: Tab::Inbox,
            task_filter: TaskFilter::All,
            negative_mood_active: false,
            show_all_override: false,
            detection_enabled,
            editing_draft_id: None,
            open_email_id: None,
        }
    }

    /// Number of writes applied so far.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Active mailbox tab.
    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Selected task filter.
    #[must_use]
    pub const fn task_filter(&self) -> TaskFilter {
        self.task_filter
    }

    /// Whether the last classified mood was negative.
    #[must_use]
    pub const fn negative_mood_active(&self) -> bool {
        self.negative_mood_active
    }

    /// Whether the user has defeated quick-only mode with the "all" chip.
    #[must_use]
    pub const fn show_all_override(&self) -> bool {
        self.show_all_override
    }

    /// Whether the pollers are running.
    #[must_use]
    pub const fn detection_enabled(&self) -> bool {
        self.detection_enabled
    }

    /// Draft currently loaded in the compose editor.
    #[must_use]
    pub const fn editing_draft_id(&self) -> Option<EmailId> {
        self.editing_draft_id
    }

    /// Email shown in the detail pane.
    #[must_use]
    pub const fn open_email_id(&self) -> Option<EmailId> {
        self.open_email_id
    }

    const fn bump(&mut self) {
        self.version += 1;
    }

    // Mood monitor.

    /// Applies a mood classification. Positive and neutral moods also drop
    /// the user's override; a negative mood leaves it untouched.
    pub(crate) const fn apply_mood(&mut self, class: MoodClass) {
        match class {
            MoodClass::Negative => self.negative_mood_active = true,
            MoodClass::Positive | MoodClass::Neutral => {
                self.negative_mood_active = false;
                self.show_all_override = false;
            }
        }
        self.bump();
    }

    /// Flips the detection toggle and returns the new value.
    pub(crate) const fn toggle_detection(&mut self) -> bool {
        self.detection_enabled = !self.detection_enabled;
        self.bump();
        self.detection_enabled
    }

    // Task view.

    /// Selects a filter chip. "All" arms the override, anything else clears it.
    pub(crate) fn select_task_filter(&mut self, filter: TaskFilter) {
        self.task_filter = filter;
        self.show_all_override = filter == TaskFilter::All;
        self.bump();
    }

    // Mailbox view.

    /// Switches tab and clears the detail pane.
    pub(crate) const fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.open_email_id = None;
        self.bump();
    }

    pub(crate) const fn open_email(&mut self, id: EmailId) {
        self.open_email_id = Some(id);
        self.bump();
    }

    pub(crate) const fn close_email(&mut self) {
        self.open_email_id = None;
        self.bump();
    }

    pub(crate) const fn set_editing_draft(&mut self, id: Option<EmailId>) {
        self.editing_draft_id = id;
        self.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_filter_arms_override() {
        let mut state = ViewState::default();
        state.select_task_filter(TaskFilter::All);
        assert!(state.show_all_override());

        state.select_task_filter(TaskFilter::High);
        assert!(!state.show_all_override());
        assert_eq!(state.task_filter(), TaskFilter::High);
    }

    #[test]
    fn test_negative_mood_keeps_override() {
        let mut state = ViewState::default();
        state.select_task_filter(TaskFilter::All);
        state.apply_mood(MoodClass::Negative);
        assert!(state.negative_mood_active());
        assert!(state.show_all_override());
    }

    #[test]
    fn test_positive_or_neutral_mood_clears_override() {
        for class in [MoodClass::Positive, MoodClass::Neutral] {
            let mut state = ViewState::default();
            state.apply_mood(MoodClass::Negative);
            state.select_task_filter(TaskFilter::All);
            state.apply_mood(class);
            assert!(!state.negative_mood_active());
            assert!(!state.show_all_override());
        }
    }

    #[test]
    fn test_tab_switch_closes_detail() {
        let mut state = ViewState::default();
        state.open_email(EmailId(3));
        state.select_tab(Tab::Sent);
        assert_eq!(state.open_email_id(), None);
        assert_eq!(state.active_tab(), Tab::Sent);
    }

    #[test]
    fn test_every_write_bumps_version() {
        let mut state = ViewState::default();
        let before = state.version();
        state.select_task_filter(TaskFilter::Quick);
        state.toggle_detection();
        state.set_editing_draft(Some(EmailId(1)));
        assert_eq!(state.version(), before + 3);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Tab::parse("Starred"), Some(Tab::Starred));
        assert_eq!(TaskFilter::parse("MEDIUM"), Some(TaskFilter::Medium));
        assert_eq!(TaskFilter::parse("urgent"), None);
        assert_eq!(Tab::Starred.folder(), None);
    }
}
