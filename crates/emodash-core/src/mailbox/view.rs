//! Email list and detail view-models.

use emodash_api::{Email, EmailId, Folder};

use crate::state::Tab;

/// Placeholder shown in the detail pane when nothing is open.
pub const EMPTY_DETAIL_PLACEHOLDER: &str = "Select an email to read...";

/// Emails visible under a tab, in cache order.
///
/// The starred tab is a cross-folder filter; the others match one folder.
#[must_use]
pub fn visible_emails(emails: &[Email], tab: Tab) -> Vec<&Email> {
    emails
        .iter()
        .filter(|email| match tab.folder() {
            Some(folder) => email.folder == folder,
            None => email.starred,
        })
        .collect()
}

/// Per-row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Open the draft in the compose editor.
    Edit,
    /// Delete the email.
    Delete,
}

/// What clicking a row does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAction {
    /// Load the draft into compose.
    EditDraft(EmailId),
    /// Show in the detail pane (marking it read).
    Display(EmailId),
}

impl OpenAction {
    /// Action for opening `email`.
    #[must_use]
    pub fn for_email(email: &Email) -> Self {
        if email.is_draft() {
            Self::EditDraft(email.id)
        } else {
            Self::Display(email.id)
        }
    }
}

/// One row of the email list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRow {
    /// Email id.
    pub id: EmailId,
    /// Sender as stored.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// First line of the body.
    pub preview: String,
    /// Short time label.
    pub time: String,
    /// Avatar initial.
    pub avatar: char,
    /// Emphasized as unread.
    pub unread: bool,
    /// Starred flag.
    pub starred: bool,
    /// Buttons shown on the row.
    pub actions: Vec<RowAction>,
}

impl EmailRow {
    /// Builds the row for an email.
    #[must_use]
    pub fn from_email(email: &Email) -> Self {
        let actions = match email.folder {
            Folder::Draft => vec![RowAction::Edit, RowAction::Delete],
            Folder::Inbox | Folder::Sent => vec![RowAction::Delete],
        };
        Self {
            id: email.id,
            sender: email.sender.clone(),
            subject: email.subject.clone(),
            preview: email.content.lines().next().unwrap_or_default().to_string(),
            time: time_label(&email.date),
            avatar: avatar_initial(&email.sender),
            unread: !email.read && email.folder == Folder::Inbox,
            starred: email.starred,
            actions,
        }
    }

    /// Star glyph for the row.
    #[must_use]
    pub const fn star_glyph(&self) -> char {
        if self.starred { '★' } else { '☆' }
    }
}

/// Rows for a tab.
#[must_use]
pub fn email_rows(emails: &[Email], tab: Tab) -> Vec<EmailRow> {
    visible_emails(emails, tab)
        .into_iter()
        .map(EmailRow::from_email)
        .collect()
}

/// Text after the first comma of the date, else the whole date.
fn time_label(date: &str) -> String {
    date.split(',')
        .nth(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(date)
        .to_string()
}

fn avatar_initial(sender: &str) -> char {
    sender
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('U')
}

/// Detail pane contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailDetail {
    /// Nothing open.
    Empty,
    /// An open email.
    Open {
        /// Email id.
        id: EmailId,
        /// Sender.
        sender: String,
        /// `To:` line, when the email has a recipient.
        to_line: Option<String>,
        /// Subject.
        subject: String,
        /// Date as stored.
        date: String,
        /// Body.
        content: String,
    },
}

impl EmailDetail {
    /// Detail for the open email id, `Empty` if none or not cached.
    #[must_use]
    pub fn for_open(emails: &[Email], open: Option<EmailId>) -> Self {
        let Some(email) = open.and_then(|id| emails.iter().find(|e| e.id == id)) else {
            return Self::Empty;
        };
        Self::Open {
            id: email.id,
            sender: email.sender.clone(),
            to_line: email
                .to
                .as_deref()
                .filter(|to| !to.is_empty())
                .map(|to| format!("To: {to}")),
            subject: email.subject.clone(),
            date: email.date.clone(),
            content: email.content.clone(),
        }
    }

    /// Whether the reply action is available.
    #[must_use]
    pub const fn reply_enabled(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}
