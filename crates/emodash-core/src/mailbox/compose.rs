//! Compose editor state.

use emodash_api::{Email, EmailId, OutgoingEmail};

use crate::validation::{ValidationError, validate_recipient};

/// Subject used when the subject field is blank.
pub const DEFAULT_SUBJECT: &str = "(no subject)";

/// Body sent when the body field is blank.
pub const DEFAULT_SEND_BODY: &str = "(no content)";

/// Compose field, for edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    /// Recipient.
    To,
    /// Subject.
    Subject,
    /// Body.
    Body,
}

/// Fields of the open compose window.
///
/// Edits live only here until saved or sent; closing the window drops them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeState {
    /// Recipient.
    pub to: String,
    /// Subject.
    pub subject: String,
    /// Body.
    pub body: String,
    /// Whether the window is collapsed.
    pub minimized: bool,
}

impl ComposeState {
    /// Empty editor.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Editor pre-filled from a draft.
    #[must_use]
    pub fn from_draft(draft: &Email) -> Self {
        Self {
            to: draft.to.clone().unwrap_or_default(),
            subject: draft.subject.clone(),
            body: draft.content.clone(),
            minimized: false,
        }
    }

    /// Editor for a reply to `email`.
    ///
    /// The recipient is the sender's address, falling back to the email's
    /// `to` field. The subject gains a `Re: ` prefix unless it already has
    /// one, and the body quotes the original under an attribution line.
    #[must_use]
    pub fn reply(email: &Email) -> Self {
        let to = Some(extract_address(&email.sender))
            .filter(|addr| !addr.is_empty())
            .or_else(|| email.to.clone())
            .unwrap_or_default();

        let subject = if email.subject.to_lowercase().starts_with("re:") {
            email.subject.clone()
        } else {
            format!("Re: {}", email.subject)
        };

        let body = format!(
            "\n\nOn {}, {} wrote:\n> {}",
            email.date,
            email.sender,
            email.content.replace('\n', "\n> ")
        );

        Self {
            to,
            subject,
            body,
            minimized: false,
        }
    }

    /// Replaces one field.
    pub fn set(&mut self, field: ComposeField, value: String) {
        match field {
            ComposeField::To => self.to = value,
            ComposeField::Subject => self.subject = value,
            ComposeField::Body => self.body = value,
        }
    }

    /// Flips the minimized flag.
    pub const fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Payload for a draft upsert. Never fails: drafts may lack a recipient.
    #[must_use]
    pub fn draft_payload(&self, id: Option<EmailId>) -> OutgoingEmail {
        OutgoingEmail {
            id,
            to: self.to.trim().to_string(),
            subject: or_default(self.subject.trim(), DEFAULT_SUBJECT),
            content: self.body.trim().to_string(),
        }
    }

    /// Payload for a send.
    ///
    /// # Errors
    ///
    /// Returns `MissingRecipient` if the recipient is blank.
    pub fn send_payload(&self, id: Option<EmailId>) -> Result<OutgoingEmail, ValidationError> {
        let to = validate_recipient(&self.to)?;
        Ok(OutgoingEmail {
            id,
            to: to.to_string(),
            subject: or_default(self.subject.trim(), DEFAULT_SUBJECT),
            content: or_default(self.body.trim(), DEFAULT_SEND_BODY),
        })
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() { default } else { value }.to_string()
}

/// Extracts the address from `Name <addr>` or a bare address.
///
/// Returns an empty string when neither form is present.
#[must_use]
pub fn extract_address(sender: &str) -> String {
    if let Some(start) = sender.find('<')
        && let Some(len) = sender[start + 1..].find('>')
    {
        return sender[start + 1..start + 1 + len].trim().to_string();
    }
    let trimmed = sender.trim();
    if trimmed.contains('@') && !trimmed.contains('<') {
        trimmed.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emodash_api::Folder;

    fn meeting() -> Email {
        Email {
            id: EmailId(1),
            folder: Folder::Inbox,
            sender: "Bob <b@x.com>".into(),
            to: Some("me@local".into()),
            subject: "Meeting".into(),
            content: "Let's meet\nat noon".into(),
            date: "2024-01-01".into(),
            starred: false,
            read: false,
        }
    }

    #[test]
    fn test_reply_fields() {
        let reply = ComposeState::reply(&meeting());
        assert_eq!(reply.to, "b@x.com");
        assert_eq!(reply.subject, "Re: Meeting");
        assert!(reply.body.contains("> Let's meet\n> at noon"));
        assert!(reply.body.contains("On 2024-01-01, Bob <b@x.com> wrote:"));
    }

    #[test]
    fn test_reply_keeps_existing_prefix() {
        let mut email = meeting();
        email.subject = "RE: Meeting".into();
        assert_eq!(ComposeState::reply(&email).subject, "RE: Meeting");
    }

    #[test]
    fn test_reply_falls_back_to_to_field() {
        let mut email = meeting();
        email.sender = "Bob".into();
        assert_eq!(ComposeState::reply(&email).to, "me@local");
    }

    #[test]
    fn test_extract_address() {
        assert_eq!(extract_address("Bob <b@x.com>"), "b@x.com");
        assert_eq!(extract_address("< b@x.com >"), "b@x.com");
        assert_eq!(extract_address("  b@x.com "), "b@x.com");
        assert_eq!(extract_address("Bob"), "");
        assert_eq!(extract_address("Bob <b@x.com"), "");
    }

    #[test]
    fn test_draft_without_recipient_keeps_subject() {
        let compose = ComposeState {
            subject: "Hi".into(),
            ..ComposeState::blank()
        };
        assert_eq!(
            compose.send_payload(Some(EmailId(7))),
            Err(ValidationError::MissingRecipient)
        );

        let draft = compose.draft_payload(Some(EmailId(7)));
        assert_eq!(draft.id, Some(EmailId(7)));
        assert_eq!(draft.subject, "Hi");
        assert_eq!(draft.to, "");
    }

    #[test]
    fn test_placeholders() {
        let compose = ComposeState {
            to: " b@x.com ".into(),
            ..ComposeState::blank()
        };
        let send = compose.send_payload(None).unwrap();
        assert_eq!(send.to, "b@x.com");
        assert_eq!(send.subject, DEFAULT_SUBJECT);
        assert_eq!(send.content, DEFAULT_SEND_BODY);

        let draft = compose.draft_payload(None);
        assert_eq!(draft.subject, DEFAULT_SUBJECT);
        assert_eq!(draft.content, "");
    }

    #[test]
    fn test_from_draft_and_edit() {
        let mut draft = meeting();
        draft.folder = Folder::Draft;
        draft.to = None;
        let mut compose = ComposeState::from_draft(&draft);
        assert_eq!(compose.to, "");
        assert_eq!(compose.body, "Let's meet\nat noon");

        compose.set(ComposeField::To, "c@x.com".into());
        compose.toggle_minimized();
        assert_eq!(compose.to, "c@x.com");
        assert!(compose.minimized);
    }
}
