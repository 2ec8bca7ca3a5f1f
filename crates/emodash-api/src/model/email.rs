//! Email wire types.

use serde::{Deserialize, Serialize};

/// Store-assigned email identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(pub i64);

impl std::fmt::Display for EmailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Folder an email lives in. Folders partition the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    /// Received mail.
    #[default]
    Inbox,
    /// Sent mail.
    Sent,
    /// Unsent drafts.
    Draft,
}

impl Folder {
    /// Wire name of the folder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Draft => "draft",
        }
    }
}

/// An email as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Identifier.
    pub id: EmailId,
    /// Folder.
    #[serde(default)]
    pub folder: Folder,
    /// Sender, either `Name <addr>` or a bare address.
    #[serde(default)]
    pub sender: String,
    /// Recipient (may be absent on drafts).
    #[serde(default)]
    pub to: Option<String>,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Plain text body.
    #[serde(default)]
    pub content: String,
    /// Display date as formatted by the store.
    #[serde(default)]
    pub date: String,
    /// Starred flag.
    #[serde(default)]
    pub starred: bool,
    /// Read flag.
    #[serde(default)]
    pub read: bool,
}

impl Email {
    /// Returns true if this email is a draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.folder == Folder::Draft
    }
}

/// Partial email update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailPatch {
    /// New starred flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    /// New read flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    /// New folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<Folder>,
}

impl EmailPatch {
    /// Patch that marks the email read.
    #[must_use]
    pub fn read() -> Self {
        Self {
            read: Some(true),
            ..Self::default()
        }
    }

    /// Patch that sets the starred flag.
    #[must_use]
    pub fn starred(starred: bool) -> Self {
        Self {
            starred: Some(starred),
            ..Self::default()
        }
    }
}

/// Optional server-side filter for listing emails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailQuery {
    /// Restrict to one folder.
    pub folder: Option<Folder>,
    /// Restrict by starred flag.
    pub starred: Option<bool>,
}

impl EmailQuery {
    /// Query pairs for the URL, empty when no filter is set.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        if let Some(folder) = self.folder {
            pairs.push(("folder", folder.as_str()));
        }
        if let Some(starred) = self.starred {
            pairs.push(("starred", if starred { "true" } else { "false" }));
        }
        pairs
    }
}

/// Payload for draft upsert and send.
///
/// When `id` is set the store updates that draft in place; otherwise it
/// assigns a new id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    /// Draft being edited, if any.
    pub id: Option<EmailId>,
    /// Recipient.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Body.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_null_recipient() {
        let email: Email = serde_json::from_str(
            r#"{"id": 7, "sender": "You <me@local>", "to": null, "subject": "Hi",
                "content": "", "folder": "draft", "starred": false, "read": true,
                "date": "Tue, 04 Jun 2025, 03:34 PM"}"#,
        )
        .unwrap();
        assert_eq!(email.id, EmailId(7));
        assert!(email.is_draft());
        assert_eq!(email.to, None);
    }

    #[test]
    fn test_query_pairs() {
        let query = EmailQuery {
            folder: Some(Folder::Sent),
            starred: Some(true),
        };
        assert_eq!(query.pairs(), vec![("folder", "sent"), ("starred", "true")]);
        assert!(EmailQuery::default().pairs().is_empty());
    }

    #[test]
    fn test_outgoing_serializes_null_id() {
        let json = serde_json::to_value(OutgoingEmail {
            to: "b@x.com".into(),
            ..OutgoingEmail::default()
        })
        .unwrap();
        assert_eq!(json["id"], serde_json::Value::Null);
        assert_eq!(json["to"], "b@x.com");
    }
}
