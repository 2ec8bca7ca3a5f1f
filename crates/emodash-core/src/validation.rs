//! Input validation for user-initiated mutations.
//!
//! Validation runs before any request is built; a rejected input never
//! reaches the store.

/// Validation error for user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Send attempted with an empty recipient.
    MissingRecipient,
    /// Task created with empty text.
    EmptyTaskText,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::MissingRecipient => "Please add at least one recipient.",
            Self::EmptyTaskText => "Please enter a task.",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingRecipient => "to",
            Self::EmptyTaskText => "text",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Validate a recipient for sending. Returns the trimmed recipient.
///
/// # Errors
///
/// Returns `MissingRecipient` if the recipient is blank.
pub fn validate_recipient(to: &str) -> Result<&str, ValidationError> {
    let to = to.trim();
    if to.is_empty() {
        Err(ValidationError::MissingRecipient)
    } else {
        Ok(to)
    }
}

/// Validate new task text. Returns the trimmed text.
///
/// # Errors
///
/// Returns `EmptyTaskText` if the text is blank.
pub fn validate_task_text(text: &str) -> Result<&str, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        Err(ValidationError::EmptyTaskText)
    } else {
        Ok(text)
    }
}
