//! Task wire types.

use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (store default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Next priority in the low → medium → high → low cycle.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Wire name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a wire name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as stored remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier.
    pub id: TaskId,
    /// Task text.
    pub text: String,
    /// Whether the task is completed.
    #[serde(default)]
    pub done: bool,
    /// Priority.
    #[serde(default)]
    pub priority: Priority,
    /// Quick tasks stay visible while mood-driven filtering is active.
    #[serde(default)]
    pub quick: bool,
}

/// A task to create (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    /// Task text.
    pub text: String,
    /// Whether the task starts completed.
    pub done: bool,
    /// Priority.
    pub priority: Priority,
    /// Quick flag.
    pub quick: bool,
}

impl NewTask {
    /// Creates an open task with the given text and priority.
    #[must_use]
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            text: text.into(),
            done: false,
            priority,
            quick: false,
        }
    }

    /// Sets the quick flag.
    #[must_use]
    pub const fn quick(mut self, quick: bool) -> Self {
        self.quick = quick;
        self
    }
}

/// Partial task update. Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    /// New text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New quick flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick: Option<bool>,
}

impl TaskPatch {
    /// Patch that sets only the completion state.
    #[must_use]
    pub fn done(done: bool) -> Self {
        Self {
            done: Some(done),
            ..Self::default()
        }
    }

    /// Patch that sets only the text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Patch that sets only the priority.
    #[must_use]
    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Patch that sets only the quick flag.
    #[must_use]
    pub fn quick(quick: bool) -> Self {
        Self {
            quick: Some(quick),
            ..Self::default()
        }
    }
}
