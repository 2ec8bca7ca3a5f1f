//! Mood signal, suggestion and journal wire types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a mood entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodSource {
    /// Written by the emotion classifier.
    #[default]
    Auto,
    /// Logged by the user from the journal.
    Manual,
}

/// One element of the recent-samples feed.
///
/// The classifier feed has shipped in two shapes: objects carrying a
/// timestamp, and plain label strings. Both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecentSample {
    /// `{ts, emotion}` object.
    Stamped {
        /// ISO-8601 timestamp.
        #[serde(default)]
        ts: String,
        /// Emotion label.
        #[serde(default)]
        emotion: String,
    },
    /// Bare label.
    Plain(String),
}

impl RecentSample {
    /// The emotion label as sent.
    #[must_use]
    pub fn emotion(&self) -> &str {
        match self {
            Self::Stamped { emotion, .. } => emotion,
            Self::Plain(label) => label,
        }
    }

    /// Parsed timestamp, if the sample carries a valid one.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Stamped { ts, .. } => parse_timestamp(ts),
            Self::Plain(_) => None,
        }
    }
}

/// The latest activity suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Emotion the suggestion answers (empty when none).
    #[serde(default)]
    pub emotion: String,
    /// Suggested activity (empty when none).
    #[serde(default)]
    pub activity: String,
}

/// A journal entry for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// ISO-8601 timestamp.
    pub ts: String,
    /// Emotion label.
    pub emotion: String,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Origin of the entry.
    #[serde(default)]
    pub source: MoodSource,
}

impl MoodEntry {
    /// Parsed timestamp, if valid.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.ts)
    }
}

/// A mood entry to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMoodEntry {
    /// Emotion label.
    pub emotion: String,
    /// Note (may be empty).
    pub note: String,
    /// Origin.
    pub source: MoodSource,
}

/// Per-day emotion counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSummary {
    /// Count per emotion label.
    #[serde(default)]
    pub counts: BTreeMap<String, u32>,
    /// Most frequent emotion, absent when there is no data.
    #[serde(default)]
    pub top_emotion: Option<String>,
}

/// Response carrying a store-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Created<I> {
    /// The assigned id.
    pub id: I,
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
