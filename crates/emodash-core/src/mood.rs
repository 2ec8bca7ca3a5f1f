//! Mood signal classification.
//!
//! The classifier feed is polled on a fixed interval; the newest sample's
//! label is classified by substring match against two word lists.

use chrono::TimeZone;
use emodash_api::RecentSample;

/// Words that mark a positive label.
pub const POSITIVE_WORDS: [&str; 3] = ["happy", "calm", "focused"];

/// Words that mark a negative label.
pub const NEGATIVE_WORDS: [&str; 5] = ["sad", "angry", "stressed", "anxious", "tired"];

/// Coarse mood class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodClass {
    /// Label contains a positive word.
    Positive,
    /// Label contains a negative word and no positive word.
    Negative,
    /// Label matches neither list (including the empty label).
    Neutral,
}

impl MoodClass {
    /// Classifies a label.
    ///
    /// Matching is by substring on the lower-cased label, so
    /// `"slightly sad"` is negative. Positive words are checked first and
    /// win when a label contains both.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        if POSITIVE_WORDS.iter().any(|w| label.contains(w)) {
            Self::Positive
        } else if NEGATIVE_WORDS.iter().any(|w| label.contains(w)) {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    /// Theme signalled for this class.
    #[must_use]
    pub const fn theme(self) -> Theme {
        match self {
            Self::Positive => Theme::Calm,
            Self::Negative => Theme::Subdued,
            Self::Neutral => Theme::Neutral,
        }
    }
}

/// Visual theme signal sent to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Positive mood.
    Calm,
    /// Negative mood: the mailbox is dimmed.
    Subdued,
    /// Neither.
    Neutral,
}

/// Result of observing one non-empty batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodReading {
    /// Lower-cased label of the newest sample.
    pub label: String,
    /// Its classification.
    pub class: MoodClass,
}

/// Tracks the most recent classifier label.
#[derive(Debug, Clone, Default)]
pub struct MoodMonitor {
    last_label: Option<String>,
}

impl MoodMonitor {
    /// Creates a monitor that has seen nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last_label: None }
    }

    /// Label of the last classified sample.
    #[must_use]
    pub fn last_label(&self) -> Option<&str> {
        self.last_label.as_deref()
    }

    /// Classifies the newest sample of a batch. An empty batch carries no
    /// new information and yields `None`.
    pub fn observe(&mut self, samples: &[RecentSample]) -> Option<MoodReading> {
        let newest = samples.first()?;
        let label = newest.emotion().to_lowercase();
        let class = MoodClass::classify(&label);
        tracing::debug!(%label, ?class, "mood sample classified");
        self.last_label = Some(label.clone());
        Some(MoodReading { label, class })
    }
}

/// Formats a batch as status log lines: `[HH:MM:SS] Emotion` for stamped
/// samples (in `tz`), the raw string for plain ones.
pub fn status_lines<Tz: TimeZone>(samples: &[RecentSample], tz: &Tz) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    samples
        .iter()
        .map(|sample| match sample {
            RecentSample::Plain(label) => label.clone(),
            RecentSample::Stamped { emotion, .. } => {
                let time = sample.timestamp().map_or_else(
                    || "--:--:--".to_string(),
                    |ts| ts.with_timezone(tz).format("%H:%M:%S").to_string(),
                );
                format!("[{time}] {emotion}")
            }
        })
        .collect()
}
