//! Mood journal and daily summary view-models.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, Offset, TimeZone};
use emodash_api::{MoodEntry, MoodSource, MoodSummary, NewMoodEntry};

/// Shown when a day has no journal entries.
pub const NO_ENTRIES: &str = "No entries for this date.";

/// Shown when a day has no summary data.
pub const NO_SUMMARY_DATA: &str = "No data for this date.";

/// Emotion logged when the user leaves the field blank.
pub const DEFAULT_MANUAL_EMOTION: &str = "Unknown";

/// A local calendar day as the store expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalDay {
    /// Local date.
    pub date: NaiveDate,
    /// UTC minus local time, in minutes.
    pub tz_offset_min: i32,
}

impl JournalDay {
    /// The given date (or today) in the process's local timezone.
    #[must_use]
    pub fn local(date: Option<NaiveDate>) -> Self {
        let now = Local::now();
        Self {
            date: date.unwrap_or_else(|| now.date_naive()),
            tz_offset_min: offset_minutes(now.offset()),
        }
    }
}

/// UTC minus local, in minutes. Zones east of UTC are negative.
#[must_use]
pub fn offset_minutes<O: Offset>(offset: &O) -> i32 {
    -offset.fix().local_minus_utc() / 60
}

/// Journal lines, oldest first: `time — emotion` plus ` — note` when a note
/// is present.
pub fn entry_lines<Tz: TimeZone>(entries: &[MoodEntry], tz: &Tz) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    if entries.is_empty() {
        return vec![NO_ENTRIES.to_string()];
    }
    let mut sorted: Vec<&MoodEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.ts.cmp(&b.ts));
    sorted
        .into_iter()
        .map(|entry| {
            let time = entry.timestamp().map_or_else(
                || "--:--:--".to_string(),
                |ts| ts.with_timezone(tz).format("%H:%M:%S").to_string(),
            );
            match entry.note.as_deref().filter(|n| !n.is_empty()) {
                Some(note) => format!("{time} — {} — {note}", entry.emotion),
                None => format!("{time} — {}", entry.emotion),
            }
        })
        .collect()
}

/// A manual journal entry. Blank emotion becomes [`DEFAULT_MANUAL_EMOTION`].
#[must_use]
pub fn manual_entry(emotion: &str, note: &str) -> NewMoodEntry {
    let emotion = emotion.trim();
    NewMoodEntry {
        emotion: if emotion.is_empty() {
            DEFAULT_MANUAL_EMOTION
        } else {
            emotion
        }
        .to_string(),
        note: note.trim().to_string(),
        source: MoodSource::Manual,
    }
}

/// Daily summary for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    /// `Emotion: n` per emotion, or the no-data line.
    pub lines: Vec<String>,
    /// `Top emotion: X`.
    pub top_line: String,
    /// Counts for the bar chart.
    pub counts: BTreeMap<String, u32>,
}

impl From<MoodSummary> for SummaryView {
    fn from(summary: MoodSummary) -> Self {
        let lines = if summary.counts.is_empty() {
            vec![NO_SUMMARY_DATA.to_string()]
        } else {
            summary
                .counts
                .iter()
                .map(|(emotion, n)| format!("{emotion}: {n}"))
                .collect()
        };
        let top_line = format!(
            "Top emotion: {}",
            summary.top_emotion.as_deref().unwrap_or("—")
        );
        Self {
            lines,
            top_line,
            counts: summary.counts,
        }
    }
}
