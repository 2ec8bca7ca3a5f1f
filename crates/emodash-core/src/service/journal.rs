//! Mood journal operations.

use emodash_api::{MoodEntry, MoodSummary, NewMoodEntry, RemoteStore};

use crate::error::Result;
use crate::journal::JournalDay;

/// Loads the entries for a day.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn entries<S: RemoteStore>(store: &S, day: JournalDay) -> Result<Vec<MoodEntry>> {
    Ok(store.mood_entries(day.date, day.tz_offset_min).await?)
}

/// Logs an entry, then reloads the day.
///
/// # Errors
///
/// Returns an error if either request fails.
pub async fn log<S: RemoteStore>(
    store: &S,
    entry: &NewMoodEntry,
    day: JournalDay,
) -> Result<Vec<MoodEntry>> {
    store.log_mood(entry).await?;
    entries(store, day).await
}

/// Loads the summary for a day.
///
/// # Errors
///
/// Returns an error if the request fails.
pub async fn summary<S: RemoteStore>(store: &S, day: JournalDay) -> Result<MoodSummary> {
    Ok(store.mood_summary(day.date, day.tz_offset_min).await?)
}
