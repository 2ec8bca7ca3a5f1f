//! Activity suggestion deduplication.

use std::time::Duration;

use emodash_api::Suggestion;
use tokio::time::Instant;

/// Emotions that may produce a suggestion popup. Matched exactly against
/// the lower-cased emotion.
pub const SUGGESTION_EMOTIONS: [&str; 5] = ["stressed", "angry", "sad", "tired", "anxious"];

/// A suggestion cleared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionPopup {
    /// Emotion as sent by the store.
    pub emotion: String,
    /// Suggested activity.
    pub activity: String,
}

/// Decides whether a polled suggestion should surface.
///
/// A suggestion surfaces when its `emotion|activity` key differs from the
/// last surfaced key, or when more than the cooldown has elapsed since the
/// last popup. Surfacing re-arms the cooldown even for an unchanged key,
/// so an identical suggestion can surface once per cooldown period.
#[derive(Debug, Clone)]
pub struct SuggestionDeduplicator {
    cooldown: Duration,
    last_key: String,
    last_shown_at: Option<Instant>,
}

impl SuggestionDeduplicator {
    /// Creates a deduplicator with the given cooldown.
    #[must_use]
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_key: String::new(),
            last_shown_at: None,
        }
    }

    /// Key of the last surfaced suggestion (empty if none).
    #[must_use]
    pub fn last_key(&self) -> &str {
        &self.last_key
    }

    /// Offers a polled suggestion observed at `now`.
    pub fn offer(&mut self, suggestion: &Suggestion, now: Instant) -> Option<SuggestionPopup> {
        let emotion = suggestion.emotion.to_lowercase();
        let activity = suggestion.activity.as_str();
        if emotion.is_empty() || activity.is_empty() || !SUGGESTION_EMOTIONS.contains(&emotion.as_str())
        {
            return None;
        }

        let key = format!("{emotion}|{activity}");
        let cooled_down = self
            .last_shown_at
            .is_none_or(|at| now.saturating_duration_since(at) > self.cooldown);

        if key == self.last_key && !cooled_down {
            tracing::debug!(%key, "suggestion suppressed by cooldown");
            return None;
        }

        self.last_key = key;
        self.last_shown_at = Some(now);
        Some(SuggestionPopup {
            emotion: suggestion.emotion.clone(),
            activity: activity.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(emotion: &str, activity: &str) -> Suggestion {
        Suggestion {
            emotion: emotion.into(),
            activity: activity.into(),
        }
    }

    fn dedup() -> SuggestionDeduplicator {
        SuggestionDeduplicator::new(Duration::from_secs(60))
    }

    #[test]
    fn test_rejects_empty_and_non_negative() {
        let mut d = dedup();
        let now = Instant::now();
        assert_eq!(d.offer(&suggestion("", "walk 2 minutes"), now), None);
        assert_eq!(d.offer(&suggestion("Sad", ""), now), None);
        assert_eq!(d.offer(&suggestion("Happy", "smile"), now), None);
        assert_eq!(d.offer(&suggestion("slightly sad", "walk"), now), None);
        assert_eq!(d.last_key(), "");
    }

    #[test]
    fn test_same_key_within_cooldown_surfaces_once() {
        let mut d = dedup();
        let now = Instant::now();
        let s = suggestion("Stressed", "box-breath 1 minute");

        let popup = d.offer(&s, now).unwrap();
        assert_eq!(popup.emotion, "Stressed");
        assert_eq!(d.last_key(), "stressed|box-breath 1 minute");
        assert_eq!(d.offer(&s, now + Duration::from_secs(30)), None);
    }

    #[test]
    fn test_same_key_after_cooldown_surfaces_again() {
        let mut d = dedup();
        let now = Instant::now();
        let s = suggestion("Tired", "sip cool water");

        assert!(d.offer(&s, now).is_some());
        assert!(d.offer(&s, now + Duration::from_secs(61)).is_some());
    }

    #[test]
    fn test_exactly_cooldown_is_not_enough() {
        let mut d = dedup();
        let now = Instant::now();
        let s = suggestion("Angry", "three slow breaths");

        assert!(d.offer(&s, now).is_some());
        assert_eq!(d.offer(&s, now + Duration::from_secs(60)), None);
    }

    #[test]
    fn test_new_key_surfaces_immediately_and_rearms() {
        let mut d = dedup();
        let now = Instant::now();
        let a = suggestion("Sad", "list 3 good things");
        let b = suggestion("Sad", "step outside 3 minutes");

        assert!(d.offer(&a, now).is_some());
        assert!(d.offer(&b, now + Duration::from_secs(1)).is_some());
        assert!(d.offer(&a, now + Duration::from_secs(2)).is_some());
        assert_eq!(d.offer(&a, now + Duration::from_secs(3)), None);
    }
}
