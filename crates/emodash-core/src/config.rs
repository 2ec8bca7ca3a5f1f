//! Dashboard configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the dashboard engine. Every field has a default, so a
/// partial (or empty) JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root URL of the backend store.
    pub base_url: String,
    /// Period of the mood signal poll.
    pub mood_poll_interval_ms: u64,
    /// Period of the suggestion poll.
    pub suggestion_poll_interval_ms: u64,
    /// Minimum time before an identical suggestion may surface again.
    pub suggestion_cooldown_ms: u64,
    /// Per-request timeout. Absent means requests are awaited indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Initial state of the emotion detection toggle.
    pub detection_enabled: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            mood_poll_interval_ms: 3_000,
            suggestion_poll_interval_ms: 5_000,
            suggestion_cooldown_ms: 60_000,
            request_timeout_secs: None,
            detection_enabled: true,
        }
    }
}

impl DashboardConfig {
    /// Mood poll period. Never zero.
    #[must_use]
    pub fn mood_poll_interval(&self) -> Duration {
        Duration::from_millis(self.mood_poll_interval_ms.max(1))
    }

    /// Suggestion poll period. Never zero.
    #[must_use]
    pub fn suggestion_poll_interval(&self) -> Duration {
        Duration::from_millis(self.suggestion_poll_interval_ms.max(1))
    }

    /// Suggestion cooldown window.
    #[must_use]
    pub const fn suggestion_cooldown(&self) -> Duration {
        Duration::from_millis(self.suggestion_cooldown_ms)
    }

    /// Request timeout, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.mood_poll_interval(), Duration::from_secs(3));
        assert_eq!(config.suggestion_poll_interval(), Duration::from_secs(5));
        assert_eq!(config.suggestion_cooldown(), Duration::from_secs(60));
        assert_eq!(config.request_timeout(), None);
        assert!(config.detection_enabled);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"base_url": "http://dash.local:8080", "mood_poll_interval_ms": 1000}"#)
                .unwrap();
        assert_eq!(config.base_url, "http://dash.local:8080");
        assert_eq!(config.mood_poll_interval(), Duration::from_secs(1));
        assert_eq!(config.suggestion_cooldown_ms, 60_000);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = DashboardConfig {
            mood_poll_interval_ms: 0,
            ..DashboardConfig::default()
        };
        assert_eq!(config.mood_poll_interval(), Duration::from_millis(1));
    }
}
