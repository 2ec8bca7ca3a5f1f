//! Configuration file loading.

use std::path::{Path, PathBuf};

use anyhow::Context;
use emodash_core::DashboardConfig;

/// Environment variable that overrides the store URL.
pub const BASE_URL_ENV: &str = "EMODASH_BASE_URL";

/// Default location of the configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("emodash")
        .join("config.json")
}

/// Loads the configuration from `path`, falling back to defaults when the
/// file does not exist, then applies the environment override.
pub async fn load_config(path: &Path) -> anyhow::Result<DashboardConfig> {
    let mut config = if path.exists() {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        DashboardConfig::default()
    };

    if let Ok(base_url) = std::env::var(BASE_URL_ENV)
        && !base_url.trim().is_empty()
    {
        config.base_url = base_url.trim().to_string();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.json")).await.unwrap();
        assert_eq!(config.mood_poll_interval_ms, 3_000);
        assert!(config.detection_enabled);
    }

    #[tokio::test]
    async fn test_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"detection_enabled": false, "request_timeout_secs": 10}"#)
            .unwrap();

        let config = load_config(&path).await.unwrap();
        assert!(!config.detection_enabled);
        assert_eq!(config.request_timeout_secs, Some(10));
        assert_eq!(config.suggestion_poll_interval_ms, 5_000);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).await.unwrap_err();
        assert!(err.to_string().starts_with("parsing"));
    }
}
