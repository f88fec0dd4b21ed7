use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_FEED_URL_TEMPLATE: &str =
    "https://www.youtube.com/feeds/videos.xml?channel_id={channel_id}";
pub const DEFAULT_ITEM_URL_TEMPLATE: &str = "https://www.youtube.com/watch?v={item_id}";

pub const CHANNEL_PLACEHOLDER: &str = "{channel_id}";
pub const ITEM_PLACEHOLDER: &str = "{item_id}";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub scout_env: String,
    pub api_bind: String,
    pub admin_secret: Option<String>,
    pub scanner: ScannerConfig,
    pub fetch_timeout: Duration,
    pub scan_concurrency: usize,
    pub scan_interval: Duration,
}

/// URL templates the scanner needs; passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub feed_url_template: String,
    pub item_url_template: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            feed_url_template: DEFAULT_FEED_URL_TEMPLATE.to_string(),
            item_url_template: DEFAULT_ITEM_URL_TEMPLATE.to_string(),
        }
    }
}

impl ScannerConfig {
    pub fn new(
        feed_url_template: impl Into<String>,
        item_url_template: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let feed_url_template = feed_url_template.into();
        let item_url_template = item_url_template.into();

        if !feed_url_template.contains(CHANNEL_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder {
                name: "SCOUT_FEED_URL_TEMPLATE",
                placeholder: CHANNEL_PLACEHOLDER,
            });
        }
        if !item_url_template.contains(ITEM_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder {
                name: "SCOUT_ITEM_URL_TEMPLATE",
                placeholder: ITEM_PLACEHOLDER,
            });
        }

        Ok(Self {
            feed_url_template,
            item_url_template,
        })
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("SCOUT_DATABASE_URL"))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let scout_env = lookup("SCOUT_ENV").unwrap_or_else(|| "development".to_string());
        let api_bind = lookup("SCOUT_API_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let admin_secret = lookup("SCOUT_ADMIN_SECRET").filter(|v| !v.is_empty());

        let scanner = ScannerConfig::new(
            lookup("SCOUT_FEED_URL_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_FEED_URL_TEMPLATE.to_string()),
            lookup("SCOUT_ITEM_URL_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_ITEM_URL_TEMPLATE.to_string()),
        )?;

        // A zero timeout would fail every fetch immediately.
        let fetch_timeout = lookup("SCOUT_FETCH_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(10u64)
            .max(1);
        let scan_concurrency = lookup("SCOUT_SCAN_CONCURRENCY")
            .and_then(|v| v.parse().ok())
            .unwrap_or(8usize)
            .max(1);
        let scan_interval = lookup("SCOUT_SCAN_INTERVAL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(900);

        Ok(Self {
            database_url,
            scout_env,
            api_bind,
            admin_secret,
            scanner,
            fetch_timeout: Duration::from_secs(fetch_timeout),
            scan_concurrency,
            scan_interval: Duration::from_secs(scan_interval),
        })
    }

    pub fn require_admin_secret(&self) -> Result<&str, ConfigError> {
        self.admin_secret
            .as_deref()
            .ok_or(ConfigError::Missing("SCOUT_ADMIN_SECRET"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[("DATABASE_URL", "postgres://localhost/scout")]).unwrap();

        assert_eq!(settings.database_url, "postgres://localhost/scout");
        assert_eq!(settings.scout_env, "development");
        assert_eq!(settings.api_bind, "0.0.0.0:3000");
        assert_eq!(settings.scanner, ScannerConfig::default());
        assert_eq!(settings.fetch_timeout, Duration::from_secs(10));
        assert_eq!(settings.scan_concurrency, 8);
        assert_eq!(settings.scan_interval, Duration::from_secs(900));
        assert!(settings.admin_secret.is_none());
    }

    #[test]
    fn test_database_url_fallback() {
        let settings =
            settings_from(&[("SCOUT_DATABASE_URL", "postgres://fallback/scout")]).unwrap();
        assert_eq!(settings.database_url, "postgres://fallback/scout");
    }

    #[test]
    fn test_missing_database_url() {
        let err = settings_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/scout"),
            ("SCOUT_FETCH_TIMEOUT_SECS", "soon"),
            ("SCOUT_SCAN_CONCURRENCY", "0"),
        ])
        .unwrap();

        assert_eq!(settings.fetch_timeout, Duration::from_secs(10));
        assert_eq!(settings.scan_concurrency, 1, "zero concurrency is clamped");
    }

    #[test]
    fn test_zero_fetch_timeout_clamped() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/scout"),
            ("SCOUT_FETCH_TIMEOUT_SECS", "0"),
        ])
        .unwrap();

        assert_eq!(settings.fetch_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let err = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/scout"),
            ("SCOUT_FEED_URL_TEMPLATE", "https://example.com/feed.xml"),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingPlaceholder {
                name: "SCOUT_FEED_URL_TEMPLATE",
                ..
            }
        ));
    }

    #[test]
    fn test_require_admin_secret() {
        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/scout"),
            ("SCOUT_ADMIN_SECRET", "hunter2"),
        ])
        .unwrap();
        assert_eq!(settings.require_admin_secret().unwrap(), "hunter2");

        let settings = settings_from(&[
            ("DATABASE_URL", "postgres://localhost/scout"),
            ("SCOUT_ADMIN_SECRET", ""),
        ])
        .unwrap();
        assert!(settings.require_admin_secret().is_err());
    }
}
