use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Telegram bot token
    pub telegram_bot_token: String,

    /// Path of the watchlist table
    pub watchlist_file: PathBuf,

    /// Path of the notifications table
    pub notifications_file: PathBuf,

    /// Seconds between two poller iterations
    pub poll_interval_secs: u64,

    /// Timeout for every lookup service request
    pub request_timeout_secs: u64,

    /// Pause between per-symbol price lookups inside one iteration
    pub request_spacing_ms: u64,

    /// First delay of the transport restart loop
    pub restart_delay_secs: u64,

    /// Upper bound of the transport restart delay
    pub max_restart_delay_secs: u64,

    /// DEX Screener token endpoint
    pub dexscreener_api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: String::new(),
            watchlist_file: PathBuf::from("watchlist.json"),
            notifications_file: PathBuf::from("notifications.json"),
            poll_interval_secs: 300,
            request_timeout_secs: 10,
            request_spacing_ms: 100,
            restart_delay_secs: 15,
            max_restart_delay_secs: 240,
            dexscreener_api_url: "https://api.dexscreener.com/latest/dex/tokens".to_string(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from defaults overlaid by environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default(
                "watchlist_file",
                defaults.watchlist_file.to_string_lossy().to_string(),
            )?
            .set_default(
                "notifications_file",
                defaults.notifications_file.to_string_lossy().to_string(),
            )?
            .set_default("poll_interval_secs", defaults.poll_interval_secs as i64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("request_spacing_ms", defaults.request_spacing_ms as i64)?
            .set_default("restart_delay_secs", defaults.restart_delay_secs as i64)?
            .set_default(
                "max_restart_delay_secs",
                defaults.max_restart_delay_secs as i64,
            )?
            .set_default("dexscreener_api_url", defaults.dexscreener_api_url)?
            .add_source(config::Environment::default().try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize::<AppConfig>()
            .context("TELEGRAM_BOT_TOKEN must be set in environment variables")
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn request_spacing(&self) -> Duration {
        Duration::from_millis(self.request_spacing_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_secs(self.restart_delay_secs)
    }

    pub fn max_restart_delay(&self) -> Duration {
        Duration::from_secs(self.max_restart_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::with_locked_env;

    const KEYS: [&str; 9] = [
        "TELEGRAM_BOT_TOKEN",
        "WATCHLIST_FILE",
        "NOTIFICATIONS_FILE",
        "POLL_INTERVAL_SECS",
        "REQUEST_TIMEOUT_SECS",
        "REQUEST_SPACING_MS",
        "RESTART_DELAY_SECS",
        "MAX_RESTART_DELAY_SECS",
        "DEXSCREENER_API_URL",
    ];

    fn cleared<'a>(overrides: &[(&'a str, &'a str)]) -> Vec<(&'a str, Option<&'a str>)> {
        KEYS.iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| *value);
                (*key, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_apply_when_only_the_token_is_set() {
        let config = with_locked_env(&cleared(&[("TELEGRAM_BOT_TOKEN", "123:abc")]), || {
            AppConfig::from_env().unwrap()
        });

        assert_eq!(config.telegram_bot_token, "123:abc");
        assert_eq!(config.watchlist_file, PathBuf::from("watchlist.json"));
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
        assert_eq!(config.request_spacing(), Duration::from_millis(100));
        assert_eq!(config.restart_delay(), Duration::from_secs(15));
        assert_eq!(config.max_restart_delay(), Duration::from_secs(240));
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = with_locked_env(
            &cleared(&[
                ("TELEGRAM_BOT_TOKEN", "123:abc"),
                ("POLL_INTERVAL_SECS", "60"),
                ("NOTIFICATIONS_FILE", "/var/lib/bot/notifications.json"),
            ]),
            || AppConfig::from_env().unwrap(),
        );

        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(
            config.notifications_file,
            PathBuf::from("/var/lib/bot/notifications.json")
        );
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_missing_token_is_a_startup_error() {
        let result = with_locked_env(&cleared(&[]), AppConfig::from_env);

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("TELEGRAM_BOT_TOKEN"));
    }
}
