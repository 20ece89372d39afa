use std::env;

use thiserror::Error;

pub const DEFAULT_IDLE_TIMEOUT_SECS: u32 = 30;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Client-side tuning. The idle timeout is configured per room by the
/// hosting layer; everything here has a sane default and an environment
/// override for local runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Seconds of inactivity on our own turn before every policy switches
    /// on. Zero disables idle escalation entirely.
    pub idle_timeout_secs: u32,
    /// Countdown tick period. Production is one second; tests shrink it.
    pub tick_interval_ms: u64,
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            log_filter: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = env_nonempty("KABOOM_IDLE_TIMEOUT_SECS") {
            config.idle_timeout_secs = parse_number("KABOOM_IDLE_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = env_nonempty("KABOOM_TICK_INTERVAL_MS") {
            config.tick_interval_ms = parse_number("KABOOM_TICK_INTERVAL_MS", &raw)?;
        }
        if let Some(filter) = env_nonempty("RUST_LOG") {
            config.log_filter = filter;
        }
        Ok(config)
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}
