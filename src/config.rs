use std::time::Duration;

use time::{macros::format_description, UtcOffset};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Offset used to find the calendar day of an entry.
    pub utc_offset: UtcOffset,
    pub scan_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            utc_offset: UtcOffset::UTC,
            scan_delay: Duration::from_millis(3000),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads settings through `get` so tests need not touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = get("APP_HOST").unwrap_or(defaults.host);
        let port = match get("APP_PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "APP_PORT",
                value: v,
            })?,
            None => defaults.port,
        };
        let utc_offset = match get("APP_UTC_OFFSET") {
            Some(v) => parse_offset(&v).ok_or(ConfigError::Invalid {
                key: "APP_UTC_OFFSET",
                value: v,
            })?,
            None => defaults.utc_offset,
        };
        let scan_delay = match get("SCAN_DELAY_MS") {
            Some(v) => v
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid {
                    key: "SCAN_DELAY_MS",
                    value: v,
                })?,
            None => defaults.scan_delay,
        };
        Ok(Self {
            host,
            port,
            utc_offset,
            scan_delay,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Accepts `Z`, `+07:00` or `-05:30`.
fn parse_offset(raw: &str) -> Option<UtcOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(UtcOffset::UTC);
    }
    UtcOffset::parse(
        raw,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .ok()
}
