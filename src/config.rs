//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the libSQL database file.
    pub db_path: PathBuf,
    /// Resolution of the routine countdown timer.
    pub timer_tick: Duration,
    /// Local hour at which the dashboard switches from the morning to the evening routine.
    pub morning_cutoff_hour: u32,
    /// Offset from UTC used for calendar-day questions (diary days, "today's routine").
    pub utc_offset: FixedOffset,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/skincare-mentor.db"),
            timer_tick: Duration::from_secs(1),
            morning_cutoff_hour: 14,
            utc_offset: Utc.fix(),
        }
    }
}

impl AppConfig {
    /// Build a config from `SKINCARE_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup("SKINCARE_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("SKINCARE_TIMER_TICK_MS") {
            let ms: u64 = parse_value("SKINCARE_TIMER_TICK_MS", &raw)?;
            if ms == 0 {
                return Err(invalid("SKINCARE_TIMER_TICK_MS", "must be greater than zero"));
            }
            config.timer_tick = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup("SKINCARE_MORNING_CUTOFF_HOUR") {
            let hour: u32 = parse_value("SKINCARE_MORNING_CUTOFF_HOUR", &raw)?;
            if hour > 23 {
                return Err(invalid("SKINCARE_MORNING_CUTOFF_HOUR", "must be between 0 and 23"));
            }
            config.morning_cutoff_hour = hour;
        }

        if let Some(raw) = lookup("SKINCARE_UTC_OFFSET_MINUTES") {
            let minutes: i32 = parse_value("SKINCARE_UTC_OFFSET_MINUTES", &raw)?;
            config.utc_offset = minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| invalid("SKINCARE_UTC_OFFSET_MINUTES", "offset out of range"))?;
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, &e.to_string()))
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
