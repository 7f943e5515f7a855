use std::path::PathBuf;
use std::time::Duration;

use greenhouse_sim::error::ConfigError;
use greenhouse_sim::greenhouse::SessionSettings;
use greenhouse_sim::plant::{DEFAULT_MAX_HEIGHT_CM, DEFAULT_PLANT_NAME, INITIAL_HEIGHT_CM};
use greenhouse_sim::telemetry::DEFAULT_TOPIC_PREFIX;
use greenhouse_sim::DEFAULT_TICK_DAYS;

pub const DEFAULT_RANGES_FILE: &str = "config.json";
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Configuration for the simulator binary
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON file holding sensor ranges
    pub ranges_file: PathBuf,
    /// Wall-clock time between periodic ticks
    pub tick_interval: Duration,
    pub session: SessionSettings,
}

impl Config {
    /// Create a new Config instance from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a Config from any variable source; unset variables take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ranges_file = lookup("GREENHOUSE_RANGES_FILE")
            .unwrap_or_else(|| DEFAULT_RANGES_FILE.to_string())
            .into();

        let tick_interval_ms = match lookup("GREENHOUSE_TICK_INTERVAL_MS") {
            Some(raw) => parse_var("GREENHOUSE_TICK_INTERVAL_MS", &raw, |v: &u64| *v > 0)?,
            None => DEFAULT_TICK_INTERVAL_MS,
        };

        let tick_days = match lookup("GREENHOUSE_TICK_DAYS") {
            Some(raw) => parse_var("GREENHOUSE_TICK_DAYS", &raw, |v: &f64| {
                v.is_finite() && *v > 0.0
            })?,
            None => DEFAULT_TICK_DAYS,
        };

        let max_height_cm = match lookup("GREENHOUSE_MAX_HEIGHT_CM") {
            Some(raw) => parse_var("GREENHOUSE_MAX_HEIGHT_CM", &raw, |v: &f64| {
                v.is_finite() && *v >= INITIAL_HEIGHT_CM
            })?,
            None => DEFAULT_MAX_HEIGHT_CM,
        };

        let plant_name = lookup("GREENHOUSE_PLANT_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLANT_NAME.to_string());

        let topic_prefix = lookup("GREENHOUSE_TOPIC_PREFIX")
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOPIC_PREFIX.to_string());

        Ok(Config {
            ranges_file,
            tick_interval: Duration::from_millis(tick_interval_ms),
            session: SessionSettings {
                plant_name,
                max_height_cm,
                tick_days,
                topic_prefix,
            },
        })
    }
}

fn parse_var<T, P>(name: &str, raw: &str, accept: P) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    P: Fn(&T) -> bool,
{
    raw.trim()
        .parse::<T>()
        .ok()
        .filter(|v| accept(v))
        .ok_or_else(|| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.to_string(),
        })
}
