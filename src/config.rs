/// Runtime configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_TICK_RATE;

const MAX_TICK_RATE: u32 = 1000;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Fixed RNG seed for a reproducible run
    pub seed: Option<u64>,
    /// Where tracing output goes; the terminal itself is busy drawing
    pub log_file: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
            log_file: env::temp_dir().join("side_scroller.log"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tick_rate = match lookup("SIDE_SCROLLER_TPS") {
            Some(raw) => {
                let tps: u32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("SIDE_SCROLLER_TPS", raw.clone()))?;
                if tps == 0 || tps > MAX_TICK_RATE {
                    return Err(ConfigError::TickRateOutOfRange(tps));
                }
                tps
            }
            None => defaults.tick_rate,
        };

        let seed = lookup("SIDE_SCROLLER_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid("SIDE_SCROLLER_SEED", raw.clone()))
            })
            .transpose()?;

        Ok(Self {
            tick_rate,
            seed,
            log_file: lookup("SIDE_SCROLLER_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} has an invalid value: {1:?}")]
    Invalid(&'static str, String),

    #[error("tick rate {0} is outside 1..=1000")]
    TickRateOutOfRange(u32),
}
