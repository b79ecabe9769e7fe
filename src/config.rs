//! Runtime configuration for opening a [`crate::tracker::Tracker`].

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "TASKBOARD_DATA_DIR";
/// Environment variable toggling the default seed.
pub const LOAD_SEED_ENV: &str = "TASKBOARD_LOAD_SEED";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something other than a recognised flag.
    #[error("{name} must be a boolean flag, got {value:?}")]
    InvalidFlag {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The data directory variable was set but empty.
    #[error("{0} must not be empty when set")]
    EmptyPath(&'static str),
}

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory holding one JSON document per storage key. `None` keeps
    /// everything in memory.
    pub data_dir: Option<Utf8PathBuf>,
    /// Whether to load the bundled seed into an uninitialized store.
    pub load_seed: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            load_seed: true,
        }
    }
}

impl TrackerConfig {
    /// In-memory configuration without seed data.
    #[must_use]
    pub const fn empty_in_memory() -> Self {
        Self {
            data_dir: None,
            load_seed: false,
        }
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<Utf8PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Sets whether the seed is loaded.
    #[must_use]
    pub const fn with_seed(mut self, load_seed: bool) -> Self {
        self.load_seed = load_seed;
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// | Env Var               | Default   |
    /// |-----------------------|-----------|
    /// | `TASKBOARD_DATA_DIR`  | in memory |
    /// | `TASKBOARD_LOAD_SEED` | `true`    |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = lookup(DATA_DIR_ENV) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::EmptyPath(DATA_DIR_ENV));
            }
            config.data_dir = Some(Utf8PathBuf::from(trimmed));
        }
        if let Some(raw) = lookup(LOAD_SEED_ENV) {
            config.load_seed = parse_flag(LOAD_SEED_ENV, &raw)?;
        }
        Ok(config)
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_owned(),
        }),
    }
}
