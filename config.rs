//! Configuration management with environment variable support.
//!
//! This module provides [`ShredConfig`] for loading and validating shred
//! settings from JSON files and environment variables.
//!
//! ## Environment Variables
//!
//! - `TATTER_PASSES`: Override the number of overwrite passes
//! - `TATTER_SYNC`: Override flushing to storage before removal (`true`/`false`)
//! - `TATTER_CONFIG`: Override config file path

use crate::engine::PASSES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable names for configuration overrides
pub const ENV_PASSES: &str = "TATTER_PASSES";
pub const ENV_SYNC: &str = "TATTER_SYNC";
pub const ENV_CONFIG_PATH: &str = "TATTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShredConfig {
    pub passes: usize,
    pub sync: bool,
}

impl Default for ShredConfig {
    fn default() -> Self {
        Self {
            passes: PASSES,
            sync: true,
        }
    }
}

impl ShredConfig {
    /// Load config from file path
    pub fn load(path: &str) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config with environment variable overrides
    /// Priority: ENV vars > config file > defaults
    pub fn load_with_env(path: Option<&str>) -> Result<Self> {
        let config = Self::resolve(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge defaults, config file and environment without validating,
    /// so callers can layer their own overrides before [`validate`](Self::validate).
    ///
    /// An explicit `path` must exist. A path taken from `TATTER_CONFIG`
    /// falls back to defaults when missing.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::read_file(p)?,
            None => match env::var(ENV_CONFIG_PATH) {
                Ok(p) if Path::new(&p).exists() => Self::read_file(&p)?,
                Ok(p) => {
                    warn!(path = %p, "{} points to a missing file, using defaults", ENV_CONFIG_PATH);
                    ShredConfig::default()
                }
                Err(_) => {
                    debug!("using default configuration");
                    ShredConfig::default()
                }
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Replace values with ones given on the command line.
    pub fn with_overrides(mut self, passes: Option<usize>, sync: Option<bool>) -> Self {
        if let Some(passes) = passes {
            self.passes = passes;
        }
        if let Some(sync) = sync {
            self.sync = sync;
        }
        self
    }

    fn read_file(path: &str) -> Result<Self> {
        info!(path, "loading config from file");
        let s =
            fs::read_to_string(path).with_context(|| format!("reading config file {}", path))?;
        serde_json::from_str(&s).with_context(|| format!("parsing config file {}", path))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_PASSES) {
            match raw.trim().parse::<usize>() {
                Ok(passes) => {
                    debug!(passes, "overriding passes from environment");
                    self.passes = passes;
                }
                Err(_) => warn!(value = %raw, "ignoring invalid {}", ENV_PASSES),
            }
        }

        if let Some(raw) = lookup(ENV_SYNC) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.sync = true,
                "0" | "false" | "no" => self.sync = false,
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_SYNC),
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.passes < PASSES {
            anyhow::bail!("passes must be at least {}, got {}", PASSES, self.passes);
        }

        if !self.sync {
            warn!("sync disabled - overwritten data may still sit in the page cache when the file is removed");
        }

        Ok(())
    }

    /// Create a new config with explicit values
    pub fn new(passes: usize, sync: bool) -> Self {
        Self { passes, sync }
    }
}
