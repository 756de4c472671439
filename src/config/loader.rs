//! Configuration loading utilities
//!
//! Provides helper functions for loading configuration from various sources
//! with proper error handling and validation.

use crate::{Result, config::Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration loader with multiple source support
#[derive(Debug)]
pub struct ConfigLoader {
    /// File consulted when no explicit path is given
    default_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create new configuration loader using the platform config directory
    pub fn new() -> Self {
        Self {
            default_path: default_config_path(),
        }
    }

    /// Create a loader that never falls back to a config file
    pub fn without_default_file() -> Self {
        Self { default_path: None }
    }

    /// Load configuration with precedence order:
    /// 1. Environment variables (highest priority)
    /// 2. Configuration file
    /// 3. Default values (lowest priority)
    ///
    /// Command line overrides are applied by the caller afterwards.
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        self.load_with(config_file, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`] with a custom environment lookup
    pub fn load_with<F>(&self, config_file: Option<&Path>, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        match config_file {
            Some(path) if path.exists() => {
                info!("Loading configuration from file: {:?}", path);
                settings = Settings::from_file(path)?;
            }
            Some(path) => {
                warn!("Configuration file not found: {:?}, using defaults", path);
            }
            None => {
                if let Some(path) = self.default_path.as_deref().filter(|p| p.exists()) {
                    debug!("Loading configuration from default file: {:?}", path);
                    settings = Settings::from_file(path)?;
                }
            }
        }

        // Override with environment variables
        debug!("Applying environment variable overrides");
        settings = settings.merge_with(lookup)?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:?}", settings);

        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// `{config_dir}/keysword/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keysword").join("config.toml"))
}
