//! Shared state for one shell session.

use std::path::PathBuf;

use crate::cli::handoff::ResultSlot;
use crate::config::{Config, ConfigManager};
use crate::errors::AdvisorError;

/// Configuration plus the latest accepted result, threaded through every
/// shell flow.
pub struct CliState {
    manager: ConfigManager,
    pub config: Config,
    pub slot: ResultSlot,
}

impl CliState {
    /// Loads configuration from the platform config directory.
    pub fn load() -> Result<Self, AdvisorError> {
        Self::from_manager(ConfigManager::new()?)
    }

    /// Loads configuration rooted at `base`, used by tests to stay inside a
    /// temporary directory.
    pub fn load_from(base: PathBuf) -> Result<Self, AdvisorError> {
        Self::from_manager(ConfigManager::with_base_dir(base)?)
    }

    fn from_manager(manager: ConfigManager) -> Result<Self, AdvisorError> {
        let config = manager.load()?;
        Ok(Self {
            manager,
            config,
            slot: ResultSlot::new(),
        })
    }

    /// Persists the current configuration.
    pub fn save_config(&self) -> Result<(), AdvisorError> {
        self.manager.save(&self.config)
    }

    pub fn config_path(&self) -> &std::path::Path {
        self.manager.path()
    }
}
