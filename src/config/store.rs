//! Configuration storage contract
//!
//! The run core only ever consumes [`ClickConfig`] values. Where they live is
//! up to the host; [`MemoryConfigStore`] is the reference implementation and
//! the one used on desktop.

use super::ClickConfig;
use crate::error::{ClickerError, Result};

/// Source and sink of saved configurations plus a "current" pointer
pub trait ConfigStore {
    /// Insert or replace a configuration by id, stamping its update time
    fn save(&mut self, config: ClickConfig);

    /// Look up a configuration by id
    fn get(&self, id: &str) -> Option<ClickConfig>;

    /// All saved configurations in insertion order
    fn all(&self) -> Vec<ClickConfig>;

    /// Remove a configuration; clears the current pointer if it named `id`
    fn delete(&mut self, id: &str);

    /// Point "current" at an existing configuration
    fn set_current(&mut self, id: &str) -> Result<()>;

    /// The configuration a run should start with
    ///
    /// Falls back to the first saved configuration, then to the default.
    fn current(&self) -> ClickConfig;
}

/// In-memory [`ConfigStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    configs: Vec<ClickConfig>,
    current_id: Option<String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the explicitly selected configuration, if any
    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn save(&mut self, mut config: ClickConfig) {
        config.touch();

        match self.configs.iter_mut().find(|c| c.id == config.id) {
            Some(existing) => *existing = config,
            None => self.configs.push(config),
        }
    }

    fn get(&self, id: &str) -> Option<ClickConfig> {
        self.configs.iter().find(|c| c.id == id).cloned()
    }

    fn all(&self) -> Vec<ClickConfig> {
        if self.configs.is_empty() {
            vec![ClickConfig::default()]
        } else {
            self.configs.clone()
        }
    }

    fn delete(&mut self, id: &str) {
        self.configs.retain(|c| c.id != id);

        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
    }

    fn set_current(&mut self, id: &str) -> Result<()> {
        if self.configs.iter().any(|c| c.id == id) {
            self.current_id = Some(id.to_string());
            Ok(())
        } else {
            Err(ClickerError::ConfigNotFound(id.to_string()))
        }
    }

    fn current(&self) -> ClickConfig {
        self.current_id
            .as_deref()
            .and_then(|id| self.get(id))
            .or_else(|| self.configs.first().cloned())
            .unwrap_or_default()
    }
}
