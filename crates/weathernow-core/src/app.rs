use anyhow::Result;
use std::sync::Arc;

use crate::config::ValidationResult;
use crate::error::ConfigError;
use crate::store::{FileStore, PreferenceStore};
use crate::Config;

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    preferences: Arc<dyn PreferenceStore>,
}

impl App {
    /// Create a new application instance from the on-disk configuration
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Create an application instance around an already loaded configuration
    pub fn with_config(config: Config) -> Self {
        let preferences: Arc<dyn PreferenceStore> =
            Arc::new(FileStore::new(config.preferences_path()));
        Self::with_parts(config, preferences)
    }

    /// Create an application instance with an explicit preference store
    pub fn with_parts(config: Config, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            config: Arc::new(config),
            preferences,
        }
    }

    /// Validate configuration and report warnings.
    pub fn initialize(&mut self) -> Result<ValidationResult> {
        let validation = self.config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        tracing::info!(
            "Application initialized (config dir: {})",
            self.config.config_dir.display()
        );
        Ok(validation)
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the preference store
    pub fn preferences(&self) -> Arc<dyn PreferenceStore> {
        self.preferences.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_initialize_accepts_default_config() {
        let mut app = App::with_parts(Config::default(), Arc::new(MemoryStore::new()));
        let validation = app.initialize().unwrap();
        assert!(validation.is_valid());
    }

    #[test]
    fn test_initialize_rejects_invalid_config() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        let mut app = App::with_parts(config, Arc::new(MemoryStore::new()));
        let err = app.initialize().unwrap_err();
        assert!(err.to_string().contains("api.timeout_secs"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));
    }
}
