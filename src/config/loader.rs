use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    /// Read, parse and validate a YAML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        config
            .criteria
            .validate()
            .with_context(|| format!("Invalid criteria in config: {}", path.display()))?;

        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

/// Read the config once. A missing file is only an error when `required`
/// (the path was given explicitly); otherwise it yields `Ok(None)`.
pub fn read_config<P: AsRef<Path>>(path: P, required: bool) -> Result<Option<Config>> {
    let path = path.as_ref();
    if !required && !path.exists() {
        return Ok(None);
    }
    Config::from_file(path).map(Some)
}

/// Settle the outcome of `read_config`, logging what was used
pub fn config_or_default<P: AsRef<Path>>(loaded: Result<Option<Config>>, path: P) -> Config {
    let path = path.as_ref();
    match loaded {
        Ok(Some(config)) => {
            log::info!("Loaded configuration from: {}", path.display());
            config
        }
        Ok(None) => {
            log::debug!(
                "No configuration at '{}', using default criteria",
                path.display()
            );
            Config::default()
        }
        Err(e) => {
            log::warn!("Failed to load config ({:#}), using defaults", e);
            Config::default()
        }
    }
}
