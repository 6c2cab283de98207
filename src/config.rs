// config.rs - TOML configuration, loaded once at startup

use crate::error::ConfigError;
use crate::launchpad::DEFAULT_DEVICE_NAME;
use crate::life::{LifeRules, Neighborhood};
use crate::player::DEFAULT_PERIOD;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub device: DeviceConfig,
    pub life: LifeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// Endpoint name prefix to bind.
    pub name: String,
    /// Name this program registers with the MIDI system.
    pub client_name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DEVICE_NAME.to_string(),
            client_name: "launchpad-life".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    pub max_state: u8,
    pub min_alive: u8,
    pub max_alive: u8,
    pub period_ms: u64,
    pub neighborhood: Neighborhood,
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        let rules = LifeRules::default();
        Self {
            max_state: rules.max_state,
            min_alive: rules.min_alive,
            max_alive: rules.max_alive,
            period_ms: DEFAULT_PERIOD.as_millis() as u64,
            neighborhood: rules.neighborhood,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn rules(&self) -> LifeRules {
        LifeRules {
            max_state: self.max_state,
            min_alive: self.min_alive,
            max_alive: self.max_alive,
            neighborhood: self.neighborhood,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.name.is_empty() {
            return Err(ConfigError::Invalid("device name must not be empty".into()));
        }
        if self.life.period_ms == 0 {
            return Err(ConfigError::Invalid("period_ms must be positive".into()));
        }
        self.life.rules().validate()
    }
}
