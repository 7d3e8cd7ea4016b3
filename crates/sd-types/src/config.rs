use consul_sd::ConsulSourceConfig;
use serde::{Deserialize, Serialize};

use crate::{
    registry::{Registry, RegistryError},
    source::DiscoverySource,
    static_sd::StaticSourceConfig,
};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub consul: Vec<ConsulSourceConfig>,

    #[serde(default, rename = "static")]
    pub static_targets: Vec<StaticSourceConfig>,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_as_true")]
    pub colors: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            colors: default_as_true(),
        }
    }
}

fn default_as_true() -> bool {
    true
}

/// How log lines are written
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines, optionally colored
    #[default]
    Plaintext,
    /// One JSON object per line
    Json,
}

const ENV_PREFIX: &str = "SDCTL";

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl Config {
    /// Reads configuration from a TOML file, given its path. Environment
    /// variables prefixed with `SDCTL_` can override whatever is set in the
    /// config file, e.g. `SDCTL_LOG__FORMAT=json`.
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::new(config_path, config::FileFormat::Toml))
            .add_source(environment())
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Every configured source, consul ones first, in file order.
    pub fn sources(&self) -> impl Iterator<Item = DiscoverySource> + '_ {
        self.consul
            .iter()
            .cloned()
            .map(DiscoverySource::from)
            .chain(self.static_targets.iter().cloned().map(DiscoverySource::from))
    }

    pub fn registry(&self) -> Result<Registry, ConfigError> {
        Ok(Registry::new(self.sources())?)
    }
}
