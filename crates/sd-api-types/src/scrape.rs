use std::{collections::BTreeMap, fmt};

use camino::Utf8PathBuf;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SECRET_PLACEHOLDER: &str = "<secret>";

/// A scrape job: where and how a metrics pipeline collects targets.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub job_name: String,
    #[serde(flatten)]
    pub service_discovery: ServiceDiscoveryConfig,
}

impl ScrapeConfig {
    pub fn new<S: Into<String>>(job_name: S) -> Self {
        Self {
            job_name: job_name.into(),
            service_discovery: ServiceDiscoveryConfig::default(),
        }
    }

    /// Copy for display, with every set secret replaced by a placeholder.
    /// Not meant to be handed to a discovery client.
    pub fn redacted(&self) -> Self {
        let mut conf = self.clone();
        for block in conf.service_discovery.consul_sd_configs.iter_mut() {
            block.token = block.token.redacted();
            block.password = block.password.redacted();
        }
        conf
    }
}

/// Per-kind discovery blocks of a scrape job
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDiscoveryConfig {
    #[serde(default)]
    pub consul_sd_configs: Vec<ConsulSdConfig>,
    #[serde(default)]
    pub static_configs: Vec<TargetGroup>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsulSdConfig {
    pub server: String,
    #[serde(default)]
    pub token: Secret,
    #[serde(default)]
    pub datacenter: String,
    pub tag_separator: String,
    pub scheme: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: Secret,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub tls_config: TlsConfig,
}

/// TLS settings handed to the discovery client as-is
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// CA (Certificate Authority) file
    #[serde(default)]
    pub ca_file: Utf8PathBuf,
    /// Certificate file
    #[serde(default)]
    pub cert_file: Utf8PathBuf,
    /// Private key file
    #[serde(default)]
    pub key_file: Utf8PathBuf,
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

/// A fixed list of targets sharing one label set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    pub targets: Vec<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub source: String,
}

/// String whose value never shows up in `Debug` output.
///
/// Serialization keeps the real value so a written scrape job stays usable;
/// use [`ScrapeConfig::redacted`] before printing one.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn masked(&self) -> &'static str {
        if self.0.is_empty() {
            ""
        } else {
            SECRET_PLACEHOLDER
        }
    }

    fn redacted(&self) -> Self {
        Self(self.masked().to_owned())
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.masked(), f)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}
