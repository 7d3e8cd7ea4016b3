use std::fmt;

use camino::Utf8PathBuf;
use sd_api_types::{
    ConsulSdConfig, Discoverer, OverrideField, Redacted, ScrapeConfig, TlsConfig, ValidationError,
};
use serde::{Deserialize, Serialize};
use serde_with::{formats::PreferMany, serde_as, OneOrMany};
use tracing::debug;

pub const SERVICE: &str = "consul";

const DEFAULT_ADDRESS: &str = "127.0.0.1:8500";
const DEFAULT_TAG_SEPARATOR: &str = ",";
const DEFAULT_SCHEME: &str = "http";

/// Keys accepted through the override channel.
pub const OVERRIDE_FIELDS: &[OverrideField] = &[
    OverrideField::new("enabled"),
    OverrideField::new("name"),
    OverrideField::new("address"),
    OverrideField::redacted("token"),
    OverrideField::new("datacenter"),
    OverrideField::new("tag-separator"),
    OverrideField::new("scheme"),
    OverrideField::new("username"),
    OverrideField::redacted("password"),
    OverrideField::new("services"),
    OverrideField::new("ssl-ca"),
    OverrideField::new("ssl-cert"),
    OverrideField::new("ssl-key"),
    OverrideField::new("ssl-server-name"),
    OverrideField::new("insecure-skip-verify"),
];

/// HashiCorp Consul service discovery source
///
/// Fields missing from the input keep the values from [`Default`]; fields
/// present but empty are patched by
/// [`Discoverer::apply_conditional_defaults`].
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConsulSourceConfig {
    pub enabled: bool,
    pub name: String,

    /// Consul server address, `host:port`
    pub address: String,
    pub token: String,
    pub datacenter: String,

    /// Separator used to join Consul tags into a single label value
    pub tag_separator: String,

    /// `http` or `https`
    pub scheme: String,
    pub username: String,
    pub password: String,

    /// Services to watch, all of them when empty
    #[serde_as(deserialize_as = "OneOrMany<_, PreferMany>")]
    pub services: Vec<String>,

    /// CA (Certificate Authority) file
    pub ssl_ca: Utf8PathBuf,
    /// Certificate file
    pub ssl_cert: Utf8PathBuf,
    /// Private key file
    pub ssl_key: Utf8PathBuf,
    /// Server name used to verify the hostname of the targets
    pub ssl_server_name: String,
    /// Use TLS but skip chain and host verification
    pub insecure_skip_verify: bool,
}

impl ConsulSourceConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ConsulSourceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            name: String::new(),
            address: DEFAULT_ADDRESS.into(),
            token: String::new(),
            datacenter: String::new(),
            tag_separator: DEFAULT_TAG_SEPARATOR.into(),
            scheme: DEFAULT_SCHEME.into(),
            username: String::new(),
            password: String::new(),
            services: vec![],
            ssl_ca: Utf8PathBuf::new(),
            ssl_cert: Utf8PathBuf::new(),
            ssl_key: Utf8PathBuf::new(),
            ssl_server_name: String::new(),
            insecure_skip_verify: false,
        }
    }
}

impl fmt::Debug for ConsulSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConsulSourceConfig {}",
            Redacted::new(self, OVERRIDE_FIELDS)
        )
    }
}

impl Discoverer for ConsulSourceConfig {
    fn service(&self) -> &'static str {
        SERVICE
    }

    fn id(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn apply_conditional_defaults(&mut self) {
        if self.tag_separator.is_empty() {
            self.tag_separator = DEFAULT_TAG_SEPARATOR.into();
        }
        if self.scheme.is_empty() {
            self.scheme = DEFAULT_SCHEME.into();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::NameRequired(SERVICE));
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::AddressRequired(SERVICE));
        }
        Ok(())
    }

    fn prom(&self, conf: &mut ScrapeConfig) {
        debug!(
            "writing consul discovery '{}' ({}) into scrape job '{}'",
            self.name, self.address, conf.job_name
        );

        conf.service_discovery.consul_sd_configs = vec![ConsulSdConfig {
            server: self.address.clone(),
            token: self.token.as_str().into(),
            datacenter: self.datacenter.clone(),
            tag_separator: self.tag_separator.clone(),
            scheme: self.scheme.clone(),
            username: self.username.clone(),
            password: self.password.as_str().into(),
            services: self.services.clone(),
            tls_config: TlsConfig {
                ca_file: self.ssl_ca.clone(),
                cert_file: self.ssl_cert.clone(),
                key_file: self.ssl_key.clone(),
                server_name: self.ssl_server_name.clone(),
                insecure_skip_verify: self.insecure_skip_verify,
            },
        }];
    }

    fn override_fields(&self) -> &'static [OverrideField] {
        OVERRIDE_FIELDS
    }
}
