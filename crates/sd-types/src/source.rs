use consul_sd::ConsulSourceConfig;
use sd_api_types::{
    overrides::apply_overrides, Discoverer, Element, OverrideError, OverrideField, ScrapeConfig,
    ValidationError,
};
use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};

use crate::static_sd::StaticSourceConfig;

/// Kinds of discovery sources known to this build
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    Consul,
    Static,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverySource {
    Consul(ConsulSourceConfig),
    Static(StaticSourceConfig),
}

macro_rules! dispatch {
    ($self:expr, $conf:ident => $body:expr) => {
        match $self {
            DiscoverySource::Consul($conf) => $body,
            DiscoverySource::Static($conf) => $body,
        }
    };
}

impl DiscoverySource {
    pub fn kind(&self) -> SourceKind {
        match self {
            DiscoverySource::Consul(_) => SourceKind::Consul,
            DiscoverySource::Static(_) => SourceKind::Static,
        }
    }

    /// Redacted view of this source's options.
    pub fn element(&self) -> Result<Element, OverrideError> {
        let fields = self.override_fields();
        dispatch!(self, conf => Element::new(conf.id(), conf, fields))
    }

    /// Copy of this source with `set` written over its options. The result
    /// has neither defaults applied nor been validated.
    pub fn with_overrides(&self, set: &Map<String, Value>) -> Result<Self, OverrideError> {
        Ok(match self {
            DiscoverySource::Consul(conf) => {
                DiscoverySource::Consul(apply_overrides(conf, consul_sd::OVERRIDE_FIELDS, set)?)
            }
            DiscoverySource::Static(conf) => DiscoverySource::Static(apply_overrides(
                conf,
                crate::static_sd::OVERRIDE_FIELDS,
                set,
            )?),
        })
    }
}

impl Discoverer for DiscoverySource {
    fn service(&self) -> &'static str {
        dispatch!(self, conf => conf.service())
    }

    fn id(&self) -> &str {
        dispatch!(self, conf => conf.id())
    }

    fn enabled(&self) -> bool {
        dispatch!(self, conf => conf.enabled())
    }

    fn apply_conditional_defaults(&mut self) {
        dispatch!(self, conf => conf.apply_conditional_defaults())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        dispatch!(self, conf => conf.validate())
    }

    fn prom(&self, conf: &mut ScrapeConfig) {
        dispatch!(self, source => source.prom(conf))
    }

    fn override_fields(&self) -> &'static [OverrideField] {
        dispatch!(self, conf => conf.override_fields())
    }
}

impl From<ConsulSourceConfig> for DiscoverySource {
    fn from(conf: ConsulSourceConfig) -> Self {
        DiscoverySource::Consul(conf)
    }
}

impl From<StaticSourceConfig> for DiscoverySource {
    fn from(conf: StaticSourceConfig) -> Self {
        DiscoverySource::Static(conf)
    }
}
