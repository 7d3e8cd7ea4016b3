use std::collections::BTreeMap;

use sd_api_types::{
    overrides::is_redacted, Discoverer, OverrideError, ScrapeConfig, ValidationError,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::source::{DiscoverySource, SourceKind};

/// Validated discovery sources, keyed by kind and id.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    sources: BTreeMap<(SourceKind, String), DiscoverySource>,
}

impl Registry {
    pub fn new<I>(sources: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = DiscoverySource>,
    {
        let mut registry = Self::default();
        for source in sources {
            registry.insert(source)?;
        }
        Ok(registry)
    }

    /// Applies conditional defaults to `source`, validates it and adds it.
    pub fn insert(&mut self, mut source: DiscoverySource) -> Result<(), RegistryError> {
        source.apply_conditional_defaults();
        source.validate()?;

        let kind = source.kind();
        let key = (kind, source.id().to_owned());
        if self.sources.contains_key(&key) {
            return Err(RegistryError::Duplicate { kind, id: key.1 });
        }

        debug!(
            "registered {kind} discovery '{}' (enabled: {})",
            key.1,
            source.enabled()
        );
        self.sources.insert(key, source);
        Ok(())
    }

    pub fn get(&self, kind: SourceKind, id: &str) -> Option<&DiscoverySource> {
        self.sources.get(&(kind, id.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscoverySource> {
        self.sources.values()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &DiscoverySource> {
        self.iter().filter(|source| source.enabled())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Scrape job named `{kind}-{id}` discovering through the given source.
    pub fn scrape_config(&self, kind: SourceKind, id: &str) -> Option<ScrapeConfig> {
        let source = self.get(kind, id)?;
        let mut conf = ScrapeConfig::new(format!("{kind}-{id}"));
        source.prom(&mut conf);
        Some(conf)
    }

    /// Writes `set` over the options of an existing source. The stored source
    /// is only replaced once the result has passed validation.
    pub fn set(
        &mut self,
        kind: SourceKind,
        id: &str,
        set: &Map<String, Value>,
    ) -> Result<&DiscoverySource, RegistryError> {
        let slot = self
            .sources
            .get_mut(&(kind, id.to_owned()))
            .ok_or_else(|| RegistryError::NotFound {
                kind,
                id: id.to_owned(),
            })?;

        let mut updated = slot.with_overrides(set)?;
        updated.apply_conditional_defaults();
        updated.validate()?;

        if updated.id() != id {
            return Err(RegistryError::IdentityChange {
                kind,
                from: id.to_owned(),
                to: updated.id().to_owned(),
            });
        }

        let fields = updated.override_fields();
        for (key, value) in set {
            if is_redacted(fields, key) {
                info!("{kind} discovery '{id}': overrode {key} (redacted)");
            } else {
                info!("{kind} discovery '{id}': overrode {key} = {value}");
            }
        }

        *slot = updated;
        Ok(slot)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("duplicate {kind} discovery '{id}'")]
    Duplicate { kind: SourceKind, id: String },
    #[error("no {kind} discovery named '{id}'")]
    NotFound { kind: SourceKind, id: String },
    #[error("{kind} discovery '{from}' cannot be renamed to '{to}' by an override")]
    IdentityChange {
        kind: SourceKind,
        from: String,
        to: String,
    },
    #[error(transparent)]
    Override(#[from] OverrideError),
}
