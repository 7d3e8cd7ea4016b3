use std::collections::BTreeMap;

use sd_api_types::{Discoverer, OverrideField, ScrapeConfig, TargetGroup, ValidationError};
use serde::{Deserialize, Serialize};
use serde_with::{formats::PreferMany, serde_as, OneOrMany};
use tracing::debug;

pub const SERVICE: &str = "static";

pub const OVERRIDE_FIELDS: &[OverrideField] = &[
    OverrideField::new("enabled"),
    OverrideField::new("id"),
    OverrideField::new("targets"),
    OverrideField::new("labels"),
];

/// A fixed list of scrape targets
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StaticSourceConfig {
    pub enabled: bool,
    pub id: String,
    /// `host:port` of each target
    #[serde_as(deserialize_as = "OneOrMany<_, PreferMany>")]
    pub targets: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

impl Discoverer for StaticSourceConfig {
    fn service(&self) -> &'static str {
        SERVICE
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn apply_conditional_defaults(&mut self) {}

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_empty() {
            return Err(ValidationError::NameRequired(SERVICE));
        }
        Ok(())
    }

    fn prom(&self, conf: &mut ScrapeConfig) {
        debug!(
            "writing {} static targets from '{}' into scrape job '{}'",
            self.targets.len(),
            self.id,
            conf.job_name
        );

        conf.service_discovery.static_configs = vec![TargetGroup {
            targets: self.targets.clone(),
            labels: self.labels.clone(),
            source: self.id.clone(),
        }];
    }

    fn override_fields(&self) -> &'static [OverrideField] {
        OVERRIDE_FIELDS
    }
}
