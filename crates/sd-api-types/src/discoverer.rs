use crate::{overrides::OverrideField, scrape::ScrapeConfig};

/// Capabilities shared by every discovery-source kind.
///
/// A source is defaulted, validated once, and from then on only read: the
/// registry catalogs it by `(service(), id())` and asks it to fill in a
/// [`ScrapeConfig`].
pub trait Discoverer {
    /// Kind of discovery source, e.g. `"consul"`.
    fn service(&self) -> &'static str;

    /// Unique key of this source among sources of the same kind.
    fn id(&self) -> &str;

    fn enabled(&self) -> bool;

    /// Fills in defaults for fields a loader left empty.
    fn apply_conditional_defaults(&mut self);

    fn validate(&self) -> Result<(), ValidationError>;

    /// Writes this source's discovery block into `conf`, replacing any block
    /// of the same kind already there.
    fn prom(&self, conf: &mut ScrapeConfig);

    /// Keys settable through the override channel.
    fn override_fields(&self) -> &'static [OverrideField];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} discovery must be given a name")]
    NameRequired(&'static str),
    #[error("{0} discovery requires a server address")]
    AddressRequired(&'static str),
}
