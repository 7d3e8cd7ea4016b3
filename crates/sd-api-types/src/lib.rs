pub mod discoverer;
pub mod overrides;
pub mod scrape;

pub use discoverer::{Discoverer, ValidationError};
pub use overrides::{Element, OverrideError, OverrideField, Redacted};
pub use scrape::{ConsulSdConfig, ScrapeConfig, Secret, TargetGroup, TlsConfig};
