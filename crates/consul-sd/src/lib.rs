pub mod config;
pub use config::{ConsulSourceConfig, OVERRIDE_FIELDS, SERVICE};
