pub mod config;
pub mod registry;
pub mod source;
pub mod static_sd;

pub use consul_sd;
pub use sd_api_types as api;
