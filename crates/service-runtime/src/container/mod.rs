//! # Service Container
//!
//! Runtime configuration and the container holding every service instance.

pub mod config;
pub mod services;

pub use config::{BusConfig, ConfigError, ReconciliationPolicy, RuntimeConfig};
pub use services::ServiceContainer;
