//! Core shared library for the rulekit crates.
//!
//! Holds the pieces every other crate leans on: the common error types,
//! configuration loading and the tracing bootstrap.

pub mod config;
pub mod errors;
pub mod logging;

pub use config::{ClientConfig, Environment};
pub use errors::{ConfigError, CoreError, Result as CoreResult};
