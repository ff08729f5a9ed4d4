//! CNI installer core library: domain types, installer configuration, errors.
//!
//! Public API surface:
//! - [`types`]: newtypes and the [`SyncRequest`] handed to the synchronizer
//! - [`config`]: [`InstallConfig`] layering (defaults, YAML file, environment)
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::InstallConfig;
pub use error::ConfigError;
pub use types::{BinaryName, SyncRequest};
