//! Installer configuration.
//!
//! # Resolution order
//!
//! ```text
//! defaults  <  YAML file (--config)  <  environment  <  CLI flags
//! ```
//!
//! The CLI owns the last layer; this module handles the first three.
//!
//! # API pattern
//!
//! The environment layer has two forms:
//! - `apply_env_with(lookup)`: explicit variable lookup; used in tests
//! - `apply_env()`: reads the process environment, delegates to `_with`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BinaryName, SyncRequest};

pub const DEFAULT_SOURCE_DIR: &str = "/opt/cni/bin";
pub const DEFAULT_TARGET_DIR: &str = "/host/opt/cni/bin";

pub const ENV_SOURCE_DIR: &str = "CNI_BIN_SOURCE_DIR";
pub const ENV_TARGET_DIRS: &str = "CNI_BIN_TARGET_DIRS";
pub const ENV_UPDATE_BINARIES: &str = "UPDATE_CNI_BINARIES";
pub const ENV_SKIP_BINARIES: &str = "SKIP_CNI_BINARIES";
pub const ENV_BINARIES_PREFIX: &str = "CNI_BINARIES_PREFIX";

/// Resolved installer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Directory holding the binaries shipped in the installer image.
    pub cni_bin_source_dir: PathBuf,
    /// Host directories the binaries are installed into, in order.
    pub cni_bin_target_dirs: Vec<PathBuf>,
    /// Replace binaries that are already installed.
    pub update_cni_binaries: bool,
    /// Binary names that are never installed.
    pub skip_cni_binaries: Vec<BinaryName>,
    /// Prefix applied to every installed file name.
    pub cni_binaries_prefix: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            cni_bin_source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            cni_bin_target_dirs: vec![PathBuf::from(DEFAULT_TARGET_DIR)],
            update_cni_binaries: true,
            skip_cni_binaries: Vec::new(),
            cni_binaries_prefix: String::new(),
        }
    }
}

impl InstallConfig {
    /// Load a YAML config file. Fields missing from the file keep their defaults.
    pub fn load_at(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, overlaid with `path` when one is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_at(path),
            None => Ok(Self::default()),
        }
    }

    /// Overlay environment variables from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Overlay environment variables resolved through `lookup`.
    ///
    /// Unset variables leave the current value alone. List variables are
    /// comma-separated; blank items are dropped.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_SOURCE_DIR) {
            self.cni_bin_source_dir = PathBuf::from(dir);
        }
        if let Some(dirs) = lookup(ENV_TARGET_DIRS) {
            self.cni_bin_target_dirs = split_list(&dirs).map(PathBuf::from).collect();
        }
        if let Some(value) = lookup(ENV_UPDATE_BINARIES) {
            self.update_cni_binaries =
                parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                    name: ENV_UPDATE_BINARIES,
                    value,
                })?;
        }
        if let Some(names) = lookup(ENV_SKIP_BINARIES) {
            self.skip_cni_binaries = split_list(&names).map(BinaryName::from).collect();
        }
        if let Some(prefix) = lookup(ENV_BINARIES_PREFIX) {
            self.cni_binaries_prefix = prefix;
        }
        Ok(())
    }

    /// Build the request handed to the synchronizer.
    pub fn to_request(&self) -> SyncRequest {
        SyncRequest::new(
            self.cni_bin_source_dir.clone(),
            self.cni_bin_target_dirs.clone(),
        )
        .with_update(self.update_cni_binaries)
        .with_skip(self.skip_cni_binaries.iter().cloned())
        .with_prefix(self.cni_binaries_prefix.clone())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
