//! Error types for cni-install-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while resolving installer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (used when printing the resolved config).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An environment override held a value that cannot be interpreted.
    #[error("invalid value '{value}' for {name}")]
    InvalidEnv { name: &'static str, value: String },
}
