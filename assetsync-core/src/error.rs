//! Error types for assetsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse registry at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The registry directory is missing or unreadable. Fatal for enumeration.
    #[error("component registry unavailable at {path}")]
    Unavailable { path: PathBuf },

    /// No record for `<kind>/<name>` in the registry.
    #[error("component {kind}/{name} is not registered")]
    ComponentNotFound { kind: String, name: String },

    /// A component kind that cannot be used as a path segment.
    #[error("invalid component kind '{0}'")]
    InvalidKind(String),

    /// A component name that cannot be used as a path segment.
    #[error("invalid component name '{0}'")]
    InvalidName(String),
}

/// Errors raised while loading `assetsync.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
