//! assetsync core library: domain types, registry persistence, site config, errors.
//!
//! - [`types`]: components and their kinds
//! - [`outcome`]: per-component outcomes, batch results, user-facing messages
//! - [`registry`]: YAML component registry (load / save / register)
//! - [`config`]: `assetsync.yaml` site layout
//! - [`error`]: [`RegistryError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod outcome;
pub mod registry;
pub mod types;

pub use config::SiteConfig;
pub use error::{ConfigError, RegistryError};
pub use outcome::{BatchResult, FailedOperation, Message, Phase, PublishOutcome, Severity};
pub use registry::{ComponentRegistry, FileRegistry};
pub use types::{Component, ComponentKind, ComponentName, ComponentRecord, RegistryFile};
