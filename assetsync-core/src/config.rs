//! Site configuration loaded from `<root>/assetsync.yaml`.
//!
//! Every recognised option is a field of [`SiteConfig`]; unknown keys are a
//! parse error. A missing file yields the defaults. Relative paths are
//! resolved against the site root by [`load_at`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Config file name, looked up in the site root.
pub const CONFIG_FILE: &str = "assetsync.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Component sources: `<source_dir>/<kind>/<name>/asset`.
    pub source_dir: PathBuf,
    /// Published assets: `<public_dir>/<kind>/<name>`.
    pub public_dir: PathBuf,
    /// Derived files wiped after a full refresh.
    pub compiled_dir: PathBuf,
    /// Per-kind registry YAML files.
    pub registry_dir: PathBuf,
    /// Optional message template overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Upper bound for a single remove or publish call.
    pub call_timeout_secs: u64,
    /// Components synced at once during a refresh; 1 means sequential.
    pub max_concurrency: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("usr"),
            public_dir: PathBuf::from("www/asset"),
            compiled_dir: PathBuf::from("www/asset/compiled"),
            registry_dir: PathBuf::from("var/registry"),
            template_dir: None,
            call_timeout_secs: 30,
            max_concurrency: 1,
        }
    }
}

impl SiteConfig {
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.call_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "call_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrency must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Join every relative path onto `root`.
    pub fn resolved(mut self, root: &Path) -> Self {
        let join = |p: &Path| if p.is_absolute() { p.to_path_buf() } else { root.join(p) };
        self.source_dir = join(&self.source_dir);
        self.public_dir = join(&self.public_dir);
        self.compiled_dir = join(&self.compiled_dir);
        self.registry_dir = join(&self.registry_dir);
        self.template_dir = self.template_dir.as_deref().map(join);
        self
    }
}

/// `<root>/assetsync.yaml`: pure, no I/O.
pub fn config_path_at(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Load, validate, and resolve the site config under `root`.
pub fn load_at(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = config_path_at(root);
    let config = if path.exists() {
        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        serde_yaml::from_str::<SiteConfig>(&contents)
            .map_err(|e| ConfigError::Parse { path, source: e })?
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config.resolved(root))
}
