//! Per-kind YAML component registry.
//!
//! # Storage layout
//!
//! ```text
//! <registry_dir>/
//!   module.yaml   (active + inactive modules, in enumeration order)
//!   theme.yaml
//!   <kind>.yaml   (any other asset folder type)
//! ```
//!
//! A missing `<registry_dir>` means the registry is unavailable. A missing
//! per-kind file inside an existing directory means "nothing registered".
//!
//! # API pattern
//!
//! Free functions take the registry directory explicitly (`*_at`).
//! [`FileRegistry`] wraps a directory and implements [`ComponentRegistry`],
//! the read-only seam used by the publish pipeline.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::RegistryError;
use crate::types::{Component, ComponentKind, ComponentName, ComponentRecord, RegistryFile};

const REGISTRY_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// 1. Collaborator trait
// ---------------------------------------------------------------------------

/// Source of active components for a publish cycle.
pub trait ComponentRegistry: Send + Sync {
    /// All active components of `kind`, in registry order.
    ///
    /// Fails with [`RegistryError::Unavailable`] when the registry cannot be reached.
    fn list_active(&self, kind: &ComponentKind) -> Result<Vec<Component>, RegistryError>;
}

/// [`ComponentRegistry`] backed by YAML files in one directory.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    dir: PathBuf,
}

impl FileRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ComponentRegistry for FileRegistry {
    fn list_active(&self, kind: &ComponentKind) -> Result<Vec<Component>, RegistryError> {
        list_active_at(&self.dir, kind)
    }
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<dir>/<kind>.yaml`: pure, no I/O.
pub fn kind_path_at(dir: &Path, kind: &ComponentKind) -> PathBuf {
    dir.join(format!("{}.yaml", kind.as_str()))
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Load the registry file for `kind`.
///
/// Returns `RegistryError::Unavailable` if `dir` does not exist,
/// an empty [`RegistryFile`] if only the kind file is absent, and
/// `RegistryError::Parse` (with path + line context) if malformed YAML.
/// A record whose name is not a single path segment is `InvalidName`.
pub fn load_kind_at(dir: &Path, kind: &ComponentKind) -> Result<RegistryFile, RegistryError> {
    if !dir.is_dir() {
        return Err(RegistryError::Unavailable {
            path: dir.to_path_buf(),
        });
    }
    let path = kind_path_at(dir, kind);
    if !path.exists() {
        return Ok(RegistryFile {
            version: REGISTRY_VERSION,
            ..RegistryFile::default()
        });
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "registry file unreadable");
        RegistryError::Unavailable { path: path.clone() }
    })?;
    let file: RegistryFile = serde_yaml::from_str(&contents)
        .map_err(|e| RegistryError::Parse { path: path.clone(), source: e })?;
    if let Some(bad) = file.components.iter().find(|r| !r.name.is_valid()) {
        tracing::warn!(
            path = %path.display(),
            name = %bad.name,
            "invalid component name in registry"
        );
        return Err(RegistryError::InvalidName(bad.name.0.clone()));
    }
    Ok(file)
}

/// Every record of `kind`, active or not.
pub fn list_records_at(
    dir: &Path,
    kind: &ComponentKind,
) -> Result<Vec<ComponentRecord>, RegistryError> {
    Ok(load_kind_at(dir, kind)?.components)
}

/// Active components of `kind`, in file order.
pub fn list_active_at(dir: &Path, kind: &ComponentKind) -> Result<Vec<Component>, RegistryError> {
    let file = load_kind_at(dir, kind)?;
    let components: Vec<Component> = file
        .components
        .into_iter()
        .filter(|r| r.active)
        .map(|r| Component::new(kind.clone(), r.name))
        .collect();
    tracing::debug!(kind = %kind, count = components.len(), "listed active components");
    Ok(components)
}

// ---------------------------------------------------------------------------
// 4. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the registry file for `kind`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `rename`. Creates `dir` if absent.
pub fn save_kind_at(
    dir: &Path,
    kind: &ComponentKind,
    file: &RegistryFile,
) -> Result<(), RegistryError> {
    std::fs::create_dir_all(dir)?;
    let path = kind_path_at(dir, kind);
    let tmp_path = path.with_file_name(format!("{}.yaml.tmp", kind.as_str()));

    let yaml = serde_yaml::to_string(file)?;
    std::fs::write(&tmp_path, yaml)?;
    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// 5. Mutations
// ---------------------------------------------------------------------------

/// Register `<kind>/<name>` as an active component.
///
/// Initializes the registry directory on first use.
/// Idempotent: if already registered, returns the existing record unchanged.
pub fn register_at(
    dir: &Path,
    kind: &ComponentKind,
    name: ComponentName,
    title: Option<String>,
) -> Result<ComponentRecord, RegistryError> {
    if !name.is_valid() {
        return Err(RegistryError::InvalidName(name.0));
    }
    std::fs::create_dir_all(dir)?;
    let mut file = load_kind_at(dir, kind)?;
    if let Some(existing) = file.find(&name) {
        return Ok(existing.clone());
    }

    let now = Utc::now();
    let record = ComponentRecord {
        name,
        title,
        active: true,
        registered_at: now,
    };
    file.version = REGISTRY_VERSION;
    file.components.push(record.clone());
    file.updated_at = now;
    save_kind_at(dir, kind, &file)?;
    tracing::info!(kind = %kind, name = %record.name, "registered component");
    Ok(record)
}

/// Mark `<kind>/<name>` active or inactive.
pub fn set_active_at(
    dir: &Path,
    kind: &ComponentKind,
    name: &ComponentName,
    active: bool,
) -> Result<ComponentRecord, RegistryError> {
    let mut file = load_kind_at(dir, kind)?;
    let record = file
        .find_mut(name)
        .ok_or_else(|| not_found(kind, name))?;
    record.active = active;
    let updated = record.clone();
    file.updated_at = Utc::now();
    save_kind_at(dir, kind, &file)?;
    Ok(updated)
}

/// Drop `<kind>/<name>` from the registry. Published files are left alone.
pub fn unregister_at(
    dir: &Path,
    kind: &ComponentKind,
    name: &ComponentName,
) -> Result<ComponentRecord, RegistryError> {
    let mut file = load_kind_at(dir, kind)?;
    let idx = file
        .components
        .iter()
        .position(|r| &r.name == name)
        .ok_or_else(|| not_found(kind, name))?;
    let removed = file.components.remove(idx);
    file.updated_at = Utc::now();
    save_kind_at(dir, kind, &file)?;
    Ok(removed)
}

fn not_found(kind: &ComponentKind, name: &ComponentName) -> RegistryError {
    RegistryError::ComponentNotFound {
        kind: kind.to_string(),
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_dir() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    #[test]
    fn kind_path_is_correct() {
        let dir = make_dir();
        let path = kind_path_at(dir.path(), &ComponentKind::Theme);
        assert!(path.ends_with("theme.yaml"));
    }

    #[test]
    fn missing_dir_is_unavailable() {
        let dir = make_dir();
        let gone = dir.path().join("nope");
        let err = list_active_at(&gone, &ComponentKind::Module).unwrap_err();
        assert!(matches!(err, RegistryError::Unavailable { .. }));
    }

    #[test]
    fn missing_kind_file_is_empty() {
        let dir = make_dir();
        let list = list_active_at(dir.path(), &ComponentKind::Module).expect("list");
        assert!(list.is_empty());
    }

    #[test]
    fn register_keeps_order_and_is_idempotent() {
        let dir = make_dir();
        let kind = ComponentKind::Module;
        register_at(dir.path(), &kind, "shop".into(), None).unwrap();
        register_at(dir.path(), &kind, "blog".into(), Some("Blog".into())).unwrap();
        let again = register_at(dir.path(), &kind, "shop".into(), Some("ignored".into())).unwrap();
        assert_eq!(again.title, None);

        let names: Vec<String> = list_active_at(dir.path(), &kind)
            .unwrap()
            .into_iter()
            .map(|c| c.name.0)
            .collect();
        assert_eq!(names, vec!["shop", "blog"]);
    }

    #[test]
    fn inactive_components_are_not_listed() {
        let dir = make_dir();
        let kind = ComponentKind::Theme;
        register_at(dir.path(), &kind, "default".into(), None).unwrap();
        register_at(dir.path(), &kind, "dark".into(), None).unwrap();
        set_active_at(dir.path(), &kind, &"dark".into(), false).unwrap();

        let active = list_active_at(dir.path(), &kind).unwrap();
        assert_eq!(active, vec![Component::theme("default")]);
        assert_eq!(list_records_at(dir.path(), &kind).unwrap().len(), 2);
    }

    #[test]
    fn set_active_unknown_component_is_not_found() {
        let dir = make_dir();
        let err = set_active_at(dir.path(), &ComponentKind::Module, &"ghost".into(), true)
            .unwrap_err();
        assert!(matches!(err, RegistryError::ComponentNotFound { .. }));
    }

    #[test]
    fn unregister_removes_record() {
        let dir = make_dir();
        let kind = ComponentKind::Module;
        register_at(dir.path(), &kind, "blog".into(), None).unwrap();
        unregister_at(dir.path(), &kind, &"blog".into()).unwrap();
        assert!(list_records_at(dir.path(), &kind).unwrap().is_empty());
    }

    #[test]
    fn register_rejects_path_like_names() {
        let dir = make_dir();
        let err = register_at(dir.path(), &ComponentKind::Module, "../x".into(), None)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName(_)));
    }

    #[test]
    fn hand_edited_path_like_name_is_rejected_on_load() {
        let dir = make_dir();
        let kind = ComponentKind::Module;
        register_at(dir.path(), &kind, "blog".into(), None).unwrap();
        let path = kind_path_at(dir.path(), &kind);
        let yaml = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, yaml.replace("name: blog", "name: '..'")).unwrap();

        let err = list_active_at(dir.path(), &kind).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName(ref n) if n == ".."), "got: {err}");
    }

    #[test]
    fn save_cleans_up_tmp() {
        let dir = make_dir();
        register_at(dir.path(), &ComponentKind::Module, "blog".into(), None).unwrap();
        assert!(!dir.path().join("module.yaml.tmp").exists());
        assert!(dir.path().join("module.yaml").exists());
    }

    #[test]
    fn file_registry_delegates_to_directory() {
        let dir = make_dir();
        register_at(dir.path(), &ComponentKind::Module, "blog".into(), None).unwrap();
        let registry = FileRegistry::new(dir.path());
        let list = registry.list_active(&ComponentKind::Module).unwrap();
        assert_eq!(list, vec![Component::module("blog")]);
    }
}
