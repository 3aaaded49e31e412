//! Asset service: the collaborator that removes and publishes one component.
//!
//! ## File-system layout used by [`FsAssetService`]
//!
//! ```text
//! <source_dir>/<kind>/<name>/asset/**   (canonical assets)
//! <public_dir>/<kind>/<name>/**         (published copy)
//! ```
//!
//! Both operations are best-effort: every file is attempted and every failure
//! is reported, so one locked file does not hide the state of the rest.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use assetsync_core::{Component, SiteConfig};

use crate::error::{io_err, SyncError};

/// `Ok(())` or the ordered list of reasons the phase failed.
pub type PhaseResult = Result<(), Vec<String>>;

/// Removes and publishes the assets of a single component.
///
/// Implementations must be callable from worker threads; the coordinator runs
/// each call on the blocking pool under a timeout.
pub trait AssetService: Send + Sync {
    /// Delete the component's previously published files.
    fn remove(&self, component: &Component) -> PhaseResult;

    /// Copy the component's canonical assets into the public location.
    fn publish(&self, component: &Component) -> PhaseResult;
}

/// [`AssetService`] that copies between two directory trees.
#[derive(Debug, Clone)]
pub struct FsAssetService {
    source_dir: PathBuf,
    public_dir: PathBuf,
}

impl FsAssetService {
    pub fn new(source_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.source_dir, &config.public_dir)
    }

    /// `<source_dir>/<kind>/<name>/asset`
    pub fn source_path(&self, component: &Component) -> PathBuf {
        self.source_dir
            .join(component.kind.as_str())
            .join(&component.name.0)
            .join("asset")
    }

    /// `<public_dir>/<kind>/<name>`
    pub fn target_path(&self, component: &Component) -> PathBuf {
        self.public_dir
            .join(component.kind.as_str())
            .join(&component.name.0)
    }
}

impl AssetService for FsAssetService {
    fn remove(&self, component: &Component) -> PhaseResult {
        check_path(component)?;
        let target = self.target_path(component);
        let Ok(meta) = fs::symlink_metadata(&target) else {
            tracing::debug!(component = %component, "nothing published, skipping remove");
            return Ok(());
        };
        if meta.file_type().is_symlink() {
            // Drop the link only; its destination is outside the public tree.
            return fs::remove_file(&target).map_err(|e| vec![io_err(&target, e).to_string()]);
        }
        into_phase_result(remove_tree(&target))
    }

    fn publish(&self, component: &Component) -> PhaseResult {
        check_path(component)?;
        let source = self.source_path(component);
        if !source.is_dir() {
            tracing::debug!(
                component = %component,
                source = %source.display(),
                "component has no asset folder"
            );
            return Ok(());
        }
        into_phase_result(copy_tree(&source, &self.target_path(component)))
    }
}

/// Kind and name are joined onto the public tree, so both must be plain segments.
fn check_path(component: &Component) -> PhaseResult {
    if component.is_valid() {
        return Ok(());
    }
    tracing::warn!(component = %component, "refusing invalid component path");
    Err(vec![format!("invalid component path '{component}'")])
}

fn into_phase_result(errors: Vec<String>) -> PhaseResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

/// Delete `root` bottom-up. Returns one message per entry that could not be removed.
fn remove_tree(root: &Path) -> Vec<String> {
    let mut errors = Vec::new();
    for entry in WalkDir::new(root).follow_root_links(false).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(walk_err(root, e));
                continue;
            }
        };
        let path = entry.path();
        let result = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        if let Err(e) = result {
            errors.push(io_err(path, e).to_string());
        }
    }
    errors
}

// ---------------------------------------------------------------------------
// publish
// ---------------------------------------------------------------------------

/// Mirror `source` into `target`. Returns one message per entry that failed.
fn copy_tree(source: &Path, target: &Path) -> Vec<String> {
    let mut errors = Vec::new();
    let mut copied = 0usize;
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(walk_err(source, e));
                continue;
            }
        };
        let Ok(rel) = entry.path().strip_prefix(source) else {
            continue;
        };
        let dest = target.join(rel);
        let result = if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| io_err(&dest, e))
        } else {
            copy_file(entry.path(), &dest).map(|()| copied += 1)
        };
        if let Err(e) = result {
            errors.push(e.to_string());
        }
    }
    tracing::debug!(target = %target.display(), files = copied, "copied asset tree");
    errors
}

/// Copy one file through a `<dest>.assetsync.tmp` sibling and rename into place.
fn copy_file(src: &Path, dest: &Path) -> Result<(), SyncError> {
    let tmp = PathBuf::from(format!("{}.assetsync.tmp", dest.display()));
    copy_file_with_tmp(src, dest, &tmp)
}

fn copy_file_with_tmp(src: &Path, dest: &Path, tmp: &Path) -> Result<(), SyncError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Err(e) = fs::copy(src, tmp) {
        let _ = fs::remove_file(tmp);
        return Err(io_err(src, e));
    }
    if let Err(e) = fs::rename(tmp, dest) {
        let _ = fs::remove_file(tmp);
        return Err(io_err(dest, e));
    }
    Ok(())
}

fn walk_err(root: &Path, e: walkdir::Error) -> String {
    let path = e.path().unwrap_or(root).to_path_buf();
    match e.into_io_error() {
        Some(source) => io_err(path, source).to_string(),
        None => format!("filesystem loop at {}", path.display()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Site {
        _root: TempDir,
        service: FsAssetService,
        source: PathBuf,
        public: PathBuf,
    }

    fn site() -> Site {
        let root = TempDir::new().unwrap();
        let source = root.path().join("usr");
        let public = root.path().join("www").join("asset");
        Site {
            service: FsAssetService::new(&source, &public),
            source,
            public,
            _root: root,
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn paths_follow_kind_and_name() {
        let s = site();
        let blog = Component::module("blog");
        assert!(s.service.source_path(&blog).ends_with("usr/module/blog/asset"));
        assert!(s.service.target_path(&blog).ends_with("www/asset/module/blog"));
    }

    #[test]
    fn publish_copies_nested_tree() {
        let s = site();
        write(&s.source.join("module/blog/asset/css/app.css"), "body{}");
        write(&s.source.join("module/blog/asset/js/lib/x.js"), "1;");

        s.service.publish(&Component::module("blog")).expect("publish");

        let css = s.public.join("module/blog/css/app.css");
        assert_eq!(fs::read_to_string(css).unwrap(), "body{}");
        assert!(s.public.join("module/blog/js/lib/x.js").exists());
        assert!(!s.public.join("module/blog/css/app.css.assetsync.tmp").exists());
    }

    #[test]
    fn publish_without_asset_folder_succeeds() {
        let s = site();
        s.service.publish(&Component::theme("bare")).expect("publish");
        assert!(!s.public.join("theme/bare").exists());
    }

    #[test]
    fn publish_reports_every_failed_file() {
        let s = site();
        write(&s.source.join("module/blog/asset/a.css"), "a");
        write(&s.source.join("module/blog/asset/b.css"), "b");
        // A regular file where the public tree should be makes every write fail.
        write(&s.public.join("module/blog"), "in the way");

        let errors = s.service.publish(&Component::module("blog")).unwrap_err();
        assert!(errors.len() >= 2, "got: {errors:?}");
        assert!(errors.iter().all(|e| e.contains("I/O error at")));
    }

    #[test]
    fn remove_deletes_published_tree() {
        let s = site();
        write(&s.public.join("module/blog/css/app.css"), "old");
        write(&s.public.join("module/blog/renamed.js"), "old");
        write(&s.public.join("module/shop/keep.css"), "keep");

        s.service.remove(&Component::module("blog")).expect("remove");

        assert!(!s.public.join("module/blog").exists());
        assert!(s.public.join("module/shop/keep.css").exists());
    }

    #[test]
    fn remove_of_unpublished_component_succeeds() {
        let s = site();
        s.service.remove(&Component::module("ghost")).expect("remove");
    }

    #[test]
    fn remove_then_publish_drops_stale_files() {
        let s = site();
        let blog = Component::module("blog");
        write(&s.source.join("module/blog/asset/new.css"), "new");
        write(&s.public.join("module/blog/old.css"), "stale");

        s.service.remove(&blog).expect("remove");
        s.service.publish(&blog).expect("publish");

        assert!(s.public.join("module/blog/new.css").exists());
        assert!(!s.public.join("module/blog/old.css").exists());
    }

    #[test]
    fn dot_dot_name_touches_nothing() {
        let s = site();
        write(&s.public.join("module/shop/a.css"), "shop");
        write(&s.public.join("theme/default/site.css"), "theme");
        let escape = Component::module("..");

        let removed = s.service.remove(&escape).unwrap_err();
        let published = s.service.publish(&escape).unwrap_err();

        assert!(removed[0].contains("invalid component path"), "got: {removed:?}");
        assert!(published[0].contains("invalid component path"), "got: {published:?}");
        assert!(s.public.join("module/shop/a.css").exists());
        assert!(s.public.join("theme/default/site.css").exists());
    }

    #[cfg(unix)]
    #[test]
    fn remove_of_symlinked_target_keeps_link_destination() {
        let s = site();
        let outside = s._root.path().join("elsewhere");
        write(&outside.join("keep.css"), "keep");
        fs::create_dir_all(s.public.join("module")).unwrap();
        std::os::unix::fs::symlink(&outside, s.public.join("module/blog")).unwrap();

        s.service.remove(&Component::module("blog")).expect("remove");

        assert!(fs::symlink_metadata(s.public.join("module/blog")).is_err());
        assert!(outside.join("keep.css").exists());
    }

    #[test]
    fn failed_copy_cleans_up_tmp() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("missing.css");
        let dest = root.path().join("out").join("missing.css");
        let tmp = root.path().join("out").join("missing.css.assetsync.tmp");

        let err = copy_file_with_tmp(&missing, &dest, &tmp).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
        assert!(!tmp.exists());
        assert!(!dest.exists());
    }
}
