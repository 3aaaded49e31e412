//! Compiled-cache invalidation.
//!
//! Deletes every regular file below the compiled asset directory after a full
//! refresh. Symlinks are unlinked too, never followed. Directories are left in
//! place. A file that cannot be deleted is recorded and skipped; it never stops
//! the remaining deletions.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

/// A compiled file (or subtree) that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// What [`invalidate_compiled`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvalidationReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<CacheFailure>,
}

impl InvalidationReport {
    /// `true` when some compiled files survived.
    pub fn is_partial_failure(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Deletes one compiled file.
pub trait FileRemover: Send + Sync {
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileRemover`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl FileRemover for FsRemover {
    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Delete all regular files under `dir`. A missing `dir` is an empty cache.
pub fn invalidate_compiled(dir: &Path) -> InvalidationReport {
    invalidate_compiled_with(dir, &FsRemover)
}

/// [`invalidate_compiled`] with a custom remover.
pub fn invalidate_compiled_with(dir: &Path, remover: &dyn FileRemover) -> InvalidationReport {
    let mut report = InvalidationReport::default();
    if !dir.exists() {
        tracing::debug!(dir = %dir.display(), "compiled cache absent");
        return report;
    }

    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                report.failures.push(CacheFailure {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let file_type = entry.file_type();
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }
        match remover.remove_file(entry.path()) {
            Ok(()) => report.removed.push(entry.into_path()),
            Err(e) => report.failures.push(CacheFailure {
                path: entry.into_path(),
                reason: e.to_string(),
            }),
        }
    }

    if report.is_partial_failure() {
        tracing::warn!(
            dir = %dir.display(),
            failed = report.failures.len(),
            "some compiled asset files could not be deleted"
        );
    }
    tracing::info!(
        dir = %dir.display(),
        removed = report.removed.len(),
        "compiled cache invalidated"
    );
    report
}
