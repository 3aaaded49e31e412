//! Shared publish pipeline entrypoint used by the CLI.
//!
//! ```text
//! publish(kind, name):  coordinator.sync_one → report
//! refresh_all():        enumerate → coordinator.sync_all → invalidate compiled → report
//! ```
//!
//! Callers always get a [`PipelineReport`]: a status flag plus a rendered
//! message. Only enumeration failure aborts, and it does so before any asset
//! call is made.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use assetsync_core::{
    BatchResult, Component, ComponentKind, ComponentName, ComponentRegistry, FileRegistry,
    Message, PublishOutcome, SiteConfig,
};

use crate::coordinator::{Coordinator, CoordinatorOptions};
use crate::enumerate;
use crate::invalidate::{invalidate_compiled_with, FileRemover, FsRemover, InvalidationReport};
use crate::report;
use crate::service::{AssetService, FsAssetService};

/// Scope for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Resync every active module and theme, then wipe the compiled cache.
    All,
    /// Resync one component; the compiled cache is left alone.
    Component(Component),
}

/// Result handed back to the caller of a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub status: bool,
    pub message: Message,
    /// Per-component detail of a single publish.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<PublishOutcome>,
    /// Per-component detail of a refresh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchResult>,
    /// Compiled-cache invalidation, refresh only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<InvalidationReport>,
    /// Non-fatal warning (undeletable compiled files).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<Message>,
}

impl PipelineReport {
    fn fatal(message: Message) -> Self {
        Self {
            status: false,
            message,
            outcome: None,
            batch: None,
            cache: None,
            warning: None,
        }
    }
}

/// Registry + coordinator + compiled cache location.
pub struct Pipeline {
    registry: Arc<dyn ComponentRegistry>,
    coordinator: Coordinator,
    compiled_dir: PathBuf,
    remover: Arc<dyn FileRemover>,
}

impl Pipeline {
    pub fn new(
        registry: Arc<dyn ComponentRegistry>,
        service: Arc<dyn AssetService>,
        options: CoordinatorOptions,
        compiled_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            coordinator: Coordinator::new(service, options),
            compiled_dir: compiled_dir.into(),
            remover: Arc::new(FsRemover),
        }
    }

    /// Delete compiled files through `remover` instead of `std::fs`.
    pub fn with_file_remover(mut self, remover: Arc<dyn FileRemover>) -> Self {
        self.remover = remover;
        self
    }

    /// File registry + file-system asset service, laid out by `config`.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            Arc::new(FileRegistry::new(&config.registry_dir)),
            Arc::new(FsAssetService::from_config(config)),
            CoordinatorOptions::from_config(config),
            &config.compiled_dir,
        )
    }

    pub fn compiled_dir(&self) -> &Path {
        &self.compiled_dir
    }

    /// Run the pipeline for a scope.
    pub async fn run(&self, scope: SyncScope) -> PipelineReport {
        match scope {
            SyncScope::All => self.refresh_all().await,
            SyncScope::Component(component) => self.publish_component(&component).await,
        }
    }

    /// Resync a single component by kind and name.
    pub async fn publish(
        &self,
        kind: ComponentKind,
        name: impl Into<ComponentName>,
    ) -> PipelineReport {
        self.publish_component(&Component::new(kind, name)).await
    }

    async fn publish_component(&self, component: &Component) -> PipelineReport {
        tracing::info!(component = %component, "publishing component");
        let outcome = self.coordinator.sync_one(component).await;
        PipelineReport {
            status: outcome.succeeded(),
            message: report::outcome_message(&outcome),
            outcome: Some(outcome),
            batch: None,
            cache: None,
            warning: None,
        }
    }

    /// Enumerate, resync everything, and invalidate the compiled cache.
    pub async fn refresh_all(&self) -> PipelineReport {
        let components = match enumerate::list_refreshable(self.registry.as_ref()) {
            Ok(components) => components,
            Err(e) => return PipelineReport::fatal(report::fatal_message(&e)),
        };

        let batch = self.coordinator.sync_all(&components).await;

        let compiled_dir = self.compiled_dir.clone();
        let remover = Arc::clone(&self.remover);
        let invalidation = tokio::task::spawn_blocking(move || {
            invalidate_compiled_with(&compiled_dir, remover.as_ref())
        });
        let cache = match invalidation.await {
            Ok(cache) => cache,
            Err(e) => {
                tracing::error!(error = %e, "compiled cache invalidation task failed");
                InvalidationReport::default()
            }
        };

        tracing::info!(
            components = components.len(),
            failed = batch.failed_operations().len(),
            compiled_removed = cache.removed.len(),
            "refresh finished"
        );
        PipelineReport {
            status: batch.overall_success(),
            message: report::batch_message(&batch),
            warning: report::cache_warning(&cache),
            outcome: None,
            batch: Some(batch),
            cache: Some(cache),
        }
    }
}
