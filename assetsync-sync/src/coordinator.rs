//! Publish coordinator: remove-then-publish per component, best-effort per batch.
//!
//! Every asset-service call runs on the blocking pool under
//! [`CoordinatorOptions::call_timeout`]. A timed-out or panicked call is a
//! failure of that phase only; the component's other phase and the rest of
//! the batch still run. The abandoned call keeps its blocking thread until
//! the service returns.
//!
//! With `max_concurrency > 1` components are synced as concurrent tasks
//! bounded by a semaphore. Outcomes are merged after join in enumeration
//! order, so the batch result does not depend on scheduling.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use assetsync_core::{BatchResult, Component, Phase, PublishOutcome, SiteConfig};

use crate::service::{AssetService, PhaseResult};

/// Tuning for [`Coordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorOptions {
    /// Bound for each remove/publish call.
    pub call_timeout: Duration,
    /// Components synced at once by [`Coordinator::sync_all`]; 1 means sequential.
    pub max_concurrency: usize,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
            max_concurrency: 1,
        }
    }
}

impl CoordinatorOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            call_timeout: config.call_timeout(),
            max_concurrency: config.max_concurrency.max(1),
        }
    }
}

/// Drives an [`AssetService`] over one or many components.
#[derive(Clone)]
pub struct Coordinator {
    service: Arc<dyn AssetService>,
    options: CoordinatorOptions,
}

impl Coordinator {
    pub fn new(service: Arc<dyn AssetService>, options: CoordinatorOptions) -> Self {
        Self { service, options }
    }

    pub fn options(&self) -> CoordinatorOptions {
        self.options
    }

    /// Remove then publish one component. Never fails; failures are data.
    ///
    /// The publish is attempted even when the remove failed, since it may
    /// overwrite whatever was left behind.
    pub async fn sync_one(&self, component: &Component) -> PublishOutcome {
        let remove = self.run_phase(Phase::Remove, component).await;
        if let Err(errors) = &remove {
            tracing::warn!(component = %component, errors = errors.len(), "remove failed");
        }
        let publish = self.run_phase(Phase::Publish, component).await;
        if let Err(errors) = &publish {
            tracing::warn!(component = %component, errors = errors.len(), "publish failed");
        }
        let outcome = PublishOutcome::from_phases(component.clone(), remove, publish);
        if outcome.succeeded() {
            tracing::info!(component = %component, "assets published");
        }
        outcome
    }

    /// Sync every component; one failure never stops the rest.
    pub async fn sync_all(&self, components: &[Component]) -> BatchResult {
        tracing::info!(
            components = components.len(),
            max_concurrency = self.options.max_concurrency,
            "syncing components"
        );
        let outcomes = if self.options.max_concurrency <= 1 {
            let mut outcomes = Vec::with_capacity(components.len());
            for component in components {
                outcomes.push(self.sync_one(component).await);
            }
            outcomes
        } else {
            self.sync_concurrently(components).await
        };
        BatchResult::from_outcomes(outcomes)
    }

    async fn sync_concurrently(&self, components: &[Component]) -> Vec<PublishOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency));
        let mut tasks = Vec::with_capacity(components.len());

        for component in components {
            let semaphore = Arc::clone(&semaphore);
            let coordinator = self.clone();
            let target = component.clone();
            let task = tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return PublishOutcome::from_phases(
                        target,
                        Err(vec!["sync aborted: worker pool closed".to_string()]),
                        Err(vec!["sync aborted: worker pool closed".to_string()]),
                    );
                };
                coordinator.sync_one(&target).await
            });
            tasks.push((component.clone(), task));
        }

        // Single accumulation point: join in enumeration order.
        let mut outcomes = Vec::with_capacity(tasks.len());
        for (component, task) in tasks {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let reason = format!("sync task failed: {e}");
                    tracing::error!(component = %component, error = %e, "sync task failed");
                    PublishOutcome::from_phases(
                        component,
                        Err(vec![reason.clone()]),
                        Err(vec![reason]),
                    )
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn run_phase(&self, phase: Phase, component: &Component) -> PhaseResult {
        let service = Arc::clone(&self.service);
        let target = component.clone();
        let call = tokio::task::spawn_blocking(move || match phase {
            Phase::Remove => service.remove(&target),
            Phase::Publish => service.publish(&target),
        });

        match tokio::time::timeout(self.options.call_timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!(
                    component = %component,
                    phase = %phase,
                    error = %e,
                    "asset call panicked"
                );
                Err(vec![format!("{phase} of {component} failed: {e}")])
            }
            Err(_) => {
                tracing::warn!(
                    component = %component,
                    phase = %phase,
                    timeout_ms = self.options.call_timeout.as_millis() as u64,
                    "asset call timed out"
                );
                Err(vec![format!(
                    "{phase} of {component} timed out after {:?}",
                    self.options.call_timeout
                )])
            }
        }
    }
}
