//! Outcomes of remove/publish attempts and the messages rendered from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Component;

/// The two steps of a component sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Remove,
    Publish,
}

impl Phase {
    /// Capitalised form used in report headers (`Remove: module-blog`).
    pub fn heading(&self) -> &'static str {
        match self {
            Phase::Remove => "Remove",
            Phase::Publish => "Publish",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Remove => write!(f, "remove"),
            Phase::Publish => write!(f, "publish"),
        }
    }
}

/// Result of one remove + publish attempt for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOutcome {
    pub component: Component,
    pub remove_succeeded: bool,
    #[serde(default)]
    pub remove_errors: Vec<String>,
    pub publish_succeeded: bool,
    #[serde(default)]
    pub publish_errors: Vec<String>,
}

impl PublishOutcome {
    /// Build an outcome from the two phase results.
    pub fn from_phases(
        component: Component,
        remove: Result<(), Vec<String>>,
        publish: Result<(), Vec<String>>,
    ) -> Self {
        let (remove_succeeded, remove_errors) = split(remove);
        let (publish_succeeded, publish_errors) = split(publish);
        Self {
            component,
            remove_succeeded,
            remove_errors,
            publish_succeeded,
            publish_errors,
        }
    }

    /// Combined success: remove ∧ publish.
    pub fn succeeded(&self) -> bool {
        self.remove_succeeded && self.publish_succeeded
    }

    /// Failed phases with their errors, remove first.
    pub fn failures(&self) -> Vec<FailedOperation> {
        let mut out = Vec::new();
        if !self.remove_succeeded {
            out.push(FailedOperation {
                component: self.component.clone(),
                phase: Phase::Remove,
                errors: self.remove_errors.clone(),
            });
        }
        if !self.publish_succeeded {
            out.push(FailedOperation {
                component: self.component.clone(),
                phase: Phase::Publish,
                errors: self.publish_errors.clone(),
            });
        }
        out
    }
}

fn split(result: Result<(), Vec<String>>) -> (bool, Vec<String>) {
    match result {
        Ok(()) => (true, Vec::new()),
        Err(errors) => (false, errors),
    }
}

/// One failed phase of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedOperation {
    pub component: Component,
    pub phase: Phase,
    pub errors: Vec<String>,
}

/// Aggregation over every outcome of a batch.
///
/// Only constructible through [`BatchResult::from_outcomes`], which keeps
/// `overall_success == failed_operations.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    overall_success: bool,
    failed_operations: Vec<FailedOperation>,
    outcomes: Vec<PublishOutcome>,
}

impl BatchResult {
    pub fn from_outcomes(outcomes: Vec<PublishOutcome>) -> Self {
        let failed_operations: Vec<FailedOperation> =
            outcomes.iter().flat_map(PublishOutcome::failures).collect();
        Self {
            overall_success: failed_operations.is_empty(),
            failed_operations,
            outcomes,
        }
    }

    pub fn overall_success(&self) -> bool {
        self.overall_success
    }

    pub fn failed_operations(&self) -> &[FailedOperation] {
        &self.failed_operations
    }

    pub fn outcomes(&self) -> &[PublishOutcome] {
        &self.outcomes
    }

    /// All errors reported by the given phase, in operation order.
    pub fn errors_for(&self, phase: Phase) -> Vec<String> {
        self.failed_operations
            .iter()
            .filter(|op| op.phase == phase)
            .flat_map(|op| op.errors.iter().cloned())
            .collect()
    }
}

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Success,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Human-facing rendering of a publish result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub title: String,
    #[serde(default)]
    pub detail: Vec<String>,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
