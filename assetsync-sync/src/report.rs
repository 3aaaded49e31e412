//! Result reporter: turns outcomes into user-facing [`Message`]s.
//!
//! Failure titles follow a fixed precedence: remove and publish errors →
//! publish errors only → remove errors only → generic failure.

use assetsync_core::{BatchResult, Message, Phase, PublishOutcome, Severity};

use crate::error::SyncError;
use crate::invalidate::InvalidationReport;

pub const TITLE_PUBLISHED: &str = "Asset files are published correctly.";
pub const TITLE_ALL_PUBLISHED: &str = "All assets published successfully.";
pub const TITLE_REMOVE_AND_PUBLISH_FAILED: &str =
    "Some old files were not able to remove and asset publish was not completed.";
pub const TITLE_PUBLISH_FAILED: &str =
    "Asset publish was not completed, please check and copy manually.";
pub const TITLE_REMOVE_FAILED: &str =
    "Asset publish was not completed because some old files were not able to remove.";
pub const TITLE_NOT_PUBLISHED: &str =
    "Asset files are not published correctly, please copy asset files manually.";
pub const TITLE_REGISTRY_UNAVAILABLE: &str =
    "Component registry is unavailable, nothing was published.";
pub const TITLE_CACHE_PARTIAL: &str = "Some compiled asset files could not be deleted.";

/// Build a message from a title and an error list.
///
/// A non-empty list forces `Error` severity unless the caller asked for `Info`
/// (informational listings keep their severity).
pub fn render_message(
    title: impl Into<String>,
    errors: Vec<String>,
    severity: Severity,
) -> Message {
    let severity = match (errors.is_empty(), severity) {
        (true, s) => s,
        (false, Severity::Info) => Severity::Info,
        (false, _) => Severity::Error,
    };
    Message {
        title: title.into(),
        detail: errors,
        severity,
    }
}

/// Title for a failed sync given the collected remove and publish errors.
pub fn failure_title(remove_errors: &[String], publish_errors: &[String]) -> &'static str {
    match (remove_errors.is_empty(), publish_errors.is_empty()) {
        (false, false) => TITLE_REMOVE_AND_PUBLISH_FAILED,
        (true, false) => TITLE_PUBLISH_FAILED,
        (false, true) => TITLE_REMOVE_FAILED,
        (true, true) => TITLE_NOT_PUBLISHED,
    }
}

/// Message for a single-component publish. Detail is remove errors then publish errors.
pub fn outcome_message(outcome: &PublishOutcome) -> Message {
    if outcome.succeeded() {
        return render_message(TITLE_PUBLISHED, vec![], Severity::Success);
    }
    let title = failure_title(&outcome.remove_errors, &outcome.publish_errors);
    let detail = outcome
        .remove_errors
        .iter()
        .chain(&outcome.publish_errors)
        .cloned()
        .collect();
    render_message(title, detail, Severity::Error)
}

/// Message for a full refresh. Each failed operation contributes a
/// `Publish: module-shop` header followed by its errors.
pub fn batch_message(batch: &BatchResult) -> Message {
    if batch.overall_success() {
        return render_message(TITLE_ALL_PUBLISHED, vec![], Severity::Success);
    }
    let title = failure_title(
        &batch.errors_for(Phase::Remove),
        &batch.errors_for(Phase::Publish),
    );
    let mut detail = Vec::new();
    for op in batch.failed_operations() {
        detail.push(format!("{}: {}", op.phase.heading(), op.component.label()));
        detail.extend(op.errors.iter().cloned());
    }
    render_message(title, detail, Severity::Error)
}

/// Message for an operation aborted before any asset call.
pub fn fatal_message(err: &SyncError) -> Message {
    let title = match err {
        SyncError::Registry(_) => TITLE_REGISTRY_UNAVAILABLE,
        SyncError::Io { .. } => TITLE_NOT_PUBLISHED,
    };
    render_message(title, vec![err.to_string()], Severity::Error)
}

/// Informational warning listing compiled files that survived invalidation.
pub fn cache_warning(report: &InvalidationReport) -> Option<Message> {
    if !report.is_partial_failure() {
        return None;
    }
    let lines = report
        .failures
        .iter()
        .map(|f| format!("{}: {}", f.path.display(), f.reason))
        .collect();
    Some(render_message(TITLE_CACHE_PARTIAL, lines, Severity::Info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetsync_core::Component;
    use rstest::rstest;

    fn errs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_errors_keep_caller_severity() {
        let msg = render_message("ok", vec![], Severity::Success);
        assert_eq!(msg.severity, Severity::Success);
        assert!(msg.detail.is_empty());
    }

    #[rstest]
    #[case(Severity::Success, Severity::Error)]
    #[case(Severity::Error, Severity::Error)]
    #[case(Severity::Info, Severity::Info)]
    fn errors_force_failure_unless_info(#[case] given: Severity, #[case] expected: Severity) {
        let msg = render_message("t", errs(&["x"]), given);
        assert_eq!(msg.severity, expected);
        assert_eq!(msg.detail, errs(&["x"]));
    }

    #[rstest]
    #[case(&["r"], &["p"], TITLE_REMOVE_AND_PUBLISH_FAILED)]
    #[case(&[], &["p"], TITLE_PUBLISH_FAILED)]
    #[case(&["r"], &[], TITLE_REMOVE_FAILED)]
    #[case(&[], &[], TITLE_NOT_PUBLISHED)]
    fn failure_title_precedence(
        #[case] remove: &[&str],
        #[case] publish: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(failure_title(&errs(remove), &errs(publish)), expected);
    }

    #[test]
    fn outcome_message_concatenates_remove_then_publish() {
        let outcome = PublishOutcome::from_phases(
            Component::module("blog"),
            Err(errs(&["locked"])),
            Err(errs(&["disk full"])),
        );
        let msg = outcome_message(&outcome);
        assert_eq!(msg.title, TITLE_REMOVE_AND_PUBLISH_FAILED);
        assert_eq!(msg.detail, errs(&["locked", "disk full"]));
        assert_eq!(msg.severity, Severity::Error);
    }

    #[test]
    fn silent_failure_uses_generic_title() {
        let outcome =
            PublishOutcome::from_phases(Component::module("blog"), Ok(()), Err(vec![]));
        let msg = outcome_message(&outcome);
        assert_eq!(msg.title, TITLE_NOT_PUBLISHED);
        assert!(msg.detail.is_empty());
        assert_eq!(msg.severity, Severity::Error);
    }

    #[test]
    fn batch_message_groups_errors_under_headers() {
        let batch = BatchResult::from_outcomes(vec![
            PublishOutcome::from_phases(Component::module("blog"), Ok(()), Ok(())),
            PublishOutcome::from_phases(Component::theme("dark"), Err(errs(&["busy"])), Ok(())),
        ]);
        let msg = batch_message(&batch);
        assert_eq!(msg.title, TITLE_REMOVE_FAILED);
        assert_eq!(msg.detail, errs(&["Remove: theme-dark", "busy"]));
    }

    #[test]
    fn cache_warning_only_on_partial_failure() {
        assert!(cache_warning(&InvalidationReport::default()).is_none());
        let report = InvalidationReport {
            removed: vec![],
            failures: vec![crate::invalidate::CacheFailure {
                path: "compiled/app.css".into(),
                reason: "busy".into(),
            }],
        };
        let msg = cache_warning(&report).expect("warning");
        assert_eq!(msg.severity, Severity::Info);
        assert_eq!(msg.detail, errs(&["compiled/app.css: busy"]));
    }
}
