//! Scenario 4: The backend fails a rejection.
//!
//! Walk-through:
//!   1. Open the reject dialog on approval 1004 and confirm with a blank
//!      comment → warning toast, nothing sent
//!   2. Type "missing drawings"; the backend is primed to answer 503
//!   3. Confirm → error toast with the server's detail
//!   4. The dialog is closed and the form reset even though nothing changed
//!      server-side, and no refresh was issued
//!
//! Step 4 is the current close-on-error behavior. The user has to reopen the
//! dialog and retype the comment to retry.

use std::sync::Arc;

use ecnflow_contracts::{
    approval::{ActionKind, ApprovalStatus},
    error::EcnflowResult,
    ids::InstanceId,
    page::{ListQuery, ResourceKind},
};
use ecnflow_core::{ActionDialogController, DialogState, PageRefresher, SubmitOutcome};
use ecnflow_notify::InMemoryNotifier;

use crate::{
    backend::{InMemoryBackend, ReceivedCall},
    print_toasts,
};

pub const INSTANCE: InstanceId = InstanceId(1004);
pub const DETAIL: &str = "approval service unavailable, try again later";

pub struct FailureReport {
    pub blank: SubmitOutcome,
    pub failed: SubmitOutcome,
    pub state_after: DialogState,
    pub status_after: Option<ApprovalStatus>,
    pub refreshes: usize,
}

pub async fn play(
    backend: Arc<InMemoryBackend>,
    notifier: &InMemoryNotifier,
) -> EcnflowResult<FailureReport> {
    let refresher = PageRefresher::new(backend.clone(), ResourceKind::Approvals, ListQuery::default());
    let mut dialog = ActionDialogController::new(INSTANCE);

    dialog.open(ActionKind::Reject)?;
    dialog.set_comment("  ")?;
    let blank = dialog.submit(backend.as_ref(), &refresher, notifier).await?;

    dialog.set_comment("missing drawings")?;
    backend.fail_next(503, DETAIL);
    let failed = dialog.submit(backend.as_ref(), &refresher, notifier).await?;

    let refreshes = backend
        .received()
        .iter()
        .filter(|call| matches!(call, ReceivedCall::List { .. }))
        .count();

    Ok(FailureReport {
        blank,
        failed,
        state_after: dialog.state().clone(),
        status_after: backend.approval(INSTANCE).map(|r| r.status),
        refreshes,
    })
}

/// Run Scenario 4 against a fresh reference backend.
pub async fn run_scenario() -> EcnflowResult<()> {
    println!("=== Scenario 4: Backend failure on reject ===");
    println!();
    println!("  Approval: {}  (ECN-2026-016)", INSTANCE);
    println!("  Backend primed to answer 503: \"{}\"", DETAIL);
    println!();

    let backend = Arc::new(InMemoryBackend::seeded());
    let notifier = InMemoryNotifier::new();
    let report = play(backend.clone(), &notifier).await?;

    println!("  Confirm with blank comment: {:?}", report.blank);
    println!("  Confirm with comment:       {:?}", report.failed);
    println!("  Dialog after failure:       {:?}", report.state_after);
    if let Some(status) = &report.status_after {
        println!("  Server-side status:         {}", status);
    }
    println!("  List refreshes issued:      {}", report.refreshes);
    println!();
    print_toasts(&notifier);
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ecnflow_contracts::{approval::ApprovalStatus, toast::ToastLevel};
    use ecnflow_core::{DialogState, SubmitOutcome};
    use ecnflow_notify::InMemoryNotifier;

    use crate::backend::InMemoryBackend;

    use super::{play, DETAIL};

    #[tokio::test]
    async fn failure_closes_dialog_and_skips_refresh() {
        let backend = Arc::new(InMemoryBackend::seeded());
        let notifier = InMemoryNotifier::new();
        let report = play(backend.clone(), &notifier).await.unwrap();

        assert!(matches!(report.blank, SubmitOutcome::Invalid(_)));
        assert!(matches!(report.failed, SubmitOutcome::Failed(_)));
        assert_eq!(report.state_after, DialogState::Closed);
        assert_eq!(report.status_after, Some(ApprovalStatus::Pending));
        assert_eq!(report.refreshes, 0);
        assert_eq!(backend.mutations().len(), 1, "blank comment must not be sent");

        let levels: Vec<ToastLevel> = notifier.entries().iter().map(|e| e.toast.level).collect();
        assert_eq!(levels, vec![ToastLevel::Warning, ToastLevel::Error]);
        assert_eq!(notifier.last().unwrap().message, DETAIL);
    }
}
