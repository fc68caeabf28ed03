//! Scenario 2: Delegate an approval.
//!
//! Walk-through:
//!   1. Open the delegate dialog on approval 1002 and type a comment
//!   2. Confirm without picking a delegate → warning toast, nothing sent,
//!      dialog stays open with the comment
//!   3. Pick R. Tanaka and confirm → one POST carrying delegate_to_id 13
//!   4. The approval now shows R. Tanaka as approver

use std::sync::Arc;

use ecnflow_contracts::{
    approval::{ActionKind, ApprovalRecord},
    error::EcnflowResult,
    ids::{InstanceId, UserId},
    page::{ListQuery, ResourceKind},
};
use ecnflow_core::{ActionDialogController, PageRefresher, SubmitOutcome};
use ecnflow_notify::InMemoryNotifier;

use crate::{backend::InMemoryBackend, print_toasts};

pub const INSTANCE: InstanceId = InstanceId(1002);
pub const DELEGATE: UserId = UserId(13);
pub const COMMENT: &str = "on leave until 14 March";

pub struct DelegateFlowReport {
    pub without_delegate: SubmitOutcome,
    pub comment_kept: bool,
    pub with_delegate: SubmitOutcome,
    pub record: Option<ApprovalRecord>,
}

pub async fn play(
    backend: Arc<InMemoryBackend>,
    notifier: &InMemoryNotifier,
) -> EcnflowResult<DelegateFlowReport> {
    let refresher = PageRefresher::new(
        backend.clone(),
        ResourceKind::Approvals,
        ListQuery::default().status("delegated"),
    );
    let mut dialog = ActionDialogController::new(INSTANCE);

    dialog.open(ActionKind::Delegate)?;
    dialog.set_comment(COMMENT)?;
    let without_delegate = dialog.submit(backend.as_ref(), &refresher, notifier).await?;
    let comment_kept = dialog.state().comment() == Some(COMMENT);

    dialog.select_delegate(DELEGATE)?;
    let with_delegate = dialog.submit(backend.as_ref(), &refresher, notifier).await?;

    let record = refresher
        .latest_as::<ApprovalRecord>()?
        .and_then(|page| page.items.into_iter().find(|r| r.id == INSTANCE));

    Ok(DelegateFlowReport {
        without_delegate,
        comment_kept,
        with_delegate,
        record,
    })
}

/// Run Scenario 2 against a fresh reference backend.
pub async fn run_scenario() -> EcnflowResult<()> {
    println!("=== Scenario 2: Delegate an approval ===");
    println!();
    println!("  Approval: {}  (ECN-2026-015, approver M. Osei)", INSTANCE);
    println!("  Delegate: user {} (R. Tanaka)", DELEGATE);
    println!();

    let backend = Arc::new(InMemoryBackend::seeded());
    let notifier = InMemoryNotifier::new();
    let report = play(backend.clone(), &notifier).await?;

    println!("  Confirm without delegate: {:?}", report.without_delegate);
    println!("  Comment kept in dialog:   {}", report.comment_kept);
    println!("  Confirm with delegate:    {:?}", report.with_delegate);
    if let Some(record) = &report.record {
        println!("  Approver now:             {} ({})", record.approver, record.status);
    }
    println!("  Requests received:        {}", backend.mutations().len());
    println!();
    print_toasts(&notifier);
    println!();
    Ok(())
}
