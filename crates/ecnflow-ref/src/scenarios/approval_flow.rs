//! Scenario 1: Approve an ECN, then approve it again.
//!
//! Walk-through:
//!   1. Open the approve dialog on approval 1001 (ECN-2026-014)
//!   2. Type "approved, proceed" and confirm → one POST, success toast
//!   3. The approvals list is re-fetched and shows 1001 as approved
//!   4. Open the dialog again and confirm a second time → backend answers 409
//!   5. The error toast shows the server's message; the dialog still closes

use std::sync::Arc;

use ecnflow_contracts::{
    approval::{ActionKind, ApprovalRecord},
    error::EcnflowResult,
    ids::InstanceId,
    page::{ListQuery, Page, ResourceKind},
};
use ecnflow_core::{ActionDialogController, PageRefresher, SubmitOutcome};
use ecnflow_notify::InMemoryNotifier;

use crate::{backend::InMemoryBackend, print_toasts};

pub const INSTANCE: InstanceId = InstanceId(1001);
pub const COMMENT: &str = "approved, proceed";

pub struct ApprovalFlowReport {
    pub first: SubmitOutcome,
    pub second: SubmitOutcome,
    pub dialog_open_after_failure: bool,
    pub refreshed: Page<ApprovalRecord>,
}

pub async fn play(
    backend: Arc<InMemoryBackend>,
    notifier: &InMemoryNotifier,
) -> EcnflowResult<ApprovalFlowReport> {
    let refresher = PageRefresher::new(backend.clone(), ResourceKind::Approvals, ListQuery::default());
    let mut dialog = ActionDialogController::new(INSTANCE);

    dialog.open(ActionKind::Approve)?;
    dialog.set_comment(COMMENT)?;
    let first = dialog.submit(backend.as_ref(), &refresher, notifier).await?;

    dialog.open(ActionKind::Approve)?;
    dialog.set_comment("double-checking")?;
    let second = dialog.submit(backend.as_ref(), &refresher, notifier).await?;

    Ok(ApprovalFlowReport {
        first,
        second,
        dialog_open_after_failure: dialog.state().is_open(),
        refreshed: refresher.latest_as()?.unwrap_or_default(),
    })
}

/// Run Scenario 1 against a fresh reference backend.
pub async fn run_scenario() -> EcnflowResult<()> {
    println!("=== Scenario 1: Approve an ECN ===");
    println!();
    println!("  Approval: {}  (ECN-2026-014, approver K. Lindqvist)", INSTANCE);
    println!("  Comment:  \"{}\"", COMMENT);
    println!();

    let backend = Arc::new(InMemoryBackend::seeded());
    let notifier = InMemoryNotifier::new();
    let report = play(backend.clone(), &notifier).await?;

    println!("  First confirm:  {:?}", report.first);
    println!("  Second confirm: {:?}", report.second);
    println!(
        "  Dialog open after failed confirm: {}",
        report.dialog_open_after_failure
    );
    println!("  Requests received: {}", backend.mutations().len());
    println!();
    println!("  Refreshed approvals ({} total):", report.refreshed.total);
    for record in &report.refreshed.items {
        println!(
            "    #{:<5} {:<9} {}",
            record.id.0,
            record.status,
            record.title.as_deref().unwrap_or("")
        );
    }
    println!();
    print_toasts(&notifier);
    println!();
    Ok(())
}
