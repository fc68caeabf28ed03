//! Scenario 3: Batch-submit three draft ECNs.
//!
//! Walk-through:
//!   1. Tick ECN-2026-021, -022 and -023 in the ECN list
//!   2. Open the batch dialog and confirm with no comment → warning, nothing sent
//!   3. Type "Q1 batch" and confirm → one POST with all three ids
//!   4. The selection is cleared and the drafts list re-fetched

use std::sync::Arc;

use ecnflow_contracts::{
    error::EcnflowResult,
    page::{ListQuery, ResourceKind},
};
use ecnflow_core::{BatchSelection, BatchSubmitController, PageRefresher, SubmitOutcome};
use ecnflow_notify::InMemoryNotifier;

use crate::{backend::InMemoryBackend, mock_data, print_toasts};

pub const COMMENT: &str = "Q1 batch";

pub struct BatchReport {
    pub without_comment: SubmitOutcome,
    pub submitted: SubmitOutcome,
    pub selection_after: usize,
    /// Drafts left after the refresh.
    pub drafts_remaining: u64,
}

pub async fn play(
    backend: Arc<InMemoryBackend>,
    notifier: &InMemoryNotifier,
) -> EcnflowResult<BatchReport> {
    let refresher = PageRefresher::new(
        backend.clone(),
        ResourceKind::Ecns,
        ListQuery::default().status("draft"),
    );
    let mut selection: BatchSelection = mock_data::q1_drafts().into_iter().collect();
    let mut dialog = BatchSubmitController::new();

    dialog.open()?;
    let without_comment = dialog
        .submit(&mut selection, backend.as_ref(), &refresher, notifier)
        .await?;

    dialog.set_comment(COMMENT)?;
    let submitted = dialog
        .submit(&mut selection, backend.as_ref(), &refresher, notifier)
        .await?;

    Ok(BatchReport {
        without_comment,
        submitted,
        selection_after: selection.len(),
        drafts_remaining: refresher.latest().map(|page| page.total).unwrap_or(0),
    })
}

/// Run Scenario 3 against a fresh reference backend.
pub async fn run_scenario() -> EcnflowResult<()> {
    println!("=== Scenario 3: Batch submit ===");
    println!();
    println!("  Selected: ECN-2026-021, ECN-2026-022, ECN-2026-023");
    println!("  Comment:  \"{}\"", COMMENT);
    println!();

    let backend = Arc::new(InMemoryBackend::seeded());
    let notifier = InMemoryNotifier::new();
    let report = play(backend.clone(), &notifier).await?;

    println!("  Confirm without comment: {:?}", report.without_comment);
    println!("  Confirm with comment:    {:?}", report.submitted);
    println!("  Rows still selected:     {}", report.selection_after);
    println!("  Drafts remaining:        {}", report.drafts_remaining);
    println!("  Requests received:       {}", backend.mutations().len());
    println!();
    print_toasts(&notifier);
    println!();
    Ok(())
}
