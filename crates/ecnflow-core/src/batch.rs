//! Multi-select batch submission of ECNs.
//!
//! `BatchSelection` is the set of rows ticked in a list screen.
//! `BatchSubmitController` runs the comment dialog for submitting all of them
//! in one request. It follows the same lifecycle as the single-item dialog,
//! with one addition: a successful submit clears the selection, a failed one
//! keeps it so the user can retry.

use tracing::{debug, field::display, info_span, warn, Instrument};

use ecnflow_contracts::{
    approval::BatchSubmitRequest,
    error::{EcnflowError, EcnflowResult},
    ids::{DialogSessionId, EcnId},
    toast::Toast,
};

use crate::{
    controller::{settle, InFlight, Release, SubmitOutcome},
    traits::{ApprovalGateway, ListRefresher, Notifier},
};

/// Selected ECN ids in the order they were ticked. No duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSelection {
    ids: Vec<EcnId>,
}

impl BatchSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent. Returns false if it was already selected.
    pub fn select(&mut self, id: EcnId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`. Returns false if it was not selected.
    pub fn deselect(&mut self, id: EcnId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Flip `id` and return whether it is now selected.
    pub fn toggle(&mut self, id: EcnId) -> bool {
        if self.deselect(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: EcnId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[EcnId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<EcnId> for BatchSelection {
    fn from_iter<I: IntoIterator<Item = EcnId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.select(id);
        }
        selection
    }
}

/// The comment dialog for a batch submit.
#[derive(Debug, Default)]
pub struct BatchSubmitController {
    /// `None` while the dialog is closed.
    comment: Option<String>,
    session: Option<DialogSessionId>,
    submitting: bool,
}

impl BatchSubmitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.comment.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn open(&mut self) -> EcnflowResult<()> {
        self.ensure_idle()?;
        let session = DialogSessionId::new();
        debug!(session_id = %session, "batch dialog opened");
        self.comment = Some(String::new());
        self.session = Some(session);
        Ok(())
    }

    pub fn set_comment(&mut self, text: impl Into<String>) -> EcnflowResult<()> {
        self.ensure_idle()?;
        let comment = self.comment.as_mut().ok_or(EcnflowError::NoDialogOpen)?;
        *comment = text.into();
        debug!(
            session_id = self.session.map(display),
            chars = comment.chars().count(),
            "batch comment edited"
        );
        Ok(())
    }

    pub fn cancel(&mut self) -> EcnflowResult<()> {
        self.ensure_idle()?;
        if let Some(session) = self.session {
            debug!(session_id = %session, "batch dialog cancelled");
        }
        self.reset();
        Ok(())
    }

    /// Validate the selection and comment and take the submitting flag.
    pub fn begin_submit(&mut self, selection: &BatchSelection) -> EcnflowResult<BatchSubmitRequest> {
        self.ensure_idle()?;
        let comment = self.comment.as_ref().ok_or(EcnflowError::NoDialogOpen)?;
        let request = BatchSubmitRequest {
            ecn_ids: selection.ids().to_vec(),
            comment: comment.clone(),
        };
        request.validate()?;
        self.submitting = true;
        debug!(
            session_id = self.session.map(display),
            count = request.ecn_ids.len(),
            "batch submission started"
        );
        Ok(request)
    }

    /// Release the submitting flag, close the dialog and report `result`.
    ///
    /// On success `selection` is cleared, a success toast reports the count
    /// and the list is re-fetched. On failure the selection is kept and an
    /// error toast shows the server's message.
    pub async fn finish_submit(
        &mut self,
        request: &BatchSubmitRequest,
        result: EcnflowResult<()>,
        selection: &mut BatchSelection,
        refresher: &dyn ListRefresher,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let span = info_span!(
            "batch_submission",
            session_id = self.session.map(display),
            count = request.ecn_ids.len()
        );
        if result.is_ok() {
            selection.clear();
        }
        self.release();

        let message = format!("{} ECNs submitted", request.ecn_ids.len());
        settle(result, message, refresher, notifier)
            .instrument(span)
            .await
    }

    /// Submit every selected ECN in one call.
    ///
    /// On success `selection` is cleared and the list re-fetched. On failure
    /// the selection is kept; the dialog closes either way, including when
    /// this future is dropped before the gateway answers.
    pub async fn submit(
        &mut self,
        selection: &mut BatchSelection,
        gateway: &dyn ApprovalGateway,
        refresher: &dyn ListRefresher,
        notifier: &dyn Notifier,
    ) -> EcnflowResult<SubmitOutcome> {
        let request = match self.begin_submit(selection) {
            Ok(request) => request,
            Err(err @ EcnflowError::Validation { .. }) => {
                warn!(
                    session_id = self.session.map(display),
                    selected = selection.len(),
                    error = %err,
                    "batch submit blocked by validation"
                );
                notifier.notify(Toast::warning(err.user_message()));
                return Ok(SubmitOutcome::Invalid(err));
            }
            Err(other) => return Err(other),
        };

        let result = {
            let mut guard = InFlight::new(&mut *self);
            let result = gateway.batch_submit(&request.ecn_ids, &request.comment).await;
            guard.complete();
            result
        };

        Ok(self
            .finish_submit(&request, result, selection, refresher, notifier)
            .await)
    }

    fn ensure_idle(&self) -> EcnflowResult<()> {
        if self.submitting {
            return Err(EcnflowError::AlreadySubmitting);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.comment = None;
        self.session = None;
    }
}

impl Release for BatchSubmitController {
    fn release(&mut self) {
        self.submitting = false;
        self.reset();
    }

    fn release_abandoned(&mut self) {
        warn!(
            session_id = self.session.map(display),
            "batch submission dropped before the gateway answered"
        );
        self.release();
    }
}
