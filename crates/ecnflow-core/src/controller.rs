//! The decision dialog controller for one workflow item.
//!
//! Lifecycle:
//!
//!   Closed → open(action) → edit → begin_submit → gateway → finish_submit → Closed
//!
//! A validation failure in `begin_submit` sends nothing and leaves the dialog
//! open with the user's input intact. Once a request has been dispatched the
//! dialog closes and the form resets whatever the outcome; the error path
//! reports the server's message but does not keep the form around for
//! correction. A submit future dropped while the gateway call is pending
//! also ends with the dialog closed and idle.

use tracing::{debug, field::display, info, info_span, warn, Instrument, Span};

use ecnflow_contracts::{
    approval::ActionKind,
    error::{EcnflowError, EcnflowResult},
    ids::{DialogSessionId, InstanceId, UserId},
    toast::Toast,
};

use crate::{
    dialog::{DialogState, FormRequest},
    traits::{ApprovalGateway, ListRefresher, Notifier},
};

/// What happened to one submit attempt.
///
/// `Err` from the `submit` methods is reserved for calls made in the wrong
/// state (nothing open, already submitting). Everything a user can cause is
/// an outcome.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The form did not validate. No request was sent; the dialog stays open.
    Invalid(EcnflowError),
    /// The backend accepted the action and the list was re-fetched.
    Succeeded,
    /// The request was sent and failed. The dialog is closed regardless.
    Failed(EcnflowError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded)
    }
}

/// A validated request detached from the controller.
///
/// Produced by `begin_submit` while the submitting flag is held, so an event
/// loop can await `dispatch` elsewhere and hand the result back through
/// `finish_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub instance: InstanceId,
    pub session: DialogSessionId,
    pub request: FormRequest,
}

impl Submission {
    pub fn action(&self) -> ActionKind {
        match &self.request {
            FormRequest::Decide(pending) => pending.action,
            FormRequest::Delegate(_) => ActionKind::Delegate,
        }
    }

    /// Issue the single gateway call for this submission.
    pub async fn dispatch(&self, gateway: &dyn ApprovalGateway) -> EcnflowResult<()> {
        match &self.request {
            FormRequest::Decide(pending) => match pending.action {
                ActionKind::Approve => gateway.approve(self.instance, &pending.comment).await,
                ActionKind::Reject => gateway.reject(self.instance, &pending.comment).await,
                ActionKind::Delegate => Err(EcnflowError::InvalidEdit {
                    reason: "delegation requires a delegate target".to_string(),
                }),
            },
            FormRequest::Delegate(request) => {
                gateway
                    .delegate(self.instance, request.delegate_to_id, &request.comment)
                    .await
            }
        }
    }

    fn success_message(&self) -> String {
        match &self.request {
            FormRequest::Decide(pending) if pending.action == ActionKind::Reject => {
                format!("Approval {} rejected", self.instance)
            }
            FormRequest::Decide(_) => format!("Approval {} approved", self.instance),
            FormRequest::Delegate(request) => format!(
                "Approval {} delegated to user {}",
                self.instance, request.delegate_to_id
            ),
        }
    }

    fn span(&self) -> Span {
        info_span!(
            "submission",
            session_id = %self.session,
            instance_id = %self.instance,
            action = %self.action()
        )
    }
}

/// Holds the transient dialog state for one workflow item.
#[derive(Debug)]
pub struct ActionDialogController {
    instance: InstanceId,
    state: DialogState,
    session: Option<DialogSessionId>,
    submitting: bool,
}

impl ActionDialogController {
    pub fn new(instance: InstanceId) -> Self {
        Self {
            instance,
            state: DialogState::Closed,
            session: None,
            submitting: false,
        }
    }

    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Open the dialog for `action` with an empty form.
    ///
    /// Replaces any dialog already open for this item. Refused while a
    /// submission is in flight, since the finishing submit would wipe it.
    pub fn open(&mut self, action: ActionKind) -> EcnflowResult<()> {
        self.ensure_idle()?;
        let session = DialogSessionId::new();
        debug!(
            session_id = %session,
            instance_id = %self.instance,
            action = %action,
            replaced = self.state.is_open(),
            "dialog opened"
        );
        self.state = DialogState::opened(action);
        self.session = Some(session);
        Ok(())
    }

    pub fn set_comment(&mut self, text: impl Into<String>) -> EcnflowResult<()> {
        self.ensure_idle()?;
        let text = text.into();
        let chars = text.chars().count();
        self.state.set_comment(text)?;
        debug!(
            session_id = self.session.map(display),
            instance_id = %self.instance,
            chars,
            "comment edited"
        );
        Ok(())
    }

    pub fn select_delegate(&mut self, user: UserId) -> EcnflowResult<()> {
        self.ensure_idle()?;
        self.state.select_delegate(user)?;
        debug!(
            session_id = self.session.map(display),
            instance_id = %self.instance,
            delegate_to = %user,
            "delegate selected"
        );
        Ok(())
    }

    /// Close without sending anything.
    pub fn cancel(&mut self) -> EcnflowResult<()> {
        self.ensure_idle()?;
        if let Some(session) = self.session {
            debug!(session_id = %session, instance_id = %self.instance, "dialog cancelled");
        }
        self.reset();
        Ok(())
    }

    /// Validate the form and take the submitting flag.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitting` if a previous submission has not finished
    /// - `NoDialogOpen` if nothing is open
    /// - `Validation` if the form is incomplete; the dialog is left untouched
    pub fn begin_submit(&mut self) -> EcnflowResult<Submission> {
        self.ensure_idle()?;
        let request = self.state.to_request()?;
        let session = self.session.unwrap_or_default();
        self.submitting = true;
        debug!(
            session_id = %session,
            instance_id = %self.instance,
            "submission started"
        );
        Ok(Submission {
            instance: self.instance,
            session,
            request,
        })
    }

    /// Release the submitting flag, close the dialog, reset the form and
    /// report `result` to the user.
    ///
    /// Called after every dispatched submission, successful or not. On
    /// success a success toast fires and `refresher` re-pulls the list; on
    /// failure an error toast shows the server's message and nothing is
    /// re-fetched.
    pub async fn finish_submit(
        &mut self,
        submission: &Submission,
        result: EcnflowResult<()>,
        refresher: &dyn ListRefresher,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        self.release();
        settle(result, submission.success_message(), refresher, notifier)
            .instrument(submission.span())
            .await
    }

    /// Run a whole submit attempt against `gateway`.
    ///
    /// Validation failures produce a warning toast and no request. A
    /// dispatched request always ends with the dialog closed, including when
    /// this future is dropped before the gateway answers.
    pub async fn submit(
        &mut self,
        gateway: &dyn ApprovalGateway,
        refresher: &dyn ListRefresher,
        notifier: &dyn Notifier,
    ) -> EcnflowResult<SubmitOutcome> {
        let submission = match self.begin_submit() {
            Ok(submission) => submission,
            Err(err @ EcnflowError::Validation { .. }) => {
                warn!(
                    session_id = self.session.map(display),
                    instance_id = %self.instance,
                    error = %err,
                    "submit blocked by validation"
                );
                notifier.notify(Toast::warning(err.user_message()));
                return Ok(SubmitOutcome::Invalid(err));
            }
            Err(other) => return Err(other),
        };

        let result = {
            let mut guard = InFlight::new(&mut *self);
            let result = submission.dispatch(gateway).await;
            guard.complete();
            result
        };

        Ok(self
            .finish_submit(&submission, result, refresher, notifier)
            .await)
    }

    fn ensure_idle(&self) -> EcnflowResult<()> {
        if self.submitting {
            return Err(EcnflowError::AlreadySubmitting);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.state = DialogState::Closed;
        self.session = None;
    }
}

impl Release for ActionDialogController {
    fn release(&mut self) {
        self.submitting = false;
        self.reset();
    }

    fn release_abandoned(&mut self) {
        warn!(
            session_id = self.session.map(display),
            instance_id = %self.instance,
            "submission dropped before the gateway answered"
        );
        self.release();
    }
}

/// A controller that holds a submitting flag while a dispatch is pending.
pub(crate) trait Release {
    /// Clear the submitting flag, close the dialog and reset the form.
    fn release(&mut self);

    /// `release` after the dispatch was abandoned mid-flight.
    fn release_abandoned(&mut self);
}

/// Borrows a controller for the duration of one dispatch.
///
/// If dropped before `complete` (the owning future was cancelled or timed
/// out) the controller is released, so it never stays stuck in the
/// submitting state.
pub(crate) struct InFlight<'a, C: Release> {
    controller: &'a mut C,
    completed: bool,
}

impl<'a, C: Release> InFlight<'a, C> {
    pub(crate) fn new(controller: &'a mut C) -> Self {
        Self {
            controller,
            completed: false,
        }
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }
}

impl<C: Release> Drop for InFlight<'_, C> {
    fn drop(&mut self) {
        if !self.completed {
            self.controller.release_abandoned();
        }
    }
}

/// Turn a dispatched call's result into user feedback.
///
/// The refresh runs on the success path only; a refresh failure is shown but
/// does not turn a successful action into a failed one. Callers run it inside
/// their submission span so every line carries the session.
pub(crate) async fn settle(
    result: EcnflowResult<()>,
    success_message: String,
    refresher: &dyn ListRefresher,
    notifier: &dyn Notifier,
) -> SubmitOutcome {
    match result {
        Ok(()) => {
            info!(summary = %success_message, "action accepted");
            notifier.notify(Toast::success(success_message));
            if let Err(err) = refresher.refresh().await {
                warn!(error = %err, "list refresh failed after successful action");
                notifier.notify(Toast::error(err.user_message()));
            }
            SubmitOutcome::Succeeded
        }
        Err(err) => {
            warn!(error = %err, "action failed");
            notifier.notify(Toast::error(err.user_message()));
            SubmitOutcome::Failed(err)
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
