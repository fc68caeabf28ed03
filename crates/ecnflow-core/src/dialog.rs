//! The decision dialog as a single tagged union.
//!
//! Exactly one of approve / reject / delegate can be open for a workflow item
//! at any time. Opening another kind replaces the current one; there is no
//! way to represent two open dialogs.

use ecnflow_contracts::{
    approval::{ActionKind, DelegateRequest, PendingAction},
    error::{EcnflowError, EcnflowResult},
    ids::UserId,
};

/// Form state of the decision dialog for one workflow item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Approving {
        comment: String,
    },
    Rejecting {
        comment: String,
    },
    Delegating {
        /// `None` until the user picks someone.
        delegate_to: Option<UserId>,
        comment: String,
    },
}

impl DialogState {
    /// A freshly opened dialog of `action` with an empty form.
    pub fn opened(action: ActionKind) -> Self {
        match action {
            ActionKind::Approve => DialogState::Approving { comment: String::new() },
            ActionKind::Reject => DialogState::Rejecting { comment: String::new() },
            ActionKind::Delegate => DialogState::Delegating {
                delegate_to: None,
                comment: String::new(),
            },
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::Closed)
    }

    pub fn action(&self) -> Option<ActionKind> {
        match self {
            DialogState::Closed => None,
            DialogState::Approving { .. } => Some(ActionKind::Approve),
            DialogState::Rejecting { .. } => Some(ActionKind::Reject),
            DialogState::Delegating { .. } => Some(ActionKind::Delegate),
        }
    }

    /// The comment typed so far, or `None` when closed.
    pub fn comment(&self) -> Option<&str> {
        match self {
            DialogState::Closed => None,
            DialogState::Approving { comment }
            | DialogState::Rejecting { comment }
            | DialogState::Delegating { comment, .. } => Some(comment),
        }
    }

    pub fn delegate_to(&self) -> Option<UserId> {
        match self {
            DialogState::Delegating { delegate_to, .. } => *delegate_to,
            _ => None,
        }
    }

    pub(crate) fn set_comment(&mut self, text: String) -> EcnflowResult<()> {
        match self {
            DialogState::Closed => Err(EcnflowError::NoDialogOpen),
            DialogState::Approving { comment }
            | DialogState::Rejecting { comment }
            | DialogState::Delegating { comment, .. } => {
                *comment = text;
                Ok(())
            }
        }
    }

    pub(crate) fn select_delegate(&mut self, user: UserId) -> EcnflowResult<()> {
        match self {
            DialogState::Delegating { delegate_to, .. } => {
                *delegate_to = Some(user);
                Ok(())
            }
            DialogState::Closed => Err(EcnflowError::NoDialogOpen),
            other => Err(EcnflowError::InvalidEdit {
                reason: format!(
                    "cannot select a delegate in the {} dialog",
                    other.action().map(ActionKind::as_str).unwrap_or("closed")
                ),
            }),
        }
    }

    /// Validate the form and turn it into the body the gateway sends.
    ///
    /// The delegate target is checked before the comment so the user is told
    /// about the missing selection first.
    pub(crate) fn to_request(&self) -> EcnflowResult<FormRequest> {
        match self {
            DialogState::Closed => Err(EcnflowError::NoDialogOpen),
            DialogState::Approving { comment } => decide(ActionKind::Approve, comment),
            DialogState::Rejecting { comment } => decide(ActionKind::Reject, comment),
            DialogState::Delegating { delegate_to, comment } => {
                let delegate_to_id = delegate_to.ok_or_else(|| {
                    EcnflowError::validation("delegate_to_id", "select a delegate")
                })?;
                let request = DelegateRequest {
                    delegate_to_id,
                    comment: comment.clone(),
                };
                request.validate()?;
                Ok(FormRequest::Delegate(request))
            }
        }
    }
}

fn decide(action: ActionKind, comment: &str) -> EcnflowResult<FormRequest> {
    let pending = PendingAction {
        action,
        comment: comment.to_string(),
    };
    pending.validate()?;
    Ok(FormRequest::Decide(pending))
}

/// A validated dialog form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRequest {
    Decide(PendingAction),
    Delegate(DelegateRequest),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opened_dialogs_start_empty() {
        for action in [ActionKind::Approve, ActionKind::Reject, ActionKind::Delegate] {
            let state = DialogState::opened(action);
            assert!(state.is_open());
            assert_eq!(state.action(), Some(action));
            assert_eq!(state.comment(), Some(""));
            assert_eq!(state.delegate_to(), None);
        }
    }

    #[test]
    fn closed_dialog_rejects_edits() {
        let mut state = DialogState::Closed;
        assert!(matches!(
            state.set_comment("x".into()),
            Err(EcnflowError::NoDialogOpen)
        ));
        assert!(matches!(
            state.select_delegate(UserId(1)),
            Err(EcnflowError::NoDialogOpen)
        ));
    }

    #[test]
    fn delegate_selection_only_in_delegate_dialog() {
        let mut state = DialogState::opened(ActionKind::Approve);
        match state.select_delegate(UserId(3)) {
            Err(EcnflowError::InvalidEdit { reason }) => assert!(reason.contains("approve")),
            other => panic!("expected InvalidEdit, got {:?}", other),
        }
    }

    #[test]
    fn missing_delegate_reported_before_comment() {
        let state = DialogState::opened(ActionKind::Delegate);
        match state.to_request() {
            Err(EcnflowError::Validation { field, .. }) => assert_eq!(field, "delegate_to_id"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn reject_form_builds_pending_action() {
        let mut state = DialogState::opened(ActionKind::Reject);
        state.set_comment("BOM impact not assessed".into()).unwrap();
        assert_eq!(
            state.to_request().unwrap(),
            FormRequest::Decide(PendingAction {
                action: ActionKind::Reject,
                comment: "BOM impact not assessed".into(),
            })
        );
    }
}
