//! Approval records and the request bodies that mutate them.
//!
//! `ApprovalRecord` is read-only on the client: it is fetched, displayed and
//! re-fetched after a mutation, never edited in place. The transient types
//! (`PendingAction`, `DelegateRequest`) live only while a dialog is open.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{EcnflowError, EcnflowResult},
    ids::{EcnId, InstanceId, UserId},
};

/// The decision a user can take on a pending approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Approve,
    Reject,
    Delegate,
}

impl ActionKind {
    /// The path segment used by the backend for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Approve => "approve",
            ActionKind::Reject => "reject",
            ActionKind::Delegate => "delegate",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Status of an approval as reported by the backend.
///
/// Unknown strings deserialize into `Other` so a new server-side status never
/// breaks list decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    Delegated,
    Other(String),
}

impl From<String> for ApprovalStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pending" => ApprovalStatus::Pending,
            "approved" => ApprovalStatus::Approved,
            "rejected" => ApprovalStatus::Rejected,
            "delegated" => ApprovalStatus::Delegated,
            _ => ApprovalStatus::Other(s),
        }
    }
}

impl From<ApprovalStatus> for String {
    fn from(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Pending => "pending".to_string(),
            ApprovalStatus::Approved => "approved".to_string(),
            ApprovalStatus::Rejected => "rejected".to_string(),
            ApprovalStatus::Delegated => "delegated".to_string(),
            ApprovalStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.clone().into();
        f.pad(&s)
    }
}

/// A file attached to an approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

/// One approval instance as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub id: InstanceId,
    pub status: ApprovalStatus,
    /// Display name of the current approver.
    pub approver: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Conditions attached to a conditional approval.
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub ecn_id: Option<EcnId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The decision being composed in an approve/reject dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub action: ActionKind,
    pub comment: String,
}

impl PendingAction {
    /// Start a new pending action with an empty comment.
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            comment: String::new(),
        }
    }

    pub fn validate(&self) -> EcnflowResult<()> {
        require_comment(&self.comment)
    }
}

/// The hand-off being composed in a delegate dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateRequest {
    pub delegate_to_id: UserId,
    pub comment: String,
}

impl DelegateRequest {
    pub fn validate(&self) -> EcnflowResult<()> {
        require_comment(&self.comment)
    }
}

/// Body of `POST /approvals/{id}/approve` and `/reject`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub comment: String,
}

/// Body of `POST /ecns/batch-submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSubmitRequest {
    pub ecn_ids: Vec<EcnId>,
    pub comment: String,
}

impl BatchSubmitRequest {
    pub fn validate(&self) -> EcnflowResult<()> {
        if self.ecn_ids.is_empty() {
            return Err(EcnflowError::validation(
                "ecn_ids",
                "select at least one ECN",
            ));
        }
        require_comment(&self.comment)
    }
}

/// A comment is required on every decision. Whitespace-only counts as empty.
pub fn require_comment(comment: &str) -> EcnflowResult<()> {
    if comment.trim().is_empty() {
        return Err(EcnflowError::validation("comment", "a comment is required"));
    }
    Ok(())
}
