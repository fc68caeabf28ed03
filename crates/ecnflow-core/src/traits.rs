//! Seam traits between the dialog controllers and the outside world.
//!
//! - `ApprovalGateway` issues the mutating REST calls
//! - `ListSource`      fetches list pages
//! - `ListRefresher`   re-pulls the authoritative list after a mutation
//! - `Notifier`        shows toasts to the user
//!
//! The controllers only ever talk to these traits, so tests and the offline
//! reference backend can stand in for the HTTP client.

use async_trait::async_trait;

use ecnflow_contracts::{
    error::EcnflowResult,
    ids::{EcnId, InstanceId, UserId},
    page::{ListQuery, Page, ResourceKind},
    toast::Toast,
};

/// The client side of the approval endpoints.
///
/// Every method is exactly one network call: no retry, no idempotency key, no
/// timeout beyond what the implementation's HTTP client applies. On failure
/// the error carries the server's message; callers never roll back local
/// state because none was mutated.
#[async_trait]
pub trait ApprovalGateway: Send + Sync {
    /// `POST /approvals/{id}/approve` with `{comment}`.
    async fn approve(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()>;

    /// `POST /approvals/{id}/reject` with `{comment}`.
    async fn reject(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()>;

    /// `POST /approvals/{id}/delegate` with `{delegate_to_id, comment}`.
    async fn delegate(
        &self,
        instance: InstanceId,
        delegate_to: UserId,
        comment: &str,
    ) -> EcnflowResult<()>;

    /// `POST /ecns/batch-submit` with `{ecn_ids, comment}`.
    async fn batch_submit(&self, ecn_ids: &[EcnId], comment: &str) -> EcnflowResult<()>;
}

/// Fetches one page of a list screen.
///
/// Items are returned as raw JSON; callers decode into the record type they
/// expect with [`crate::refresher::decode_page`].
#[async_trait]
pub trait ListSource: Send + Sync {
    async fn list(
        &self,
        kind: ResourceKind,
        query: &ListQuery,
    ) -> EcnflowResult<Page<serde_json::Value>>;
}

/// Re-fetches the list a dialog was opened from.
///
/// Called only after a successful mutation. Always a full re-fetch.
#[async_trait]
pub trait ListRefresher: Send + Sync {
    async fn refresh(&self) -> EcnflowResult<()>;
}

/// Shows a toast to the user.
///
/// Injected into every controller call instead of being a process-wide
/// global, so each caller decides where notifications go.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}
