//! An in-process stand-in for the REST backend.
//!
//! `InMemoryBackend` implements the same `ApprovalGateway` and `ListSource`
//! traits as the HTTP client, over the fictional data in `mock_data`. It
//! answers the way the real server does, including `Api` errors with a
//! `detail`-style message, so the controllers can be exercised end to end
//! without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use ecnflow_contracts::{
    approval::{ActionKind, ApprovalRecord, ApprovalStatus},
    error::{EcnflowError, EcnflowResult},
    ids::{EcnId, InstanceId, UserId},
    page::{ListQuery, Page, ResourceKind},
};
use ecnflow_core::traits::{ApprovalGateway, ListSource};

use crate::mock_data;

/// A request the backend received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedCall {
    Decide {
        instance: InstanceId,
        action: ActionKind,
        comment: String,
    },
    Delegate {
        instance: InstanceId,
        delegate_to: UserId,
        comment: String,
    },
    BatchSubmit {
        ecn_ids: Vec<EcnId>,
        comment: String,
    },
    List {
        kind: ResourceKind,
        query: ListQuery,
    },
}

#[derive(Default)]
struct BackendState {
    approvals: Vec<ApprovalRecord>,
    ecns: Vec<Value>,
    users: HashMap<UserId, String>,
    received: Vec<ReceivedCall>,
    /// Failure returned by the next mutating call, then cleared.
    fail_next: Option<EcnflowError>,
}

pub struct InMemoryBackend {
    state: Mutex<BackendState>,
}

impl InMemoryBackend {
    /// A backend seeded with the fictional plant data.
    pub fn seeded() -> Self {
        let state = BackendState {
            approvals: mock_data::approvals(),
            ecns: mock_data::ecns(),
            users: mock_data::users()
                .into_iter()
                .map(|(id, name)| (id, name.to_string()))
                .collect(),
            ..BackendState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Make the next approve / reject / delegate / batch call fail with
    /// `status` and `detail`.
    pub fn fail_next(&self, status: u16, detail: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_next = Some(EcnflowError::Api {
                status,
                message: detail.into(),
            });
        }
    }

    /// Every request received so far.
    pub fn received(&self) -> Vec<ReceivedCall> {
        self.state
            .lock()
            .map(|s| s.received.clone())
            .unwrap_or_default()
    }

    /// Mutating requests only.
    pub fn mutations(&self) -> Vec<ReceivedCall> {
        self.received()
            .into_iter()
            .filter(|call| !matches!(call, ReceivedCall::List { .. }))
            .collect()
    }

    pub fn approval(&self, id: InstanceId) -> Option<ApprovalRecord> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.approvals.iter().find(|a| a.id == id).cloned())
    }

    /// Server-side status string of an ECN.
    pub fn ecn_status(&self, id: EcnId) -> Option<String> {
        self.state.lock().ok().and_then(|s| {
            s.ecns
                .iter()
                .find(|row| row["id"].as_u64() == Some(id.0))
                .and_then(|row| row["status"].as_str().map(str::to_string))
        })
    }

    fn lock(&self) -> EcnflowResult<std::sync::MutexGuard<'_, BackendState>> {
        self.state.lock().map_err(|_| EcnflowError::Transport {
            reason: "reference backend state poisoned".to_string(),
        })
    }

    fn decide(
        &self,
        instance: InstanceId,
        action: ActionKind,
        comment: &str,
        delegate_to: Option<UserId>,
    ) -> EcnflowResult<()> {
        let mut state = self.lock()?;
        state.received.push(match delegate_to {
            Some(user) => ReceivedCall::Delegate {
                instance,
                delegate_to: user,
                comment: comment.to_string(),
            },
            None => ReceivedCall::Decide {
                instance,
                action,
                comment: comment.to_string(),
            },
        });
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        let delegate_name = match delegate_to {
            Some(user) => Some(state.users.get(&user).cloned().ok_or_else(|| EcnflowError::Api {
                status: 404,
                message: format!("user {} not found", user),
            })?),
            None => None,
        };

        let record = state
            .approvals
            .iter_mut()
            .find(|a| a.id == instance)
            .ok_or_else(|| EcnflowError::Api {
                status: 404,
                message: format!("approval {} not found", instance),
            })?;

        if record.status != ApprovalStatus::Pending {
            return Err(EcnflowError::Api {
                status: 409,
                message: format!("approval {} is already {}", instance, record.status),
            });
        }

        record.status = match action {
            ActionKind::Approve => ApprovalStatus::Approved,
            ActionKind::Reject => ApprovalStatus::Rejected,
            ActionKind::Delegate => ApprovalStatus::Delegated,
        };
        if let Some(name) = delegate_name {
            record.approver = name;
        }
        record.comment = Some(comment.to_string());
        record.updated_at = Some(Utc::now());
        debug!(instance_id = %instance, action = %action, "reference backend applied decision");
        Ok(())
    }
}

#[async_trait]
impl ApprovalGateway for InMemoryBackend {
    async fn approve(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()> {
        self.decide(instance, ActionKind::Approve, comment, None)
    }

    async fn reject(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()> {
        self.decide(instance, ActionKind::Reject, comment, None)
    }

    async fn delegate(
        &self,
        instance: InstanceId,
        delegate_to: UserId,
        comment: &str,
    ) -> EcnflowResult<()> {
        self.decide(instance, ActionKind::Delegate, comment, Some(delegate_to))
    }

    async fn batch_submit(&self, ecn_ids: &[EcnId], comment: &str) -> EcnflowResult<()> {
        let mut state = self.lock()?;
        state.received.push(ReceivedCall::BatchSubmit {
            ecn_ids: ecn_ids.to_vec(),
            comment: comment.to_string(),
        });
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        // All or nothing: check every id before touching any row.
        for id in ecn_ids {
            let row = state
                .ecns
                .iter()
                .find(|row| row["id"].as_u64() == Some(id.0))
                .ok_or_else(|| EcnflowError::Api {
                    status: 404,
                    message: format!("ECN {} not found", id),
                })?;
            if row["status"] != "draft" {
                return Err(EcnflowError::Api {
                    status: 409,
                    message: format!(
                        "{} is {} and cannot be submitted",
                        row["code"].as_str().unwrap_or("ECN"),
                        row["status"].as_str().unwrap_or("in an unknown state")
                    ),
                });
            }
        }
        for row in state.ecns.iter_mut() {
            if row["id"].as_u64().is_some_and(|id| ecn_ids.contains(&EcnId(id))) {
                row["status"] = Value::from("submitted");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ListSource for InMemoryBackend {
    async fn list(&self, kind: ResourceKind, query: &ListQuery) -> EcnflowResult<Page<Value>> {
        let mut state = self.lock()?;
        state.received.push(ReceivedCall::List {
            kind,
            query: query.clone(),
        });

        let rows: Vec<Value> = match kind {
            ResourceKind::Approvals => state
                .approvals
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<_, _>>()
                .map_err(|e| EcnflowError::Decode {
                    reason: e.to_string(),
                })?,
            ResourceKind::Ecns => state.ecns.clone(),
            ResourceKind::Evaluations => mock_data::evaluations(),
            ResourceKind::Tasks => mock_data::tasks(),
            ResourceKind::PurchaseOrders => mock_data::purchase_orders(),
            ResourceKind::DispatchOrders => mock_data::dispatch_orders(),
            ResourceKind::IssueTemplates => mock_data::issue_templates(),
            ResourceKind::SalesTemplates => mock_data::sales_templates(),
        };

        Ok(paginate(filter_rows(rows, query), query))
    }
}

fn filter_rows(rows: Vec<Value>, query: &ListQuery) -> Vec<Value> {
    rows.into_iter()
        .filter(|row| match &query.status {
            Some(status) => row["status"].as_str() == Some(status.as_str()),
            None => true,
        })
        .filter(|row| match &query.keyword {
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                ["title", "name", "code", "po_no", "order_no"].iter().any(|field| {
                    row[*field]
                        .as_str()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            }
            None => true,
        })
        .collect()
}

fn paginate(rows: Vec<Value>, query: &ListQuery) -> Page<Value> {
    let total = rows.len() as u64;
    let size = query.page_size.max(1) as usize;
    let skip = (query.page.max(1) as usize - 1) * size;
    Page {
        items: rows.into_iter().skip(skip).take(size).collect(),
        total,
    }
}

#[cfg(test)]
mod tests {
    use ecnflow_contracts::{
        approval::ApprovalStatus,
        error::EcnflowError,
        ids::{EcnId, InstanceId, UserId},
        page::{ListQuery, ResourceKind},
    };
    use ecnflow_core::traits::{ApprovalGateway, ListSource};

    use super::InMemoryBackend;

    #[tokio::test]
    async fn approving_twice_conflicts() {
        let backend = InMemoryBackend::seeded();
        backend.approve(InstanceId(1001), "ok").await.unwrap();
        assert_eq!(
            backend.approval(InstanceId(1001)).unwrap().status,
            ApprovalStatus::Approved
        );

        match backend.approve(InstanceId(1001), "again").await {
            Err(EcnflowError::Api { status, message }) => {
                assert_eq!(status, 409);
                assert!(message.contains("already approved"));
            }
            other => panic!("expected 409, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delegate_to_unknown_user_is_not_found() {
        let backend = InMemoryBackend::seeded();
        let err = backend
            .delegate(InstanceId(1002), UserId(999), "cover")
            .await
            .unwrap_err();
        assert!(matches!(err, EcnflowError::Api { status: 404, .. }));
        assert_eq!(
            backend.approval(InstanceId(1002)).unwrap().status,
            ApprovalStatus::Pending
        );
    }

    #[tokio::test]
    async fn batch_is_all_or_nothing() {
        let backend = InMemoryBackend::seeded();
        // ECN 14 is evaluating, not draft.
        let err = backend
            .batch_submit(&[EcnId(21), EcnId(14)], "mixed")
            .await
            .unwrap_err();
        assert!(err.user_message().contains("ECN-2026-014"));
        assert_eq!(backend.ecn_status(EcnId(21)).as_deref(), Some("draft"));
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let backend = InMemoryBackend::seeded();
        backend.fail_next(503, "approval service unavailable");
        assert!(backend.reject(InstanceId(1004), "no").await.is_err());
        assert!(backend.reject(InstanceId(1004), "no").await.is_ok());
        assert_eq!(backend.mutations().len(), 2);
    }

    #[tokio::test]
    async fn list_filters_and_pages() {
        let backend = InMemoryBackend::seeded();
        let page = backend
            .list(ResourceKind::Ecns, &ListQuery::with_page_size(2).status("draft"))
            .await
            .unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.items.len(), 2);

        let second = backend
            .list(
                ResourceKind::Ecns,
                &ListQuery { page: 2, ..ListQuery::with_page_size(3).status("draft") },
            )
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);

        let searched = backend
            .list(ResourceKind::PurchaseOrders, &ListQuery::default().keyword("coatex"))
            .await
            .unwrap();
        assert_eq!(searched.total, 1);
    }
}
