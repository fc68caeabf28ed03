//! Recording mocks shared by the controller and batch tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ecnflow_contracts::{
    error::{EcnflowError, EcnflowResult},
    ids::{EcnId, InstanceId, UserId},
    page::{ListQuery, Page, ResourceKind},
    toast::{Toast, ToastLevel},
};

use crate::traits::{ApprovalGateway, ListRefresher, ListSource, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GatewayCall {
    Approve { instance: InstanceId, comment: String },
    Reject { instance: InstanceId, comment: String },
    Delegate { instance: InstanceId, delegate_to: UserId, comment: String },
    BatchSubmit { ecn_ids: Vec<EcnId>, comment: String },
}

/// A gateway that records every call and answers with a fixed result.
pub(crate) struct MockGateway {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    failure: Option<(u16, String)>,
}

impl MockGateway {
    pub(crate) fn succeeding() -> Self {
        Self { calls: Arc::new(Mutex::new(vec![])), failure: None }
    }

    pub(crate) fn failing(status: u16, message: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(vec![])),
            failure: Some((status, message.to_string())),
        }
    }

    pub(crate) fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) -> EcnflowResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, message)) => Err(EcnflowError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ApprovalGateway for MockGateway {
    async fn approve(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()> {
        self.record(GatewayCall::Approve { instance, comment: comment.to_string() })
    }

    async fn reject(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()> {
        self.record(GatewayCall::Reject { instance, comment: comment.to_string() })
    }

    async fn delegate(
        &self,
        instance: InstanceId,
        delegate_to: UserId,
        comment: &str,
    ) -> EcnflowResult<()> {
        self.record(GatewayCall::Delegate {
            instance,
            delegate_to,
            comment: comment.to_string(),
        })
    }

    async fn batch_submit(&self, ecn_ids: &[EcnId], comment: &str) -> EcnflowResult<()> {
        self.record(GatewayCall::BatchSubmit {
            ecn_ids: ecn_ids.to_vec(),
            comment: comment.to_string(),
        })
    }
}

/// A gateway whose calls never complete, for exercising dropped submits.
pub(crate) struct HangingGateway;

#[async_trait]
impl ApprovalGateway for HangingGateway {
    async fn approve(&self, _instance: InstanceId, _comment: &str) -> EcnflowResult<()> {
        std::future::pending().await
    }

    async fn reject(&self, _instance: InstanceId, _comment: &str) -> EcnflowResult<()> {
        std::future::pending().await
    }

    async fn delegate(
        &self,
        _instance: InstanceId,
        _delegate_to: UserId,
        _comment: &str,
    ) -> EcnflowResult<()> {
        std::future::pending().await
    }

    async fn batch_submit(&self, _ecn_ids: &[EcnId], _comment: &str) -> EcnflowResult<()> {
        std::future::pending().await
    }
}

/// Counts refreshes; optionally fails every one.
pub(crate) struct MockRefresher {
    count: Arc<Mutex<u32>>,
    fail: bool,
}

impl MockRefresher {
    pub(crate) fn new() -> Self {
        Self { count: Arc::new(Mutex::new(0)), fail: false }
    }

    pub(crate) fn failing() -> Self {
        Self { count: Arc::new(Mutex::new(0)), fail: true }
    }

    pub(crate) fn count(&self) -> u32 {
        *self.count.lock().unwrap()
    }
}

#[async_trait]
impl ListRefresher for MockRefresher {
    async fn refresh(&self) -> EcnflowResult<()> {
        *self.count.lock().unwrap() += 1;
        if self.fail {
            return Err(EcnflowError::Transport { reason: "connection reset".to_string() });
        }
        Ok(())
    }
}

pub(crate) struct MockNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl MockNotifier {
    pub(crate) fn new() -> Self {
        Self { toasts: Arc::new(Mutex::new(vec![])) }
    }

    pub(crate) fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub(crate) fn levels(&self) -> Vec<ToastLevel> {
        self.toasts().into_iter().map(|t| t.level).collect()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

/// A list source serving a fixed page and counting queries.
pub(crate) struct MockSource {
    pub(crate) page: Page<serde_json::Value>,
    pub(crate) queries: Arc<Mutex<Vec<(ResourceKind, ListQuery)>>>,
}

impl MockSource {
    pub(crate) fn new(page: Page<serde_json::Value>) -> Self {
        Self { page, queries: Arc::new(Mutex::new(vec![])) }
    }
}

#[async_trait]
impl ListSource for MockSource {
    async fn list(
        &self,
        kind: ResourceKind,
        query: &ListQuery,
    ) -> EcnflowResult<Page<serde_json::Value>> {
        self.queries.lock().unwrap().push((kind, query.clone()));
        Ok(self.page.clone())
    }
}
