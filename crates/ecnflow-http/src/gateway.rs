//! HTTP implementation of the approval gateway and list source.
//!
//! One `reqwest::Client` is built per gateway from `ClientConfig`. Each
//! trait method maps to exactly one request: no retry, no idempotency key.
//! A non-2xx response becomes `EcnflowError::Api` carrying the server's
//! `detail`; a request that never got a response becomes `Transport`.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use ecnflow_config::ClientConfig;
use ecnflow_contracts::{
    approval::{ActionKind, ApprovalDecision, BatchSubmitRequest, DelegateRequest},
    error::{EcnflowError, EcnflowResult},
    ids::{EcnId, InstanceId, UserId},
    page::{ListQuery, Page, ResourceKind},
};
use ecnflow_core::traits::{ApprovalGateway, ListSource};

use crate::detail::{error_from_response, error_from_transport};

/// Path of the batch submit endpoint, relative to the API root.
pub const BATCH_SUBMIT_PATH: &str = "/ecns/batch-submit";

/// `/approvals/{id}/{action}`.
pub fn approval_action_path(instance: InstanceId, action: ActionKind) -> String {
    format!("/approvals/{}/{}", instance, action.as_str())
}

/// Talks to the REST backend.
pub struct HttpGateway {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Build the HTTP client from `config`.
    ///
    /// The request timeout is only set when configured; otherwise the
    /// client's default applies.
    pub fn new(config: ClientConfig) -> EcnflowResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| EcnflowError::ConfigError {
            reason: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for `path` under the configured API root.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_root(), path)
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> EcnflowResult<()>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(error_from_transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let err = error_from_response(status, &text);
        warn!(url = %url, status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }

    async fn decide(
        &self,
        instance: InstanceId,
        action: ActionKind,
        comment: &str,
    ) -> EcnflowResult<()> {
        let body = ApprovalDecision {
            comment: comment.to_string(),
        };
        self.post_json(&approval_action_path(instance, action), &body)
            .await
    }
}

#[async_trait]
impl ApprovalGateway for HttpGateway {
    async fn approve(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()> {
        self.decide(instance, ActionKind::Approve, comment).await
    }

    async fn reject(&self, instance: InstanceId, comment: &str) -> EcnflowResult<()> {
        self.decide(instance, ActionKind::Reject, comment).await
    }

    async fn delegate(
        &self,
        instance: InstanceId,
        delegate_to: UserId,
        comment: &str,
    ) -> EcnflowResult<()> {
        let body = DelegateRequest {
            delegate_to_id: delegate_to,
            comment: comment.to_string(),
        };
        self.post_json(&approval_action_path(instance, ActionKind::Delegate), &body)
            .await
    }

    async fn batch_submit(&self, ecn_ids: &[EcnId], comment: &str) -> EcnflowResult<()> {
        let body = BatchSubmitRequest {
            ecn_ids: ecn_ids.to_vec(),
            comment: comment.to_string(),
        };
        self.post_json(BATCH_SUBMIT_PATH, &body).await
    }
}

#[async_trait]
impl ListSource for HttpGateway {
    async fn list(
        &self,
        kind: ResourceKind,
        query: &ListQuery,
    ) -> EcnflowResult<Page<serde_json::Value>> {
        let url = self.url(kind.path());
        debug!(url = %url, page = query.page, page_size = query.page_size, "GET");

        let response = self
            .client
            .get(&url)
            .query(&query.to_pairs())
            .send()
            .await
            .map_err(error_from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &text));
        }

        response
            .json::<Page<serde_json::Value>>()
            .await
            .map_err(|e| EcnflowError::Decode {
                reason: format!("{} did not return an {{items, total}} envelope: {}", kind, e),
            })
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use ecnflow_config::ClientConfig;
    use ecnflow_contracts::{
        approval::ActionKind,
        error::EcnflowError,
        ids::{EcnId, InstanceId, UserId},
        page::{ListQuery, ResourceKind},
    };
    use ecnflow_core::traits::{ApprovalGateway, ListSource};

    use super::{approval_action_path, HttpGateway};

    /// Accept one connection, answer with `status_line` and `body`, and
    /// return the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });

        (base_url, handle)
    }

    fn gateway(base_url: &str) -> HttpGateway {
        HttpGateway::new(ClientConfig::with_base_url(format!("{}/api/v1/", base_url))).unwrap()
    }

    #[test]
    fn action_paths() {
        assert_eq!(
            approval_action_path(InstanceId(12), ActionKind::Approve),
            "/approvals/12/approve"
        );
        assert_eq!(
            approval_action_path(InstanceId(12), ActionKind::Delegate),
            "/approvals/12/delegate"
        );
    }

    #[test]
    fn url_joins_without_double_slash() {
        let gw = gateway("http://localhost:8000");
        assert_eq!(gw.url("/ecns"), "http://localhost:8000/api/v1/ecns");
    }

    #[test]
    fn invalid_config_is_refused() {
        let result = HttpGateway::new(ClientConfig::with_base_url("localhost"));
        assert!(matches!(result, Err(EcnflowError::ConfigError { .. })));
    }

    #[tokio::test]
    async fn approve_posts_comment_to_action_path() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        gateway(&base_url)
            .approve(InstanceId(7), "approved, proceed")
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/v1/approvals/7/approve HTTP/1.1"), "{request}");
        assert!(request.ends_with(r#"{"comment":"approved, proceed"}"#), "{request}");
    }

    #[tokio::test]
    async fn delegate_posts_target_and_comment() {
        let (base_url, server) = serve_once("204 No Content", "").await;
        gateway(&base_url)
            .delegate(InstanceId(8), UserId(31), "on leave")
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/v1/approvals/8/delegate"));
        assert!(request.ends_with(r#"{"delegate_to_id":31,"comment":"on leave"}"#), "{request}");
    }

    #[tokio::test]
    async fn batch_submit_posts_all_ids() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        gateway(&base_url)
            .batch_submit(&[EcnId(1), EcnId(2), EcnId(3)], "Q1 batch")
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/v1/ecns/batch-submit"));
        assert!(request.ends_with(r#"{"ecn_ids":[1,2,3],"comment":"Q1 batch"}"#), "{request}");
    }

    #[tokio::test]
    async fn server_detail_is_surfaced() {
        let (base_url, server) =
            serve_once("403 Forbidden", r#"{"detail":"You are not an approver for this step"}"#)
                .await;
        let err = gateway(&base_url)
            .reject(InstanceId(9), "no")
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            EcnflowError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "You are not an approver for this step");
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_sends_query_and_decodes_envelope() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"items":[{"id":1},{"id":2}],"total":57}"#).await;
        let page = gateway(&base_url)
            .list(ResourceKind::PurchaseOrders, &ListQuery::with_page_size(2).status("open"))
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 57);

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /api/v1/purchase-orders?page=1&page_size=2&status=open "),
            "{request}"
        );
    }

    #[tokio::test]
    async fn list_rejects_body_without_envelope() {
        let (base_url, server) = serve_once("200 OK", r#"[{"id":1}]"#).await;
        let err = gateway(&base_url)
            .list(ResourceKind::Ecns, &ListQuery::default())
            .await
            .unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, EcnflowError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = gateway(&base_url)
            .approve(InstanceId(1), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, EcnflowError::Transport { .. }), "{err:?}");
    }
}
