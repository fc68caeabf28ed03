//! # ecnflow-contracts
//!
//! Shared types, request bodies, and error contracts for the ecnflow
//! approval client.
//!
//! All crates in the workspace import from here. Apart from form validation
//! no logic lives in this crate: routing, approval matrices, and kit-rate
//! figures are owned by the backend and only ever appear here as data.

pub mod approval;
pub mod error;
pub mod ids;
pub mod page;
pub mod toast;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use approval::{
        require_comment, ActionKind, ApprovalRecord, ApprovalStatus, BatchSubmitRequest,
        DelegateRequest, PendingAction,
    };
    use error::EcnflowError;
    use ids::{DialogSessionId, EcnId, InstanceId, UserId};
    use page::{ListQuery, Page, ResourceKind};

    // ── Validation ───────────────────────────────────────────────────────────

    #[test]
    fn blank_comment_is_rejected() {
        assert!(require_comment("").is_err());
        assert!(require_comment("   \n\t").is_err());
        assert!(require_comment("ok").is_ok());
    }

    #[test]
    fn pending_action_starts_with_empty_comment() {
        let pending = PendingAction::new(ActionKind::Reject);
        assert_eq!(pending.action, ActionKind::Reject);
        assert!(pending.comment.is_empty());

        match pending.validate() {
            Err(EcnflowError::Validation { field, .. }) => assert_eq!(field, "comment"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn delegate_request_requires_comment() {
        let request = DelegateRequest {
            delegate_to_id: UserId(7),
            comment: " ".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn batch_request_checks_selection_before_comment() {
        let request = BatchSubmitRequest {
            ecn_ids: vec![],
            comment: String::new(),
        };
        match request.validate() {
            Err(EcnflowError::Validation { field, .. }) => assert_eq!(field, "ecn_ids"),
            other => panic!("expected Validation on ecn_ids, got {:?}", other),
        }
    }

    // ── Wire shapes ──────────────────────────────────────────────────────────

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let body = BatchSubmitRequest {
            ecn_ids: vec![EcnId(1), EcnId(2), EcnId(3)],
            comment: "Q1 batch".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({ "ecn_ids": [1, 2, 3], "comment": "Q1 batch" }));
    }

    #[test]
    fn delegate_body_uses_delegate_to_id() {
        let body = DelegateRequest {
            delegate_to_id: UserId(42),
            comment: "out of office".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["delegate_to_id"], json!(42));
    }

    #[test]
    fn approval_record_tolerates_missing_optional_fields() {
        let record: ApprovalRecord = serde_json::from_value(json!({
            "id": 11,
            "status": "pending",
            "approver": "J. Ortega"
        }))
        .unwrap();

        assert_eq!(record.id, InstanceId(11));
        assert_eq!(record.status, ApprovalStatus::Pending);
        assert!(record.conditions.is_empty());
        assert!(record.attachments.is_empty());
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: ApprovalStatus = serde_json::from_value(json!("on_hold")).unwrap();
        assert_eq!(status, ApprovalStatus::Other("on_hold".to_string()));
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("on_hold"));
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        let status: ApprovalStatus = serde_json::from_value(json!("APPROVED")).unwrap();
        assert_eq!(status, ApprovalStatus::Approved);
    }

    #[test]
    fn page_envelope_decodes() {
        let page: Page<ApprovalRecord> = serde_json::from_value(json!({
            "items": [{ "id": 1, "status": "approved", "approver": "A" }],
            "total": 40
        }))
        .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total, 40);
    }

    // ── ListQuery / ResourceKind ─────────────────────────────────────────────

    #[test]
    fn list_query_defaults_and_pairs() {
        let query = ListQuery::default().status("pending");
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "1".to_string()),
                ("page_size", "20".to_string()),
                ("status", "pending".to_string()),
            ]
        );
    }

    #[test]
    fn resource_paths_are_distinct() {
        let paths: std::collections::HashSet<&str> =
            ResourceKind::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(paths.len(), ResourceKind::ALL.len());
        assert_eq!(ResourceKind::PurchaseOrders.to_string(), "purchase-orders");
    }

    #[test]
    fn dialog_session_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| DialogSessionId::new().to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── Error display / user messages ────────────────────────────────────────

    #[test]
    fn api_error_user_message_is_server_detail() {
        let err = EcnflowError::Api {
            status: 409,
            message: "ECN already approved".to_string(),
        };
        assert_eq!(err.user_message(), "ECN already approved");
        assert!(err.to_string().contains("409"));
        assert!(!err.is_client_side());
    }

    #[test]
    fn validation_error_is_client_side() {
        let err = EcnflowError::validation("comment", "a comment is required");
        assert!(err.is_client_side());
        assert!(err.to_string().contains("comment"));
        assert_eq!(err.user_message(), "a comment is required");
    }

    #[test]
    fn config_error_display() {
        let err = EcnflowError::ConfigError {
            reason: "missing base_url".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("missing base_url"));
    }
}
