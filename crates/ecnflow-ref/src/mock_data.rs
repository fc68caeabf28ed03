//! Fictional plant data for the reference backend.
//!
//! Everything here is hardcoded. No external system is contacted. Ids are
//! stable so scenarios and tests can refer to them directly.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use ecnflow_contracts::{
    approval::{ApprovalRecord, ApprovalStatus, Attachment},
    ids::{EcnId, InstanceId, UserId},
};

/// People who can be picked as a delegate.
pub fn users() -> Vec<(UserId, &'static str)> {
    vec![
        (UserId(11), "K. Lindqvist"),
        (UserId(12), "M. Osei"),
        (UserId(13), "R. Tanaka"),
        (UserId(14), "J. Ortega"),
    ]
}

// ── Approvals ────────────────────────────────────────────────────────────────

/// Pending and decided approvals, one per ECN.
pub fn approvals() -> Vec<ApprovalRecord> {
    let at = |day: u32, hour: u32| Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).single();

    vec![
        ApprovalRecord {
            id: InstanceId(1001),
            status: ApprovalStatus::Pending,
            approver: "K. Lindqvist".to_string(),
            comment: None,
            conditions: vec![],
            attachments: vec![Attachment {
                name: "ECN-2026-014-redline.pdf".to_string(),
                url: "https://files.example.invalid/ecn/2026-014/redline.pdf".to_string(),
            }],
            ecn_id: Some(EcnId(14)),
            title: Some("Replace M6 fasteners on gearbox housing with M8".to_string()),
            updated_at: at(2, 9),
        },
        ApprovalRecord {
            id: InstanceId(1002),
            status: ApprovalStatus::Pending,
            approver: "M. Osei".to_string(),
            comment: None,
            conditions: vec![],
            attachments: vec![],
            ecn_id: Some(EcnId(15)),
            title: Some("Change conformal coating supplier for controller PCB".to_string()),
            updated_at: at(3, 14),
        },
        ApprovalRecord {
            id: InstanceId(1003),
            status: ApprovalStatus::Approved,
            approver: "R. Tanaka".to_string(),
            comment: Some("approved with conditions".to_string()),
            conditions: vec![
                "Use remaining stock of rev B housings first".to_string(),
                "Update work instruction WI-220 before line release".to_string(),
            ],
            attachments: vec![],
            ecn_id: Some(EcnId(12)),
            title: Some("Tighten tolerance on shaft bore to H7".to_string()),
            updated_at: at(1, 16),
        },
        ApprovalRecord {
            id: InstanceId(1004),
            status: ApprovalStatus::Pending,
            approver: "J. Ortega".to_string(),
            comment: None,
            conditions: vec![],
            attachments: vec![],
            ecn_id: Some(EcnId(16)),
            title: Some("Add strain relief to sensor harness".to_string()),
            updated_at: at(4, 10),
        },
    ]
}

// ── ECNs ─────────────────────────────────────────────────────────────────────

/// ECN list rows. Drafts can be batch-submitted.
pub fn ecns() -> Vec<Value> {
    vec![
        json!({ "id": 12, "code": "ECN-2026-012", "title": "Tighten tolerance on shaft bore to H7", "status": "approved" }),
        json!({ "id": 14, "code": "ECN-2026-014", "title": "Replace M6 fasteners on gearbox housing with M8", "status": "evaluating" }),
        json!({ "id": 15, "code": "ECN-2026-015", "title": "Change conformal coating supplier for controller PCB", "status": "evaluating" }),
        json!({ "id": 16, "code": "ECN-2026-016", "title": "Add strain relief to sensor harness", "status": "evaluating" }),
        json!({ "id": 21, "code": "ECN-2026-021", "title": "Switch label stock to polyester", "status": "draft" }),
        json!({ "id": 22, "code": "ECN-2026-022", "title": "Remove obsolete jumper J4 from rev C board", "status": "draft" }),
        json!({ "id": 23, "code": "ECN-2026-023", "title": "Revise torque spec on motor mount", "status": "draft" }),
        json!({ "id": 24, "code": "ECN-2026-024", "title": "Move serial plate to left panel", "status": "draft" }),
    ]
}

/// The three drafts the batch scenario submits.
pub fn q1_drafts() -> [EcnId; 3] {
    [EcnId(21), EcnId(22), EcnId(23)]
}

// ── Other list screens ───────────────────────────────────────────────────────

pub fn evaluations() -> Vec<Value> {
    vec![
        json!({ "id": 501, "ecn_id": 14, "department": "quality", "status": "pending", "cost_impact": 1200.0 }),
        json!({ "id": 502, "ecn_id": 14, "department": "production", "status": "done", "cost_impact": 0.0 }),
        json!({ "id": 503, "ecn_id": 15, "department": "purchasing", "status": "pending", "cost_impact": 3400.0 }),
    ]
}

pub fn tasks() -> Vec<Value> {
    vec![
        json!({ "id": 701, "ecn_id": 12, "title": "Update drawing 40-1187 to rev D", "status": "in_progress", "assignee_id": 13 }),
        json!({ "id": 702, "ecn_id": 12, "title": "Quarantine rev C shafts", "status": "todo", "assignee_id": 12 }),
    ]
}

pub fn purchase_orders() -> Vec<Value> {
    vec![
        json!({ "id": 9001, "po_no": "PO-26-0311", "supplier": "Nordic Fasteners AB", "status": "open", "amount": 4820.50 }),
        json!({ "id": 9002, "po_no": "PO-26-0312", "supplier": "Coatex GmbH", "status": "approved", "amount": 12900.00 }),
        json!({ "id": 9003, "po_no": "PO-26-0315", "supplier": "Harness Works Ltd", "status": "open", "amount": 760.00 }),
    ]
}

/// Dispatch orders carry the server-computed kit rate as a display value.
pub fn dispatch_orders() -> Vec<Value> {
    vec![
        json!({ "id": 3101, "order_no": "DO-0419", "site": "Line 3", "stage": "frame", "kit_rate": 100.0, "status": "dispatched" }),
        json!({ "id": 3102, "order_no": "DO-0420", "site": "Line 3", "stage": "wiring", "kit_rate": 82.5, "status": "waiting" }),
        json!({ "id": 3103, "order_no": "DO-0421", "site": "Customer site Aarhus", "stage": "commissioning", "kit_rate": 40.0, "status": "waiting" }),
    ]
}

pub fn issue_templates() -> Vec<Value> {
    vec![
        json!({ "id": 41, "name": "Supplier non-conformance", "category": "quality" }),
        json!({ "id": 42, "name": "Field failure report", "category": "service" }),
    ]
}

pub fn sales_templates() -> Vec<Value> {
    vec![
        json!({ "id": 61, "name": "Standard gearbox quote", "options": ["ratio", "mounting", "paint"] }),
    ]
}
