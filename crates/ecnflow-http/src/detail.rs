//! Turning a failed HTTP response into a user-facing message.
//!
//! The backend reports failures as JSON with a `detail` field. Usually it is
//! a plain string; request-validation failures carry a list of
//! `{loc, msg, type}` objects instead. When no usable detail is present the
//! message falls back to the status line.

use reqwest::StatusCode;
use serde_json::Value;

use ecnflow_contracts::error::EcnflowError;

/// Pull the message out of an error body, if it has one.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(entries) => {
            let msgs: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                Some(Value::Array(entries.clone()).to_string())
            } else {
                Some(msgs.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

/// The `EcnflowError::Api` for a non-success response.
pub fn error_from_response(status: StatusCode, body: &str) -> EcnflowError {
    let message = extract_detail(body).unwrap_or_else(|| status_fallback(status));
    EcnflowError::Api {
        status: status.as_u16(),
        message,
    }
}

fn status_fallback(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// Map a transport-level failure (no response received).
pub fn error_from_transport(err: reqwest::Error) -> EcnflowError {
    let reason = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("could not connect: {}", err)
    } else {
        err.to_string()
    };
    EcnflowError::Transport { reason }
}
