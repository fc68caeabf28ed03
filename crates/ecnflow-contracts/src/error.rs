//! Error types for the ecnflow client.
//!
//! Every fallible operation returns `EcnflowResult<T>`. Variants split along
//! the two failure classes a user can see: client-side validation (no request
//! was sent) and backend/transport failure (a request was sent and failed).

use thiserror::Error;

/// The unified error type for the ecnflow crates.
#[derive(Debug, Error)]
pub enum EcnflowError {
    /// A required form field was missing or blank. No request was issued.
    #[error("validation failed on '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A submit was attempted while the previous one is still in flight.
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// An edit or submit was attempted with no dialog open.
    #[error("no dialog is open")]
    NoDialogOpen,

    /// The edit does not apply to the dialog that is currently open.
    #[error("invalid edit: {reason}")]
    InvalidEdit { reason: String },

    /// The backend answered with a non-success status.
    ///
    /// `message` is the server's `detail` when one was provided.
    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("transport error: {reason}")]
    Transport { reason: String },

    /// A success response could not be decoded into the expected shape.
    #[error("decode error: {reason}")]
    Decode { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl EcnflowError {
    /// Build a `Validation` error for `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The text a user sees in a toast for this error.
    ///
    /// Backend failures show the server's message verbatim; everything else
    /// falls back to the `Display` rendering.
    pub fn user_message(&self) -> String {
        match self {
            EcnflowError::Api { message, .. } => message.clone(),
            EcnflowError::Transport { reason } => reason.clone(),
            EcnflowError::Validation { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// True for errors raised before any request left the client.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            EcnflowError::Validation { .. }
                | EcnflowError::AlreadySubmitting
                | EcnflowError::NoDialogOpen
                | EcnflowError::InvalidEdit { .. }
        )
    }
}

/// Convenience alias used throughout the ecnflow crates.
pub type EcnflowResult<T> = Result<T, EcnflowError>;
