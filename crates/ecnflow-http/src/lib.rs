//! # ecnflow-http
//!
//! The live backend for the ecnflow controllers.
//!
//! [`HttpGateway`] implements both
//! [`ApprovalGateway`](ecnflow_core::traits::ApprovalGateway) and
//! [`ListSource`](ecnflow_core::traits::ListSource) over `reqwest`. Error
//! bodies are mined for the server's `detail` message so the user sees what
//! the backend said rather than a bare status code.
//!
//! ```rust,ignore
//! use ecnflow_config::ClientConfig;
//! use ecnflow_http::HttpGateway;
//!
//! let gateway = HttpGateway::new(ClientConfig::from_file(path)?)?;
//! gateway.approve(InstanceId(42), "approved, proceed").await?;
//! ```

pub mod detail;
pub mod gateway;

pub use detail::{error_from_response, extract_detail};
pub use gateway::{approval_action_path, HttpGateway, BATCH_SUBMIT_PATH};
