//! # ecnflow-config
//!
//! TOML configuration for the ecnflow approval client.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use ecnflow_config::ClientConfig;
//!
//! let config = ClientConfig::from_file(Path::new("ecnflow.toml"))?;
//! // Pass `config` to `ecnflow_http::HttpGateway::new(...)`.
//! ```
//!
//! Only `base_url` is required; everything else has a default.

pub mod client;

pub use client::{ClientConfig, MAX_PAGE_SIZE};

// ── Tests ─────────────────────────────────────────────────────────────────────
