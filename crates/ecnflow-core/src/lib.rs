//! # ecnflow-core
//!
//! Client-side coordination of approval actions.
//!
//! This crate provides:
//! - The seam traits (`ApprovalGateway`, `ListSource`, `ListRefresher`, `Notifier`)
//! - `ActionDialogController`, which drives one approve / reject / delegate
//!   dialog from open to submit
//! - `BatchSubmitController` and `BatchSelection` for multi-row submits
//! - `PageRefresher`, the standard full re-fetch refresher
//!
//! The controllers never decide who may approve or what a rejection does.
//! They validate the form, send one request, and report what the backend said.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ecnflow_core::{ActionDialogController, traits::{ApprovalGateway, ListRefresher, Notifier}};
//! ```

pub mod batch;
pub mod controller;
pub mod dialog;
pub mod refresher;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchSelection, BatchSubmitController};
pub use controller::{ActionDialogController, SubmitOutcome, Submission};
pub use dialog::{DialogState, FormRequest};
pub use refresher::{decode_page, PageRefresher};
