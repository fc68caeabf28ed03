//! # ecnflow-ref
//!
//! Offline reference runtime for the ecnflow approval client.
//!
//! Provides an in-process backend over fictional plant data and four
//! scenarios that exercise the dialog and batch controllers end to end:
//!
//! 1. **Approve** - a successful approval followed by a 409 on the repeat.
//! 2. **Delegate** - the delegate check, then a reassignment.
//! 3. **Batch submit** - three draft ECNs submitted in one request.
//! 4. **Failure** - a 503 on reject, with the dialog closed afterwards.
//!
//! All data is hardcoded and fictional. No network calls are made.

use ecnflow_contracts::toast::ToastLevel;
use ecnflow_notify::InMemoryNotifier;

pub mod backend;
pub mod mock_data;
pub mod scenarios;

pub use backend::{InMemoryBackend, ReceivedCall};

/// Print every toast raised so far, oldest first.
pub fn print_toasts(notifier: &InMemoryNotifier) {
    let entries = notifier.entries();
    if entries.is_empty() {
        println!("  Toasts: (none)");
        return;
    }
    println!("  Toasts:");
    for entry in entries {
        let tag = match entry.toast.level {
            ToastLevel::Success => "ok",
            ToastLevel::Info => "info",
            ToastLevel::Warning => "warn",
            ToastLevel::Error => "error",
        };
        println!("    [{:>2}] {:<5} {}", entry.sequence, tag, entry.toast.message);
    }
}
