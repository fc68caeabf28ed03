//! # ecnflow-notify
//!
//! `Notifier` implementations for the ecnflow controllers.
//!
//! Toasts are an injected capability: each controller call receives the
//! notifier to report through, so a UI host, the demo CLI, and tests can all
//! route them differently.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ecnflow_notify::{FanoutNotifier, InMemoryNotifier, TracingNotifier};
//!
//! let log = InMemoryNotifier::new();
//! let notifier = FanoutNotifier::new()
//!     .with(Arc::new(log.clone()))
//!     .with(Arc::new(TracingNotifier));
//! dialog.submit(&gateway, &refresher, &notifier).await?;
//! for entry in log.take() { /* render */ }
//! ```

pub mod memory;
pub mod sink;

pub use memory::{InMemoryNotifier, ToastEntry};
pub use sink::{FanoutNotifier, TracingNotifier};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ecnflow_contracts::toast::{Toast, ToastLevel};
    use ecnflow_core::traits::Notifier;

    use super::{FanoutNotifier, InMemoryNotifier, TracingNotifier};

    #[test]
    fn entries_are_sequenced_in_order() {
        let log = InMemoryNotifier::new();
        log.notify(Toast::warning("a comment is required"));
        log.notify(Toast::success("Approval 4 approved"));
        log.notify(Toast::error("backend down"));

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        for (idx, entry) in entries.iter().enumerate() {
            assert_eq!(entry.sequence, idx as u64);
        }
        assert_eq!(entries[1].toast.level, ToastLevel::Success);
        assert_eq!(log.count_level(ToastLevel::Error), 1);
    }

    #[test]
    fn take_drains_but_keeps_sequence_running() {
        let log = InMemoryNotifier::new();
        log.notify(Toast::info("one"));
        log.notify(Toast::info("two"));

        assert_eq!(log.take().len(), 2);
        assert!(log.is_empty());

        log.notify(Toast::info("three"));
        assert_eq!(log.entries()[0].sequence, 2);
    }

    #[test]
    fn clones_share_one_log() {
        let log = InMemoryNotifier::new();
        let handle = log.clone();
        log.notify(Toast::success("done"));
        assert_eq!(handle.last(), Some(Toast::success("done")));
    }

    #[test]
    fn fanout_reaches_every_sink() {
        let first = InMemoryNotifier::new();
        let second = InMemoryNotifier::new();
        let fanout = FanoutNotifier::new()
            .with(Arc::new(first.clone()))
            .with(Arc::new(TracingNotifier))
            .with(Arc::new(second.clone()));

        fanout.notify(Toast::error("HTTP 502 Bad Gateway"));

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn empty_log() {
        let log = InMemoryNotifier::new();
        assert!(log.is_empty());
        assert_eq!(log.last(), None);
        assert!(log.take().is_empty());
    }
}
