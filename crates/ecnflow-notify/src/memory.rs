//! In-memory implementation of `Notifier`.
//!
//! `InMemoryNotifier` keeps every toast in a `Vec` behind a `Mutex`, stamped
//! with a sequence number and the time it was raised. Hosts that render
//! toasts themselves drain it with `take()`; tests and the demo read it with
//! `entries()`.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecnflow_contracts::toast::{Toast, ToastLevel};
use ecnflow_core::traits::Notifier;

/// One recorded toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastEntry {
    /// Position in the log, starting at 0. Not reset by `take()`.
    pub sequence: u64,
    pub toast: Toast,
    pub raised_at: DateTime<Utc>,
}

#[derive(Default)]
pub(crate) struct InMemoryState {
    pub(crate) entries: Vec<ToastEntry>,
    pub(crate) sequence: u64,
}

/// A notifier that records toasts for later display or inspection.
///
/// Cloning shares the same log.
#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every toast currently held, oldest first.
    pub fn entries(&self) -> Vec<ToastEntry> {
        self.state
            .lock()
            .map(|state| state.entries.clone())
            .unwrap_or_default()
    }

    /// Remove and return every held toast.
    pub fn take(&self) -> Vec<ToastEntry> {
        self.state
            .lock()
            .map(|mut state| std::mem::take(&mut state.entries))
            .unwrap_or_default()
    }

    /// The most recent toast, if any.
    pub fn last(&self) -> Option<Toast> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.entries.last().map(|e| e.toast.clone()))
    }

    pub fn count_level(&self, level: ToastLevel) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.toast.level == level)
            .count()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, toast: Toast) {
        // A poisoned log only loses the toast; it must not take the caller down.
        if let Ok(mut state) = self.state.lock() {
            let sequence = state.sequence;
            state.sequence += 1;
            state.entries.push(ToastEntry {
                sequence,
                toast,
                raised_at: Utc::now(),
            });
        }
    }
}
