//! Notifiers that forward toasts elsewhere.

use std::sync::Arc;

use tracing::{error, info, warn};

use ecnflow_contracts::toast::{Toast, ToastLevel};
use ecnflow_core::traits::Notifier;

/// Emits each toast as a `tracing` event at a matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success | ToastLevel::Info => {
                info!(toast_level = ?toast.level, text = %toast.message, "toast")
            }
            ToastLevel::Warning => warn!(text = %toast.message, "toast"),
            ToastLevel::Error => error!(text = %toast.message, "toast"),
        }
    }
}

/// Sends every toast to each inner notifier in order.
#[derive(Clone, Default)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn Notifier>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&self, toast: Toast) {
        for sink in &self.sinks {
            sink.notify(toast.clone());
        }
    }
}
