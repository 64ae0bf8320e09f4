//! Notifier that keeps every toast, for tests.

use std::sync::{Arc, Mutex};

use crate::ports::{Notifier, Toast};

/// Records toasts in memory. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().ok().and_then(|t| t.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}
