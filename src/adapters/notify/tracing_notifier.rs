//! Notifier that writes toasts to the tracing log.

use crate::ports::{Notifier, Toast, ToastLevel};

/// Logs each toast at a level matching its severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => tracing::warn!(message = %toast.message, "toast"),
            ToastLevel::Info | ToastLevel::Success => {
                tracing::info!(message = %toast.message, "toast")
            }
        }
    }
}
