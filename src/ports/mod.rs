//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssessmentApi` - the risk backend (create + personalize)
//! - `Notifier` - transient toasts shown to the user

mod assessment_api;
mod notifier;

pub use assessment_api::{ApiError, AssessmentApi};
pub use notifier::{Notifier, Toast, ToastLevel};
