//! Adapters - Implementations of port interfaces.
//!
//! - `api` - reqwest backend client and an in-memory mock
//! - `notify` - toast sinks (tracing log, in-memory recorder)

pub mod api;
pub mod notify;

pub use api::{HttpAssessmentApi, MockAssessmentApi, MockCall};
pub use notify::{RecordingNotifier, TracingNotifier};
