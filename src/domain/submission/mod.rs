//! Submission module - turning answers into backend requests.
//!
//! - `payload` - answer state → request body
//! - `status` - submission lifecycle state machine
//! - `progress` - synthetic progress bar model

mod payload;
mod progress;
mod status;

pub use payload::{backend_key, build_payload, AssessmentPayload, PayloadError};
pub use progress::{ProgressPhase, SyntheticProgress};
pub use status::SubmissionStatus;
