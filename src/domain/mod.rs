//! Domain layer containing the wizard logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, percentage, errors, auth context)
//! - `profile` - Stored user profile, age and risk region
//! - `questionnaire` - Answers, questions, sequencing, completion, sync rules
//! - `submission` - Payload building, submission lifecycle, progress

pub mod foundation;
pub mod profile;
pub mod questionnaire;
pub mod submission;
