//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait, the auth
//! context and error types shared by the questionnaire and submission
//! modules.

mod auth;
mod errors;
mod ids;
mod percentage;
mod state_machine;

pub use auth::{AuthContext, AuthError};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AssessmentSlug, SubmissionId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
