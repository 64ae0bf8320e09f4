//! Assessment API Port - Interface to the risk backend.
//!
//! Submitting the wizard makes two strictly ordered calls:
//!
//! 1. `create_assessment` posts the answer payload and returns the slug of
//!    the new assessment
//! 2. `personalize_assessment` asks the backend to generate the personal
//!    program for that slug
//!
//! Response bodies are an opaque contract: only `assessment_slug` from the
//! first call is read.
//!
//! # Example
//!
//! ```ignore
//! let slug = api.create_assessment(&auth, &payload, &submission_id).await?;
//! api.personalize_assessment(&auth, &slug, &submission_id).await?;
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{AssessmentSlug, AuthContext, AuthError, SubmissionId};
use crate::domain::submission::AssessmentPayload;

/// Port for the risk-assessment backend.
#[async_trait]
pub trait AssessmentApi: Send + Sync {
    /// Creates a risk assessment from the answer payload.
    async fn create_assessment(
        &self,
        auth: &AuthContext,
        payload: &AssessmentPayload,
        submission_id: &SubmissionId,
    ) -> Result<AssessmentSlug, ApiError>;

    /// Personalizes a previously created assessment.
    async fn personalize_assessment(
        &self,
        auth: &AuthContext,
        slug: &AssessmentSlug,
        submission_id: &SubmissionId,
    ) -> Result<(), ApiError>;
}

/// Errors from backend calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Token rejected by the backend.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// Request did not finish within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Backend refused the request (4xx other than 401).
    #[error("request rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// Backend failed (5xx).
    #[error("server error {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// Success status, but the body was not what we expected.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Maps a non-success HTTP status to the matching error.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 => Self::Unauthorized(AuthError::InvalidToken),
            500..=599 => Self::Server { status, body },
            _ => Self::Rejected { status, body },
        }
    }

    /// Returns true if the same request might succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout { .. } | ApiError::Network(_) | ApiError::Server { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_classifies_codes() {
        assert_eq!(
            ApiError::from_status(401, ""),
            ApiError::Unauthorized(AuthError::InvalidToken)
        );
        assert!(matches!(
            ApiError::from_status(422, "bad"),
            ApiError::Rejected { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_status(503, "down"),
            ApiError::Server { status: 503, .. }
        ));
    }

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(ApiError::Timeout { timeout_secs: 30 }.is_retryable());
        assert!(ApiError::network("reset").is_retryable());
        assert!(ApiError::from_status(502, "").is_retryable());
        assert!(!ApiError::from_status(400, "").is_retryable());
        assert!(!ApiError::from_status(401, "").is_retryable());
        assert!(!ApiError::invalid_response("no slug").is_retryable());
    }

    #[test]
    fn errors_display_context() {
        assert_eq!(
            ApiError::from_status(500, "boom").to_string(),
            "server error 500: boom"
        );
        assert_eq!(
            ApiError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
    }
}
