//! Mock Assessment API for testing.
//!
//! Queued responses per endpoint, optional simulated latency, and call
//! tracking for verification.
//!
//! # Example
//!
//! ```ignore
//! let api = MockAssessmentApi::new()
//!     .with_slug("ra-42")
//!     .with_personalize_error(ApiError::from_status(500, "boom"));
//!
//! handler.submit(&mut session, &auth).await;
//! assert_eq!(api.calls().len(), 2);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{AssessmentSlug, AuthContext, SubmissionId};
use crate::domain::submission::AssessmentPayload;
use crate::ports::{ApiError, AssessmentApi};

/// A recorded call against the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Create {
        payload: AssessmentPayload,
        submission_id: SubmissionId,
        authorization: String,
    },
    Personalize {
        slug: AssessmentSlug,
        submission_id: SubmissionId,
    },
}

/// Mock backend. Clones share queues and call history.
#[derive(Debug, Clone, Default)]
pub struct MockAssessmentApi {
    create_responses: Arc<Mutex<VecDeque<Result<AssessmentSlug, ApiError>>>>,
    personalize_responses: Arc<Mutex<VecDeque<Result<(), ApiError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockAssessmentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful create call returning `slug`.
    pub fn with_slug(self, slug: &str) -> Self {
        let slug = AssessmentSlug::new(slug).expect("mock slug must not be blank");
        self.create_responses.lock().unwrap().push_back(Ok(slug));
        self
    }

    /// Queues a failing create call.
    pub fn with_create_error(self, error: ApiError) -> Self {
        self.create_responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queues a failing personalize call.
    pub fn with_personalize_error(self, error: ApiError) -> Self {
        self.personalize_responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns all recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl AssessmentApi for MockAssessmentApi {
    async fn create_assessment(
        &self,
        auth: &AuthContext,
        payload: &AssessmentPayload,
        submission_id: &SubmissionId,
    ) -> Result<AssessmentSlug, ApiError> {
        self.calls.lock().unwrap().push(MockCall::Create {
            payload: payload.clone(),
            submission_id: *submission_id,
            authorization: auth.bearer_header(),
        });
        self.simulate_latency().await;

        let next = self.create_responses.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => AssessmentSlug::new("mock-assessment")
                .map_err(|e| ApiError::invalid_response(e.to_string())),
        }
    }

    async fn personalize_assessment(
        &self,
        _auth: &AuthContext,
        slug: &AssessmentSlug,
        submission_id: &SubmissionId,
    ) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(MockCall::Personalize {
            slug: slug.clone(),
            submission_id: *submission_id,
        });
        self.simulate_latency().await;

        let next = self.personalize_responses.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))
    }
}
