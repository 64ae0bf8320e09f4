//! HTTP Assessment API - reqwest implementation of `AssessmentApi`.
//!
//! # Configuration
//!
//! ```ignore
//! let api = HttpAssessmentApi::new(ApiConfig::new("https://api.example.com"))?;
//! let slug = api.create_assessment(&auth, &payload, &submission_id).await?;
//! ```
//!
//! Every request carries the bearer token of the signed-in user and the
//! submission id as `X-Request-Id`. Nothing is retried: creating an
//! assessment is not idempotent.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::domain::foundation::{AssessmentSlug, AuthContext, SubmissionId};
use crate::domain::submission::AssessmentPayload;
use crate::ports::{ApiError, AssessmentApi};

const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Backend client over HTTP.
pub struct HttpAssessmentApi {
    config: ApiConfig,
    client: Client,
}

impl HttpAssessmentApi {
    /// Creates a client using the configured timeout.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn authorized(
        &self,
        request: RequestBuilder,
        auth: &AuthContext,
        submission_id: &SubmissionId,
    ) -> RequestBuilder {
        request
            .header("Authorization", auth.bearer_header())
            .header(REQUEST_ID_HEADER, submission_id.to_string())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_secs: self.config.timeout_secs as u32,
                }
            } else if e.is_connect() {
                ApiError::network(format!("Connection failed: {}", e))
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %body, "Backend returned error status");
        Err(ApiError::from_status(status.as_u16(), body))
    }
}

/// Body of a successful create call. Other fields are ignored.
#[derive(Debug, Deserialize)]
struct CreateAssessmentResponse {
    assessment_slug: String,
}

/// Extracts the slug from a create-assessment response body.
fn parse_create_response(body: &str) -> Result<AssessmentSlug, ApiError> {
    let parsed: CreateAssessmentResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::invalid_response(format!("create assessment: {}", e)))?;
    AssessmentSlug::new(parsed.assessment_slug)
        .map_err(|e| ApiError::invalid_response(e.to_string()))
}

#[async_trait]
impl AssessmentApi for HttpAssessmentApi {
    async fn create_assessment(
        &self,
        auth: &AuthContext,
        payload: &AssessmentPayload,
        submission_id: &SubmissionId,
    ) -> Result<AssessmentSlug, ApiError> {
        let url = self.config.create_url();
        tracing::debug!(url = %url, submission_id = %submission_id, "Creating risk assessment");

        let request = self.authorized(self.client.post(&url).json(payload), auth, submission_id);
        let response = self.send(request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::invalid_response(e.to_string()))?;

        parse_create_response(&body).map_err(|e| {
            tracing::error!(error = %e, "Unexpected create-assessment response");
            e
        })
    }

    async fn personalize_assessment(
        &self,
        auth: &AuthContext,
        slug: &AssessmentSlug,
        submission_id: &SubmissionId,
    ) -> Result<(), ApiError> {
        let url = self.config.personalize_url(slug.as_str());
        tracing::debug!(url = %url, slug = %slug, "Personalizing risk assessment");

        let request = self.authorized(
            self.client.patch(&url).json(&serde_json::json!({})),
            auth,
            submission_id,
        );
        self.send(request).await?;
        Ok(())
    }
}
