//! Risk backend API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. `https://api.example.com`
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Collection path for risk assessments
    #[serde(default = "default_assessments_path")]
    pub assessments_path: String,
}

impl ApiConfig {
    /// Creates a config for `base_url` with default timeout and path.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            assessments_path: default_assessments_path(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `POST` target for creating an assessment.
    pub fn create_url(&self) -> String {
        format!("{}/", self.collection_url())
    }

    /// `PATCH` target for personalizing the assessment `slug`.
    pub fn personalize_url(&self, slug: &str) -> String {
        format!("{}/{}/personalize/", self.collection_url(), slug)
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.assessments_path.trim_matches('/')
        )
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("api.base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if !self.assessments_path.starts_with('/')
            || self.assessments_path.trim_matches('/').is_empty()
        {
            return Err(ValidationError::InvalidAssessmentsPath);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_assessments_path() -> String {
    "/risk-assessments".to_string()
}
