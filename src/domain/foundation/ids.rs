//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of one submission attempt, sent as the request id header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a new random SubmissionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SubmissionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubmissionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Backend identifier of a created risk assessment.
///
/// Opaque to the client; only required to be a non-empty path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssessmentSlug(String);

impl AssessmentSlug {
    /// Creates a new AssessmentSlug, rejecting empty values and path separators.
    pub fn new(slug: impl Into<String>) -> Result<Self, ValidationError> {
        let slug = slug.into();
        let trimmed = slug.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("assessment_slug"));
        }
        if trimmed.contains('/') {
            return Err(ValidationError::invalid_format(
                "assessment_slug",
                "must not contain '/'",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AssessmentSlug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssessmentSlug> for String {
    fn from(slug: AssessmentSlug) -> Self {
        slug.0
    }
}

impl fmt::Display for AssessmentSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_id_generates_unique_values() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }

    #[test]
    fn submission_id_round_trips_through_string() {
        let id = SubmissionId::new();
        let parsed: SubmissionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn assessment_slug_trims_whitespace() {
        let slug = AssessmentSlug::new("  abc-123 ").unwrap();
        assert_eq!(slug.as_str(), "abc-123");
    }

    #[test]
    fn assessment_slug_rejects_empty_and_slashes() {
        assert!(matches!(
            AssessmentSlug::new("   "),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(matches!(
            AssessmentSlug::new("a/b"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn assessment_slug_deserializes_with_validation() {
        let slug: AssessmentSlug = serde_json::from_str("\"risk-42\"").unwrap();
        assert_eq!(slug.to_string(), "risk-42");
        assert!(serde_json::from_str::<AssessmentSlug>("\"\"").is_err());
    }
}
