//! Payload builder - maps the answer state onto the backend request shape.
//!
//! - proxy sub-question keys are renamed through [`backend_key`]; keys the
//!   dictionary does not know are dropped
//! - only completed metrics are emitted, as `{prefix}_input_type` plus either
//!   `{prefix}_value` or `{prefix}_proxy_answers`
//! - `has_diabetes`, `age_at_diabetes_diagnosis` and `smoking_status` are
//!   always present
//!
//! A manual value or diagnosis age that does not parse is an error. It is
//! never coerced to zero.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::questionnaire::{AnswerState, InputType, MetricEntry, MetricKey, SmokingStatus};

/// Internal proxy key → backend question key.
const BACKEND_KEYS: &[(&str, &str)] = &[
    ("familyHistory", "q_fam_htn"),
    ("saltIntake", "q_salt_intake"),
    ("bpHistory", "q_htn_history"),
    ("bpSymptoms", "q_htn_symptoms"),
    ("dietPattern", "q_fried_food"),
    ("exerciseType", "q_exercise"),
    ("fishConsumption", "q_fish"),
    ("familyCholesterol", "q_fam_chol"),
    ("waistSize", "q_waist"),
    ("cookingOil", "q_cooking_oil"),
    ("diabetesMedication", "q_dm_medication"),
    ("glucoseControl", "q_glucose_control"),
    ("diabetesSymptoms", "q_dm_symptoms"),
    ("kidneyHistory", "q_ckd_history"),
    ("urineChanges", "q_urine_changes"),
    ("swelling", "q_edema"),
    ("painkillerUse", "q_nsaid"),
];

/// Backend name of a proxy sub-question, if it has one.
pub fn backend_key(internal: &str) -> Option<&'static str> {
    BACKEND_KEYS
        .iter()
        .find(|(key, _)| *key == internal)
        .map(|(_, backend)| *backend)
}

/// Errors that block payload construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("'{value}' is not a valid number for {field}")]
    MalformedNumber { field: String, value: String },
}

/// Request body of the create-assessment call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentPayload {
    pub has_diabetes: bool,
    pub age_at_diabetes_diagnosis: Option<u32>,
    pub smoking_status: Option<SmokingStatus>,
    #[serde(flatten)]
    pub metrics: Map<String, Value>,
}

impl AssessmentPayload {
    /// True if any key for the metric is present.
    pub fn has_metric(&self, metric: MetricKey) -> bool {
        let prefix = format!("{}_", metric.payload_prefix());
        self.metrics.keys().any(|key| key.starts_with(&prefix))
    }
}

/// Builds the backend request from the answers.
pub fn build_payload(answers: &AnswerState) -> Result<AssessmentPayload, PayloadError> {
    let age_at_diabetes_diagnosis = match (answers.has_diabetes(), answers.diabetes_age()) {
        (true, Some(raw)) => Some(answers.diabetes_age_years().ok_or_else(|| {
            PayloadError::MalformedNumber {
                field: "age_at_diabetes_diagnosis".to_string(),
                value: raw.to_string(),
            }
        })?),
        _ => None,
    };

    let mut metrics = Map::new();
    for metric in MetricKey::ALL {
        if metric.requires_diabetes() && !answers.has_diabetes() {
            continue;
        }
        match answers.metric(metric) {
            Some(entry) if entry.is_completed() => write_metric(&mut metrics, metric, entry)?,
            _ => {}
        }
    }

    Ok(AssessmentPayload {
        has_diabetes: answers.has_diabetes(),
        age_at_diabetes_diagnosis,
        smoking_status: answers.smoking_status(),
        metrics,
    })
}

fn write_metric(
    out: &mut Map<String, Value>,
    metric: MetricKey,
    entry: &MetricEntry,
) -> Result<(), PayloadError> {
    let prefix = metric.payload_prefix();
    match entry.input_type() {
        InputType::Manual => {
            let value = entry
                .parsed_manual_value()
                .ok_or_else(|| PayloadError::MalformedNumber {
                    field: format!("{}_value", prefix),
                    value: entry.manual_value().to_string(),
                })?;
            out.insert(format!("{}_input_type", prefix), Value::from(InputType::Manual.as_str()));
            out.insert(format!("{}_value", prefix), Value::from(value));
        }
        InputType::Proxy => {
            let mut renamed = Map::new();
            for (key, answer) in entry.proxy_answers() {
                match backend_key(key) {
                    Some(backend) => {
                        let value = serde_json::to_value(answer).unwrap_or(Value::Null);
                        renamed.insert(backend.to_string(), value);
                    }
                    None => tracing::debug!(metric = %metric, key = %key, "Dropping unmapped proxy key"),
                }
            }
            out.insert(format!("{}_input_type", prefix), Value::from(InputType::Proxy.as_str()));
            out.insert(format!("{}_proxy_answers", prefix), Value::Object(renamed));
        }
        InputType::Unselected => {}
    }
    Ok(())
}
