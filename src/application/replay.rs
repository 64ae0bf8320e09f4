//! Replay scripts - a recorded set of wizard answers, replayed through the
//! public `WizardSession` operations.
//!
//! ```yaml
//! profile:
//!   date_of_birth: "01/01/1990"
//!   sex: male
//!   country_of_residence: indonesia
//! smokingStatus: Bukan perokok saat ini
//! diabetesHistory: Tidak
//! metrics:
//!   sbp: { manual: 120 }
//!   totalCholesterol:
//!     proxy:
//!       dietPattern: Jarang
//!       exerciseType: Lari
//! ```
//!
//! JSON with the same shape is accepted for `.json` files.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use super::wizard_session::{WizardError, WizardSession};
use crate::domain::profile::UserProfile;
use crate::domain::questionnaire::{AnswerField, InputType, MetricKey, ProxyAnswer, QuestionId};
use crate::domain::submission::{build_payload, AssessmentPayload, PayloadError};

/// Errors loading or replaying a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("metric {0} must set exactly one of `manual` or `proxy`")]
    AmbiguousMetric(MetricKey),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("wizard stopped at incomplete question '{0}'")]
    Incomplete(QuestionId),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// A scalar written either as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Number(n) => write!(f, "{}", n),
            ScriptValue::Text(s) => f.write_str(s),
        }
    }
}

/// Answers for one metric: a manual value or the proxy battery.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricScript {
    #[serde(default)]
    pub manual: Option<ScriptValue>,
    #[serde(default)]
    pub proxy: Option<BTreeMap<String, ProxyAnswer>>,
}

/// A complete recorded wizard run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    pub profile: UserProfile,
    /// Date the profile age is computed on; today when absent.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    pub smoking_status: String,
    pub diabetes_history: String,
    #[serde(default)]
    pub diabetes_age: Option<ScriptValue>,
    #[serde(default)]
    pub metrics: BTreeMap<MetricKey, MetricScript>,
}

impl ReplayScript {
    /// Loads a script, choosing the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&raw)
        } else {
            Self::from_yaml(&raw)
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Starts a session for the script's profile and replays the answers.
    pub fn replay(&self) -> Result<WizardSession, ReplayError> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let mut session = WizardSession::from_profile(&self.profile, today);
        self.apply(&mut session)?;
        Ok(session)
    }

    /// Replays the script and builds the request it would submit, without
    /// touching the backend.
    pub fn payload(&self) -> Result<AssessmentPayload, ReplayError> {
        let session = self.replay()?;
        if let Some(index) = session.first_incomplete() {
            return Err(ReplayError::Incomplete(session.questions()[index].id()));
        }
        Ok(build_payload(session.answers())?)
    }

    /// Answers every question, then walks forward through the completion
    /// gate to the summary.
    pub fn apply(&self, session: &mut WizardSession) -> Result<(), ReplayError> {
        session.answer_choice(AnswerField::SmokingStatus, &self.smoking_status)?;
        session.answer_choice(AnswerField::DiabetesHistory, &self.diabetes_history)?;
        if let Some(age) = &self.diabetes_age {
            session.set_diabetes_age(age.to_string())?;
        }

        for (metric, script) in &self.metrics {
            match (&script.manual, &script.proxy) {
                (Some(value), None) => {
                    session.select_input_type(*metric, InputType::Manual)?;
                    session.set_manual_value(*metric, value.to_string())?;
                }
                (None, Some(answers)) => {
                    session.select_input_type(*metric, InputType::Proxy)?;
                    for (key, answer) in answers {
                        session.set_proxy_answer(*metric, key, answer.clone())?;
                    }
                }
                _ => return Err(ReplayError::AmbiguousMetric(*metric)),
            }
        }

        while session.next() {}
        if !session.is_on_last_question() {
            return Err(ReplayError::Incomplete(session.current_question().id()));
        }
        tracing::debug!(questions = session.questions().len(), "Replay reached summary");
        Ok(())
    }
}
