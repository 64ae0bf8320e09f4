//! Answer state accumulated over one wizard session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::metric::{InputType, MetricEntry, MetricKey};
use super::proxy::ProxyAnswer;
use crate::domain::foundation::ValidationError;
use crate::domain::profile::{RiskRegion, Sex, UserProfile};

/// Current smoking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmokingStatus {
    #[serde(rename = "Bukan perokok saat ini")]
    NonSmoker,
    #[serde(rename = "Perokok saat ini")]
    CurrentSmoker,
}

impl SmokingStatus {
    pub const OPTIONS: &'static [&'static str] = &["Bukan perokok saat ini", "Perokok saat ini"];

    pub fn label(&self) -> &'static str {
        match self {
            SmokingStatus::NonSmoker => Self::OPTIONS[0],
            SmokingStatus::CurrentSmoker => Self::OPTIONS[1],
        }
    }
}

impl FromStr for SmokingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Bukan perokok saat ini" => Ok(SmokingStatus::NonSmoker),
            "Perokok saat ini" => Ok(SmokingStatus::CurrentSmoker),
            other => Err(ValidationError::invalid_format(
                "smokingStatus",
                format!("unknown option '{}'", other),
            )),
        }
    }
}

impl fmt::Display for SmokingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the user has been diagnosed with diabetes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiabetesHistory {
    #[serde(rename = "Ya")]
    Yes,
    #[serde(rename = "Tidak")]
    No,
}

impl DiabetesHistory {
    pub const OPTIONS: &'static [&'static str] = &["Ya", "Tidak"];

    pub fn label(&self) -> &'static str {
        match self {
            DiabetesHistory::Yes => Self::OPTIONS[0],
            DiabetesHistory::No => Self::OPTIONS[1],
        }
    }
}

impl FromStr for DiabetesHistory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Ya" => Ok(DiabetesHistory::Yes),
            "Tidak" => Ok(DiabetesHistory::No),
            other => Err(ValidationError::invalid_format(
                "diabetesHistory",
                format!("unknown option '{}'", other),
            )),
        }
    }
}

impl fmt::Display for DiabetesHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scalar answer fields, addressed by info and choice questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerField {
    Age,
    Gender,
    Region,
    RiskRegion,
    SmokingStatus,
    DiabetesHistory,
}

impl AnswerField {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerField::Age => "age",
            AnswerField::Gender => "gender",
            AnswerField::Region => "region",
            AnswerField::RiskRegion => "riskRegion",
            AnswerField::SmokingStatus => "smokingStatus",
            AnswerField::DiabetesHistory => "diabetesHistory",
        }
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user has supplied so far.
///
/// Profile-derived fields (`age`, `gender`, `region`, `riskRegion`) are filled
/// once on creation. `diabetesAge` is kept only while `diabetesHistory` is
/// "Ya", and HbA1c / serum creatinine entries are dropped when it is not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerState {
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    gender: Option<Sex>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    risk_region: Option<RiskRegion>,
    #[serde(default)]
    smoking_status: Option<SmokingStatus>,
    #[serde(default)]
    diabetes_history: Option<DiabetesHistory>,
    #[serde(default)]
    diabetes_age: Option<String>,
    #[serde(default)]
    health_profile: BTreeMap<MetricKey, MetricEntry>,
}

impl AnswerState {
    /// Empty answers with no profile values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers pre-filled from the stored profile.
    pub fn from_profile(profile: &UserProfile, today: NaiveDate) -> Self {
        let region = profile.country_display();
        Self {
            age: Some(profile.age_on(today)),
            gender: Some(profile.sex),
            region: (!region.is_empty()).then_some(region),
            risk_region: profile.risk_region(),
            ..Self::default()
        }
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn gender(&self) -> Option<Sex> {
        self.gender
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn risk_region(&self) -> Option<RiskRegion> {
        self.risk_region
    }

    pub fn smoking_status(&self) -> Option<SmokingStatus> {
        self.smoking_status
    }

    pub fn diabetes_history(&self) -> Option<DiabetesHistory> {
        self.diabetes_history
    }

    pub fn has_diabetes(&self) -> bool {
        self.diabetes_history == Some(DiabetesHistory::Yes)
    }

    /// Raw age-at-diagnosis input.
    pub fn diabetes_age(&self) -> Option<&str> {
        self.diabetes_age.as_deref()
    }

    /// Age at diagnosis as a whole number of years, if it parses.
    pub fn diabetes_age_years(&self) -> Option<u32> {
        self.diabetes_age
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
    }

    /// Display value of a scalar field; `None` when unanswered or blank.
    pub fn field_value(&self, field: AnswerField) -> Option<String> {
        let value = match field {
            AnswerField::Age => self.age.map(|age| age.to_string()),
            AnswerField::Gender => self.gender.map(|sex| sex.label().to_string()),
            AnswerField::Region => self.region.clone(),
            AnswerField::RiskRegion => self.risk_region.map(|r| r.label().to_string()),
            AnswerField::SmokingStatus => self.smoking_status.map(|s| s.label().to_string()),
            AnswerField::DiabetesHistory => self.diabetes_history.map(|d| d.label().to_string()),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    pub fn health_profile(&self) -> &BTreeMap<MetricKey, MetricEntry> {
        &self.health_profile
    }

    pub fn metric(&self, metric: MetricKey) -> Option<&MetricEntry> {
        self.health_profile.get(&metric)
    }

    /// True iff the metric has an entry and that entry is complete.
    pub fn is_metric_completed(&self, metric: MetricKey) -> bool {
        self.metric(metric).is_some_and(MetricEntry::is_completed)
    }

    pub fn set_smoking_status(&mut self, status: SmokingStatus) {
        self.smoking_status = Some(status);
    }

    /// Records the diabetes answer. Answering "Tidak" discards the
    /// age-at-diagnosis and the diabetes-only metric entries.
    pub fn set_diabetes_history(&mut self, history: DiabetesHistory) {
        self.diabetes_history = Some(history);
        if history == DiabetesHistory::No {
            self.discard_diabetes_answers();
        }
    }

    fn discard_diabetes_answers(&mut self) {
        self.diabetes_age = None;
        for metric in MetricKey::DIABETES {
            self.health_profile.remove(&metric);
        }
    }

    pub fn set_diabetes_age(&mut self, raw: impl Into<String>) {
        self.diabetes_age = Some(raw.into());
    }

    pub fn select_input_type(&mut self, metric: MetricKey, input_type: InputType) -> bool {
        self.health_profile
            .entry(metric)
            .or_default()
            .select_input_type(metric, input_type)
    }

    pub fn set_manual_value(&mut self, metric: MetricKey, value: impl Into<String>) {
        self.health_profile
            .entry(metric)
            .or_default()
            .set_manual_value(metric, value);
    }

    pub fn set_proxy_answer(&mut self, metric: MetricKey, key: &str, answer: ProxyAnswer) {
        self.health_profile
            .entry(metric)
            .or_default()
            .set_proxy_answer(metric, key, answer);
    }

    /// Recomputes every metric's `completed` flag and drops diabetes-only
    /// answers unless diabetes is "Ya". Needed after loading answers from
    /// outside, where the stored state cannot be trusted.
    pub fn refresh_completion(&mut self) {
        if !self.has_diabetes() {
            self.discard_diabetes_answers();
        }
        for (metric, entry) in self.health_profile.iter_mut() {
            entry.refresh(*metric);
        }
    }
}
