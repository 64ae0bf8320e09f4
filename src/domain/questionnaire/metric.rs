//! Health metrics and the per-metric entry state.
//!
//! A `MetricEntry` is only mutated through its methods, which recompute
//! `completed` after every change:
//!
//! - manual mode: complete iff the value parses and lies in the metric's range
//! - proxy mode: complete iff every sub-question of the battery is answered

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::proxy::{battery, ProxyAnswer};

/// Clinical parameters collected by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "sbp")]
    SystolicBloodPressure,
    #[serde(rename = "totalCholesterol")]
    TotalCholesterol,
    #[serde(rename = "hdlCholesterol")]
    HdlCholesterol,
    #[serde(rename = "hba1c")]
    Hba1c,
    #[serde(rename = "serumCreatinine")]
    SerumCreatinine,
}

impl MetricKey {
    /// Metrics asked of every user.
    pub const CORE: [MetricKey; 3] = [
        MetricKey::SystolicBloodPressure,
        MetricKey::TotalCholesterol,
        MetricKey::HdlCholesterol,
    ];

    /// Metrics asked only when the user has diabetes.
    pub const DIABETES: [MetricKey; 2] = [MetricKey::Hba1c, MetricKey::SerumCreatinine];

    /// All metrics in presentation order.
    pub const ALL: [MetricKey; 5] = [
        MetricKey::SystolicBloodPressure,
        MetricKey::TotalCholesterol,
        MetricKey::HdlCholesterol,
        MetricKey::Hba1c,
        MetricKey::SerumCreatinine,
    ];

    /// Internal key, as used in the answer state.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::SystolicBloodPressure => "sbp",
            MetricKey::TotalCholesterol => "totalCholesterol",
            MetricKey::HdlCholesterol => "hdlCholesterol",
            MetricKey::Hba1c => "hba1c",
            MetricKey::SerumCreatinine => "serumCreatinine",
        }
    }

    /// Prefix of this metric's keys in the backend payload.
    pub fn payload_prefix(&self) -> &'static str {
        match self {
            MetricKey::SystolicBloodPressure => "sbp",
            MetricKey::TotalCholesterol => "tchol",
            MetricKey::HdlCholesterol => "hdl",
            MetricKey::Hba1c => "hba1c",
            MetricKey::SerumCreatinine => "scr",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MetricKey::SystolicBloodPressure => "Tekanan darah sistolik",
            MetricKey::TotalCholesterol => "Kolesterol total",
            MetricKey::HdlCholesterol => "Kolesterol HDL",
            MetricKey::Hba1c => "HbA1c",
            MetricKey::SerumCreatinine => "Kreatinin serum",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKey::SystolicBloodPressure => "mmHg",
            MetricKey::TotalCholesterol | MetricKey::HdlCholesterol => "mmol/L",
            MetricKey::Hba1c => "mmol/mol",
            MetricKey::SerumCreatinine => "mg/dL",
        }
    }

    /// Inclusive range a manual value must fall in.
    pub fn valid_range(&self) -> ValidRange {
        match self {
            MetricKey::SystolicBloodPressure => ValidRange::new(50.0, 300.0),
            MetricKey::TotalCholesterol => ValidRange::new(1.0, 20.0),
            MetricKey::HdlCholesterol => ValidRange::new(0.1, 5.0),
            MetricKey::Hba1c => ValidRange::new(20.0, 200.0),
            MetricKey::SerumCreatinine => ValidRange::new(0.1, 15.0),
        }
    }

    /// True for metrics that only apply to users with diabetes.
    pub fn requires_diabetes(&self) -> bool {
        Self::DIABETES.contains(self)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub min: f64,
    pub max: f64,
}

impl ValidRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// How the user supplies a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputType {
    #[default]
    #[serde(rename = "")]
    Unselected,
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "proxy")]
    Proxy,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Unselected => "",
            InputType::Manual => "manual",
            InputType::Proxy => "proxy",
        }
    }
}

/// Parses a manually entered measurement.
///
/// Surrounding whitespace is ignored and a single comma is accepted as the
/// decimal separator. Anything else that is not a finite number is rejected.
pub fn parse_manual_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Answer state for a single metric.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    #[serde(default)]
    input_type: InputType,
    #[serde(default)]
    manual_value: String,
    #[serde(default)]
    proxy_answers: BTreeMap<String, ProxyAnswer>,
    #[serde(default)]
    completed: bool,
}

impl MetricEntry {
    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn manual_value(&self) -> &str {
        &self.manual_value
    }

    pub fn proxy_answers(&self) -> &BTreeMap<String, ProxyAnswer> {
        &self.proxy_answers
    }

    pub fn proxy_answer(&self, key: &str) -> Option<&ProxyAnswer> {
        self.proxy_answers.get(key)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Switches the entry mode. Picking the other mode clears every answer
    /// given so far; picking the active mode again keeps them.
    ///
    /// Returns true if the mode changed.
    pub fn select_input_type(&mut self, metric: MetricKey, input_type: InputType) -> bool {
        if self.input_type == input_type {
            return false;
        }
        *self = MetricEntry {
            input_type,
            ..MetricEntry::default()
        };
        self.refresh(metric);
        true
    }

    pub fn set_manual_value(&mut self, metric: MetricKey, value: impl Into<String>) {
        self.manual_value = value.into();
        self.refresh(metric);
    }

    pub fn set_proxy_answer(&mut self, metric: MetricKey, key: impl Into<String>, answer: ProxyAnswer) {
        self.proxy_answers.insert(key.into(), answer);
        self.refresh(metric);
    }

    /// Parsed manual value, if it is a number.
    pub fn parsed_manual_value(&self) -> Option<f64> {
        parse_manual_value(&self.manual_value)
    }

    /// Recomputes `completed` from the current mode and answers.
    pub fn refresh(&mut self, metric: MetricKey) {
        self.completed = match self.input_type {
            InputType::Unselected => false,
            InputType::Manual => self
                .parsed_manual_value()
                .is_some_and(|v| metric.valid_range().contains(v)),
            InputType::Proxy => battery(metric).iter().all(|question| {
                self.proxy_answers
                    .get(question.key)
                    .is_some_and(ProxyAnswer::is_answered)
            }),
        };
    }
}
