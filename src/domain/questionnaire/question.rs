//! Question - the closed set of wizard steps.
//!
//! Questions are derived from the answers on every change and never mutated.
//! Each variant carries exactly what is needed to render and gate it.

use std::fmt;

use super::answers::AnswerField;
use super::metric::{MetricKey, ValidRange};
use super::proxy::{battery, ProxyQuestion};

/// Numeric free-entry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    DiabetesAge,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::DiabetesAge => "diabetesAge",
        }
    }
}

/// Discriminant of a [`Question`], for counting and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Welcome,
    Info,
    Choice,
    Input,
    HealthMetric,
    Summary,
}

/// Stable identifier of a question within a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One step of the health-analysis wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum Question {
    Welcome {
        title: &'static str,
        description: &'static str,
    },
    /// Read-only value derived from the profile.
    Info {
        title: &'static str,
        field: AnswerField,
    },
    Choice {
        title: &'static str,
        field: AnswerField,
        options: &'static [&'static str],
    },
    /// Whole-number entry bounded by `min..=max`.
    Input {
        title: &'static str,
        field: InputField,
        min: u32,
        max: u32,
    },
    HealthMetric {
        title: &'static str,
        metric: MetricKey,
        unit: &'static str,
        range: ValidRange,
        proxy_questions: &'static [ProxyQuestion],
    },
    Summary {
        title: &'static str,
    },
}

impl Question {
    /// Builds the metric question with its range and proxy battery.
    pub fn health_metric(metric: MetricKey) -> Self {
        Question::HealthMetric {
            title: metric.title(),
            metric,
            unit: metric.unit(),
            range: metric.valid_range(),
            proxy_questions: battery(metric),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Welcome { .. } => QuestionKind::Welcome,
            Question::Info { .. } => QuestionKind::Info,
            Question::Choice { .. } => QuestionKind::Choice,
            Question::Input { .. } => QuestionKind::Input,
            Question::HealthMetric { .. } => QuestionKind::HealthMetric,
            Question::Summary { .. } => QuestionKind::Summary,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Question::Welcome { title, .. }
            | Question::Info { title, .. }
            | Question::Choice { title, .. }
            | Question::Input { title, .. }
            | Question::HealthMetric { title, .. }
            | Question::Summary { title } => title,
        }
    }

    /// Identifier that survives re-derivation of the sequence.
    pub fn id(&self) -> QuestionId {
        let id = match self {
            Question::Welcome { .. } => "welcome".to_string(),
            Question::Info { field, .. } => format!("info.{}", field),
            Question::Choice { field, .. } => format!("choice.{}", field),
            Question::Input { field, .. } => format!("input.{}", field.as_str()),
            Question::HealthMetric { metric, .. } => format!("metric.{}", metric),
            Question::Summary { .. } => "summary".to_string(),
        };
        QuestionId(id)
    }

    /// The metric this question collects, if it is a metric question.
    pub fn metric(&self) -> Option<MetricKey> {
        match self {
            Question::HealthMetric { metric, .. } => Some(*metric),
            _ => None,
        }
    }
}
