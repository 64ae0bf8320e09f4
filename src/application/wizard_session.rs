//! WizardSession - the health-analysis wizard controller.
//!
//! Owns the answer state, the derived question sequence and the position of
//! the user in it. Every answer mutation goes through here so that:
//!
//! - completion flags are recomputed
//! - shared proxy answers are mirrored per the sync rules
//! - the sequence is re-derived and the position kept on the same question
//!
//! Navigation never errors; `next` and `back` return whether they moved.

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::domain::foundation::{
    AuthContext, DomainError, ErrorCode, Percentage, StateMachine,
};
use crate::domain::profile::UserProfile;
use crate::domain::questionnaire::{
    find_proxy_question, is_complete, propagate, AnswerField, AnswerState, DiabetesHistory,
    InputType, MetricKey, ProxyAnswer, Question, QuestionId, QuestionSequence, SmokingStatus,
};
use crate::domain::submission::SubmissionStatus;

/// Rejected answer mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("wizard is locked while status is {0:?}")]
    Locked(SubmissionStatus),

    #[error("'{value}' is not an option for {field}")]
    InvalidOption { field: String, value: String },

    #[error("{0} is derived from the profile and cannot be answered")]
    ReadOnlyField(AnswerField),

    #[error("{metric} has no proxy question '{key}'")]
    UnknownProxyQuestion { metric: MetricKey, key: String },

    #[error("{metric} is not in {} mode", .expected.as_str())]
    WrongInputMode { metric: MetricKey, expected: InputType },

    #[error("question '{0}' is not part of the current sequence")]
    QuestionUnavailable(QuestionId),

    #[error("invalid submission transition: {0}")]
    InvalidTransition(String),
}

impl WizardError {
    fn invalid_option(field: impl Into<String>, value: impl Into<String>) -> Self {
        WizardError::InvalidOption {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::Locked(_) => ErrorCode::WizardLocked,
            WizardError::InvalidOption { .. } => ErrorCode::InvalidOption,
            WizardError::ReadOnlyField(_) => ErrorCode::ValidationFailed,
            WizardError::UnknownProxyQuestion { .. } => ErrorCode::UnknownProxyQuestion,
            WizardError::WrongInputMode { .. } => ErrorCode::InputModeMismatch,
            WizardError::QuestionUnavailable(_) => ErrorCode::QuestionUnavailable,
            WizardError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

impl From<WizardError> for DomainError {
    fn from(err: WizardError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// One label/value line of the summary step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub question: QuestionId,
    pub label: &'static str,
    pub value: String,
}

const NOT_ANSWERED: &str = "-";

/// Wizard state for one signed-in user.
#[derive(Debug, Clone)]
pub struct WizardSession {
    answers: AnswerState,
    sequence: QuestionSequence,
    current: usize,
    status: SubmissionStatus,
}

impl WizardSession {
    /// Starts a wizard pre-filled from the signed-in user's profile.
    pub fn start(auth: &AuthContext) -> Self {
        Self::from_profile(auth.profile(), Local::now().date_naive())
    }

    /// Starts a wizard as of `today`.
    pub fn from_profile(profile: &UserProfile, today: NaiveDate) -> Self {
        Self::from_answers(AnswerState::from_profile(profile, today))
    }

    /// Starts a wizard from existing answers. Completion flags are recomputed.
    pub fn from_answers(mut answers: AnswerState) -> Self {
        answers.refresh_completion();
        let sequence = QuestionSequence::for_answers(&answers);
        tracing::debug!(questions = sequence.len(), "Wizard started");
        Self {
            answers,
            sequence,
            current: 0,
            status: SubmissionStatus::Editing,
        }
    }

    pub fn answers(&self) -> &AnswerState {
        &self.answers
    }

    pub fn questions(&self) -> &[Question] {
        self.sequence.questions()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.sequence.questions()[self.current]
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_on_last_question(&self) -> bool {
        self.sequence.is_last(self.current)
    }

    /// True if the current question is answered.
    pub fn is_current_complete(&self) -> bool {
        is_complete(self.current_question(), &self.answers)
    }

    /// True if "Next" may be pressed.
    pub fn can_advance(&self) -> bool {
        self.status.accepts_input() && !self.is_on_last_question() && self.is_current_complete()
    }

    /// Moves forward one question if the gate allows it.
    pub fn next(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Moves back one question. Unanswered questions never block going back.
    pub fn back(&mut self) -> bool {
        if !self.status.accepts_input() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Share of questions currently complete.
    pub fn progress(&self) -> Percentage {
        let done = self
            .questions()
            .iter()
            .filter(|q| is_complete(q, &self.answers))
            .count();
        Percentage::from_ratio(done, self.sequence.len())
    }

    /// Index of the first question still blocking submission.
    pub fn first_incomplete(&self) -> Option<usize> {
        self.questions()
            .iter()
            .position(|q| !is_complete(q, &self.answers))
    }

    pub fn is_ready_to_submit(&self) -> bool {
        self.first_incomplete().is_none()
    }

    /// Rows shown on the summary step, in question order.
    pub fn summary(&self) -> Vec<SummaryRow> {
        self.questions()
            .iter()
            .filter_map(|question| {
                let value = match question {
                    Question::Welcome { .. } | Question::Summary { .. } => return None,
                    Question::Info { field, .. } | Question::Choice { field, .. } => {
                        self.answers.field_value(*field)
                    }
                    Question::Input { .. } => self
                        .answers
                        .diabetes_age_years()
                        .map(|years| format!("{} tahun", years)),
                    Question::HealthMetric { metric, unit, .. } => self.metric_summary(*metric, unit),
                };
                Some(SummaryRow {
                    question: question.id(),
                    label: question.title(),
                    value: value.unwrap_or_else(|| NOT_ANSWERED.to_string()),
                })
            })
            .collect()
    }

    fn metric_summary(&self, metric: MetricKey, unit: &str) -> Option<String> {
        let entry = self.answers.metric(metric).filter(|e| e.is_completed())?;
        match entry.input_type() {
            InputType::Manual => entry
                .parsed_manual_value()
                .map(|value| format!("{} {}", value, unit)),
            InputType::Proxy => Some("Diperkirakan dari kuesioner".to_string()),
            InputType::Unselected => None,
        }
    }

    /// Answers a choice question with one of its option labels.
    pub fn answer_choice(&mut self, field: AnswerField, option: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        match field {
            AnswerField::SmokingStatus => {
                let status: SmokingStatus = option
                    .parse()
                    .map_err(|_| WizardError::invalid_option(field.as_str(), option))?;
                self.answers.set_smoking_status(status);
            }
            AnswerField::DiabetesHistory => {
                let history: DiabetesHistory = option
                    .parse()
                    .map_err(|_| WizardError::invalid_option(field.as_str(), option))?;
                self.answers.set_diabetes_history(history);
            }
            other => return Err(WizardError::ReadOnlyField(other)),
        }
        tracing::debug!(field = %field, option, "Choice answered");
        self.resequence();
        Ok(())
    }

    /// Records the age at diabetes diagnosis as typed. Invalid values are
    /// kept and simply leave the question incomplete.
    pub fn set_diabetes_age(&mut self, raw: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if !self.answers.has_diabetes() {
            return Err(WizardError::QuestionUnavailable(QuestionId::from(
                "input.diabetesAge",
            )));
        }
        self.answers.set_diabetes_age(raw);
        self.resequence();
        Ok(())
    }

    /// Switches a metric between manual and proxy entry.
    pub fn select_input_type(
        &mut self,
        metric: MetricKey,
        input_type: InputType,
    ) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.ensure_metric_available(metric)?;
        if self.answers.select_input_type(metric, input_type) {
            tracing::debug!(metric = %metric, mode = input_type.as_str(), "Input mode changed");
        }
        self.resequence();
        Ok(())
    }

    /// Sets the manual value of a metric in manual mode.
    pub fn set_manual_value(
        &mut self,
        metric: MetricKey,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.ensure_metric_available(metric)?;
        self.ensure_mode(metric, InputType::Manual)?;
        self.answers.set_manual_value(metric, value);
        tracing::debug!(
            metric = %metric,
            completed = self.answers.is_metric_completed(metric),
            "Manual value set"
        );
        self.resequence();
        Ok(())
    }

    /// Answers one proxy sub-question and mirrors it into the peer metrics
    /// of its sync rule. Returns the metrics that received a copy.
    pub fn set_proxy_answer(
        &mut self,
        metric: MetricKey,
        key: &str,
        answer: ProxyAnswer,
    ) -> Result<Vec<MetricKey>, WizardError> {
        self.ensure_editable()?;
        self.ensure_metric_available(metric)?;
        let question =
            find_proxy_question(metric, key).ok_or_else(|| WizardError::UnknownProxyQuestion {
                metric,
                key: key.to_string(),
            })?;
        if !question.accepts(&answer) {
            return Err(WizardError::invalid_option(
                format!("{}.{}", metric, key),
                format!("{:?}", answer),
            ));
        }
        self.ensure_mode(metric, InputType::Proxy)?;

        self.answers.set_proxy_answer(metric, key, answer);
        let mirrored = propagate(&mut self.answers, metric, key);
        tracing::debug!(metric = %metric, key, mirrored = ?mirrored, "Proxy answer set");
        self.resequence();
        Ok(mirrored)
    }

    /// Editing → analyzing. Locks the wizard.
    pub(crate) fn begin_submission(&mut self) -> Result<(), WizardError> {
        self.transition(SubmissionStatus::AnalyzingRisk)
    }

    /// Analyzing → personalizing.
    pub(crate) fn mark_personalizing(&mut self) -> Result<(), WizardError> {
        self.transition(SubmissionStatus::Personalizing)
    }

    /// Personalizing → succeeded.
    pub(crate) fn mark_succeeded(&mut self) -> Result<(), WizardError> {
        self.transition(SubmissionStatus::Succeeded)
    }

    /// Back to editing after a failed request, on the last question.
    pub(crate) fn abort_submission(&mut self) {
        if self.status.can_transition_to(&SubmissionStatus::Editing) {
            self.status = SubmissionStatus::Editing;
        }
        self.current = self.sequence.last_index();
    }

    fn transition(&mut self, target: SubmissionStatus) -> Result<(), WizardError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|e| WizardError::InvalidTransition(e.to_string()))?;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.status.accepts_input() {
            Ok(())
        } else {
            Err(WizardError::Locked(self.status))
        }
    }

    fn ensure_metric_available(&self, metric: MetricKey) -> Result<(), WizardError> {
        if metric.requires_diabetes() && !self.answers.has_diabetes() {
            return Err(WizardError::QuestionUnavailable(
                Question::health_metric(metric).id(),
            ));
        }
        Ok(())
    }

    fn ensure_mode(&self, metric: MetricKey, expected: InputType) -> Result<(), WizardError> {
        let actual = self
            .answers
            .metric(metric)
            .map(|entry| entry.input_type())
            .unwrap_or_default();
        if actual == expected {
            Ok(())
        } else {
            Err(WizardError::WrongInputMode { metric, expected })
        }
    }

    /// Re-derives the sequence, staying on the same question if it still
    /// exists and clamping to the last question otherwise.
    fn resequence(&mut self) {
        let current_id = self.current_question().id();
        let sequence = QuestionSequence::for_answers(&self.answers);
        let previous_len = self.sequence.len();
        self.current = sequence
            .position_of(&current_id)
            .unwrap_or_else(|| sequence.clamp(self.current));
        if sequence.len() != previous_len {
            tracing::debug!(
                from = previous_len,
                to = sequence.len(),
                current = self.current,
                "Question sequence changed"
            );
        }
        self.sequence = sequence;
    }
}
