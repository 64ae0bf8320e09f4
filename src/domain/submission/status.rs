//! Submission lifecycle.
//!
//! ```text
//! Editing ──► AnalyzingRisk ──► Personalizing ──► Succeeded
//!    ▲              │                 │
//!    └──────────────┴─────────────────┘   (request failed)
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where the wizard is in the submit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Accepting answers.
    #[default]
    Editing,
    /// Risk-analysis request in flight.
    AnalyzingRisk,
    /// Personalization request in flight.
    Personalizing,
    /// Both requests succeeded; the caller redirects.
    Succeeded,
}

impl SubmissionStatus {
    /// True while a request is in flight and input is disabled.
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::AnalyzingRisk | SubmissionStatus::Personalizing)
    }

    /// True if answers may be changed.
    pub fn accepts_input(&self) -> bool {
        *self == SubmissionStatus::Editing
    }
}

impl StateMachine for SubmissionStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use SubmissionStatus::*;
        match self {
            Editing => vec![AnalyzingRisk],
            AnalyzingRisk => vec![Personalizing, Editing],
            Personalizing => vec![Succeeded, Editing],
            Succeeded => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubmissionStatus::*;

    #[test]
    fn happy_path_is_valid() {
        let status = Editing
            .transition_to(AnalyzingRisk)
            .and_then(|s| s.transition_to(Personalizing))
            .and_then(|s| s.transition_to(Succeeded));
        assert_eq!(status, Ok(Succeeded));
    }

    #[test]
    fn failure_edge_returns_to_editing_from_any_submitting_state() {
        assert!(AnalyzingRisk.can_transition_to(&Editing));
        assert!(Personalizing.can_transition_to(&Editing));
    }

    #[test]
    fn personalization_cannot_start_before_analysis() {
        assert!(Editing.transition_to(Personalizing).is_err());
        assert!(Editing.transition_to(Succeeded).is_err());
    }

    #[test]
    fn succeeded_is_terminal() {
        assert!(Succeeded.is_terminal());
        assert!(Succeeded.transition_to(Editing).is_err());
    }

    #[test]
    fn only_in_flight_states_are_submitting() {
        assert!(!Editing.is_submitting());
        assert!(AnalyzingRisk.is_submitting());
        assert!(Personalizing.is_submitting());
        assert!(!Succeeded.is_submitting());
        assert!(Editing.accepts_input());
        assert!(!Succeeded.accepts_input());
    }
}
