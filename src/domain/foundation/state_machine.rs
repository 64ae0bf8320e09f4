//! State machine trait for lifecycle status enums.
//!
//! Used by the submission lifecycle (`editing → submitting → success`) so that
//! every status change goes through one validated path.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list their outgoing edges; validated transitions and the
/// terminal check come for free.
///
/// # Example
///
/// ```ignore
/// let next = SubmissionStatus::Editing.transition_to(SubmissionStatus::AnalyzingRisk)?;
/// assert!(SubmissionStatus::Succeeded.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Off,
        Warming,
        On,
        Broken,
    }

    impl StateMachine for Light {
        fn valid_transitions(&self) -> Vec<Self> {
            use Light::*;
            match self {
                Off => vec![Warming],
                Warming => vec![On, Off],
                On => vec![Off, Broken],
                Broken => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_listed_edge() {
        assert_eq!(Light::Off.transition_to(Light::Warming), Ok(Light::Warming));
    }

    #[test]
    fn transition_to_fails_for_unlisted_edge() {
        let result = Light::Off.transition_to(Light::On);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "state_transition"
        ));
    }

    #[test]
    fn is_terminal_only_for_states_without_edges() {
        assert!(Light::Broken.is_terminal());
        assert!(!Light::Off.is_terminal());
        assert!(!Light::On.is_terminal());
    }

    #[test]
    fn can_transition_to_matches_valid_transitions() {
        for state in [Light::Off, Light::Warming, Light::On, Light::Broken] {
            for target in state.valid_transitions() {
                assert!(state.can_transition_to(&target));
            }
        }
    }
}
