//! Synthetic submission progress.
//!
//! The backend reports no progress, so the bar is driven by a fixed tick:
//! 0→50 while the risk analysis runs, 50→95 while personalizing, and 100 once
//! both calls have returned. A tick never crosses the current phase ceiling.

use crate::domain::foundation::Percentage;

/// Stage of the submit flow the progress bar reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressPhase {
    Analysis,
    Personalization,
    Complete,
}

impl ProgressPhase {
    /// Value the bar jumps to on entering the phase.
    pub fn floor(&self) -> Percentage {
        match self {
            ProgressPhase::Analysis => Percentage::ZERO,
            ProgressPhase::Personalization => Percentage::new(50),
            ProgressPhase::Complete => Percentage::HUNDRED,
        }
    }

    /// Highest value ticks may reach within the phase.
    pub fn ceiling(&self) -> Percentage {
        match self {
            ProgressPhase::Analysis => Percentage::new(50),
            ProgressPhase::Personalization => Percentage::new(95),
            ProgressPhase::Complete => Percentage::HUNDRED,
        }
    }
}

/// Timer-driven progress approximation.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticProgress {
    value: Percentage,
    phase: ProgressPhase,
    step: u8,
}

impl SyntheticProgress {
    /// Starts at 0% in the analysis phase.
    pub fn new(step: u8) -> Self {
        Self {
            value: Percentage::ZERO,
            phase: ProgressPhase::Analysis,
            step: step.max(1),
        }
    }

    pub fn value(&self) -> Percentage {
        self.value
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Moves to `phase`, raising the value to the phase floor.
    pub fn enter(&mut self, phase: ProgressPhase) -> Percentage {
        self.phase = phase;
        self.value = self.value.max(phase.floor());
        self.value
    }

    /// Advances one step, bounded by the phase ceiling.
    pub fn tick(&mut self) -> Percentage {
        self.value = self.value.advance_towards(self.step, self.phase.ceiling());
        self.value
    }

    /// Back to 0% in the analysis phase, after a failed submission.
    pub fn reset(&mut self) {
        self.value = Percentage::ZERO;
        self.phase = ProgressPhase::Analysis;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_ticks_stop_at_fifty() {
        let mut progress = SyntheticProgress::new(20);
        assert_eq!(progress.tick().value(), 20);
        assert_eq!(progress.tick().value(), 40);
        assert_eq!(progress.tick().value(), 50);
        assert_eq!(progress.tick().value(), 50);
    }

    #[test]
    fn personalization_jumps_to_floor_and_caps_at_ninety_five() {
        let mut progress = SyntheticProgress::new(10);
        progress.tick();
        assert_eq!(progress.enter(ProgressPhase::Personalization).value(), 50);
        for _ in 0..10 {
            progress.tick();
        }
        assert_eq!(progress.value().value(), 95);
    }

    #[test]
    fn complete_sets_hundred() {
        let mut progress = SyntheticProgress::new(5);
        assert_eq!(progress.enter(ProgressPhase::Complete), Percentage::HUNDRED);
    }

    #[test]
    fn zero_step_is_raised_to_one() {
        let mut progress = SyntheticProgress::new(0);
        assert_eq!(progress.tick().value(), 1);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut progress = SyntheticProgress::new(30);
        progress.enter(ProgressPhase::Personalization);
        progress.tick();
        progress.reset();
        assert_eq!(progress.value(), Percentage::ZERO);
        assert_eq!(progress.phase(), ProgressPhase::Analysis);
    }
}
