//! Submission progress bar configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Synthetic progress ticker settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressConfig {
    /// Interval between ticks in milliseconds
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// Percentage points added per tick
    #[serde(default = "default_step_percent")]
    pub step_percent: u8,
}

impl ProgressConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tick_millis == 0 {
            return Err(ValidationError::InvalidTickInterval);
        }
        if !(1..=50).contains(&self.step_percent) {
            return Err(ValidationError::InvalidProgressStep);
        }
        Ok(())
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_millis: default_tick_millis(),
            step_percent: default_step_percent(),
        }
    }
}

fn default_tick_millis() -> u64 {
    400
}

fn default_step_percent() -> u8 {
    5
}
