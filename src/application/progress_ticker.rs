//! Timer-driven progress bar for an in-flight submission.
//!
//! A background task advances a [`SyntheticProgress`] on a fixed interval
//! and publishes each value on a watch channel. The handler moves it between
//! phases as requests settle and stops it with [`ProgressTicker::finish`] or
//! [`ProgressTicker::cancel`]; the task is aborted and awaited first, so the
//! final published value is always 100 or 0.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::config::ProgressConfig;
use crate::domain::foundation::Percentage;
use crate::domain::submission::{ProgressPhase, SyntheticProgress};

/// Running progress ticker. The task is aborted on drop.
pub struct ProgressTicker {
    state: Arc<Mutex<SyntheticProgress>>,
    values: Arc<watch::Sender<Percentage>>,
    task: JoinHandle<()>,
}

impl ProgressTicker {
    /// Starts ticking from 0% in the analysis phase.
    pub fn start(config: &ProgressConfig, values: Arc<watch::Sender<Percentage>>) -> Self {
        let state = Arc::new(Mutex::new(SyntheticProgress::new(config.step_percent)));
        values.send_replace(Percentage::ZERO);

        let task = {
            let state = Arc::clone(&state);
            let values = Arc::clone(&values);
            let mut ticks = interval(config.tick_interval());
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tokio::spawn(async move {
                // first tick fires immediately
                ticks.tick().await;
                loop {
                    ticks.tick().await;
                    let value = match state.lock() {
                        Ok(mut progress) => progress.tick(),
                        Err(_) => break,
                    };
                    values.send_replace(value);
                }
            })
        };

        Self {
            state,
            values,
            task,
        }
    }

    /// Moves to `phase`, jumping to its floor.
    pub fn enter(&self, phase: ProgressPhase) -> Percentage {
        self.update(|progress| progress.enter(phase))
    }

    /// Current value.
    pub fn value(&self) -> Percentage {
        self.state
            .lock()
            .map(|progress| progress.value())
            .unwrap_or(Percentage::ZERO)
    }

    /// Stops ticking and completes the bar at 100%.
    pub async fn finish(mut self) -> Percentage {
        self.stop().await;
        self.update(|progress| progress.enter(ProgressPhase::Complete))
    }

    /// Stops ticking and resets the bar to 0%.
    pub async fn cancel(mut self) -> Percentage {
        self.stop().await;
        self.update(|progress| {
            progress.reset();
            progress.value()
        })
    }

    async fn stop(&mut self) {
        self.task.abort();
        // only a cancellation error is possible here
        let _ = (&mut self.task).await;
    }

    fn update(&self, apply: impl FnOnce(&mut SyntheticProgress) -> Percentage) -> Percentage {
        let value = match self.state.lock() {
            Ok(mut progress) => apply(&mut progress),
            Err(_) => Percentage::ZERO,
        };
        self.values.send_replace(value);
        value
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
