//! Application layer - the wizard controller and the submission flow.
//!
//! - `wizard_session` - answers, navigation and gating for one user
//! - `submit_assessment` - create + personalize against the backend
//! - `progress_ticker` - synthetic progress while submitting
//! - `replay` - recorded answer scripts driven through a session

mod progress_ticker;
mod replay;
mod submit_assessment;
mod wizard_session;

pub use progress_ticker::ProgressTicker;
pub use replay::{MetricScript, ReplayError, ReplayScript, ScriptValue};
pub use submit_assessment::{
    redirect_path, SubmissionOutcome, SubmitAssessmentHandler, SubmitError,
};
pub use wizard_session::{SummaryRow, WizardError, WizardSession};
