//! Questionnaire module - the dynamic question flow of the health wizard.
//!
//! # Module Organization
//!
//! - `answers` - accumulated answer state
//! - `metric` - health metrics, valid ranges and per-metric entries
//! - `proxy` - proxy sub-question batteries
//! - `question` - the closed question variant type
//! - `sequencer` - derives the question list from the answers
//! - `completion` - navigation gate per question
//! - `sync` - cross-metric mirroring of shared proxy answers

mod answers;
mod completion;
mod metric;
mod proxy;
mod question;
mod sequencer;
mod sync;

pub use answers::{AnswerField, AnswerState, DiabetesHistory, SmokingStatus};
pub use completion::is_complete;
pub use metric::{parse_manual_value, InputType, MetricEntry, MetricKey, ValidRange};
pub use proxy::{
    battery, find_proxy_question, ProxyAnswer, ProxyQuestion, SelectionKind, EXERCISE_TYPE,
    FISH_CONSUMPTION,
};
pub use question::{InputField, Question, QuestionId, QuestionKind};
pub use sequencer::{compute_questions, QuestionSequence};
pub use sync::{mirror_targets, propagate, SyncRule, SYNC_RULES};
