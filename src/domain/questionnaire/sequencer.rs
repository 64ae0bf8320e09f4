//! Question sequencer - derives the ordered wizard steps from the answers.
//!
//! # Sequence
//!
//! 1. welcome
//! 2. info: age, gender, region, risk region
//! 3. choice: smoking status, diabetes history
//! 4. input: age at diagnosis (diabetes only)
//! 5. metric: systolic BP, total cholesterol, HDL
//! 6. metric: HbA1c, serum creatinine (diabetes only)
//! 7. summary
//!
//! The sequence is a pure function of `diabetesHistory` (and the age bound
//! of the diagnosis question). It is rebuilt on every answer change, so the
//! question at a given index may change identity.

use super::answers::{AnswerField, AnswerState, DiabetesHistory, SmokingStatus};
use super::metric::MetricKey;
use super::question::{InputField, Question, QuestionId};

/// Derives the full question list for the current answers.
pub fn compute_questions(answers: &AnswerState) -> Vec<Question> {
    let mut questions = vec![
        Question::Welcome {
            title: "Cek risiko kardiovaskular",
            description: "Jawab beberapa pertanyaan singkat untuk memperkirakan risiko jantung Anda.",
        },
        Question::Info {
            title: "Usia Anda",
            field: AnswerField::Age,
        },
        Question::Info {
            title: "Jenis kelamin",
            field: AnswerField::Gender,
        },
        Question::Info {
            title: "Negara tempat tinggal",
            field: AnswerField::Region,
        },
        Question::Info {
            title: "Wilayah risiko",
            field: AnswerField::RiskRegion,
        },
        Question::Choice {
            title: "Apakah Anda merokok?",
            field: AnswerField::SmokingStatus,
            options: SmokingStatus::OPTIONS,
        },
        Question::Choice {
            title: "Apakah Anda memiliki riwayat diabetes?",
            field: AnswerField::DiabetesHistory,
            options: DiabetesHistory::OPTIONS,
        },
    ];

    let has_diabetes = answers.has_diabetes();
    if has_diabetes {
        questions.push(Question::Input {
            title: "Pada usia berapa Anda didiagnosis diabetes?",
            field: InputField::DiabetesAge,
            min: 1,
            max: answers.age().unwrap_or(0),
        });
    }

    questions.extend(MetricKey::CORE.into_iter().map(Question::health_metric));

    if has_diabetes {
        questions.extend(MetricKey::DIABETES.into_iter().map(Question::health_metric));
    }

    questions.push(Question::Summary {
        title: "Ringkasan jawaban",
    });
    questions
}

/// A derived question list with navigation helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSequence {
    questions: Vec<Question>,
}

impl QuestionSequence {
    /// Derives the sequence for the current answers.
    pub fn for_answers(answers: &AnswerState) -> Self {
        Self {
            questions: compute_questions(answers),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Index of the question with the given id.
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| &q.id() == id)
    }

    /// Index of the last question (the summary).
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    pub fn is_last(&self, index: usize) -> bool {
        index == self.last_index()
    }

    /// Clamps an index into the sequence bounds.
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }
}
