//! Completion evaluator - decides whether "next" may be pressed.
//!
//! This is a navigation gate, not a validation API: it only answers yes or
//! no and never raises.

use super::answers::AnswerState;
use super::question::{InputField, Question};

/// True if the question has been answered well enough to move past it.
pub fn is_complete(question: &Question, answers: &AnswerState) -> bool {
    match question {
        Question::Welcome { .. } | Question::Summary { .. } => true,
        Question::Info { field, .. } | Question::Choice { field, .. } => {
            answers.field_value(*field).is_some()
        }
        Question::Input { field, min, max, .. } => match field {
            InputField::DiabetesAge => answers
                .diabetes_age_years()
                .is_some_and(|years| years >= (*min).max(1) && years <= *max),
        },
        Question::HealthMetric { metric, .. } => answers.is_metric_completed(*metric),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Sex, UserProfile};
    use crate::domain::questionnaire::{
        compute_questions, AnswerField, DiabetesHistory, InputType, MetricKey, QuestionKind,
        SmokingStatus,
    };
    use chrono::NaiveDate;

    fn answers_aged(age_years: i32) -> AnswerState {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let profile = UserProfile::new(
            NaiveDate::from_ymd_opt(2026 - age_years, 1, 1).unwrap(),
            Sex::Male,
            "indonesia",
        );
        AnswerState::from_profile(&profile, today)
    }

    fn diabetes_age_question(answers: &AnswerState) -> Question {
        compute_questions(answers)
            .into_iter()
            .find(|q| q.kind() == QuestionKind::Input)
            .expect("diabetes age question present")
    }

    #[test]
    fn welcome_and_summary_are_always_complete() {
        let answers = AnswerState::new();
        assert!(is_complete(
            &Question::Welcome {
                title: "",
                description: ""
            },
            &answers
        ));
        assert!(is_complete(&Question::Summary { title: "" }, &answers));
    }

    #[test]
    fn info_questions_follow_profile_values() {
        let question = Question::Info {
            title: "Wilayah risiko",
            field: AnswerField::RiskRegion,
        };
        assert!(is_complete(&question, &answers_aged(40)));
        assert!(!is_complete(&question, &AnswerState::new()));
    }

    #[test]
    fn choice_questions_need_an_answer() {
        let question = Question::Choice {
            title: "Merokok",
            field: AnswerField::SmokingStatus,
            options: SmokingStatus::OPTIONS,
        };
        let mut answers = answers_aged(40);
        assert!(!is_complete(&question, &answers));
        answers.set_smoking_status(SmokingStatus::CurrentSmoker);
        assert!(is_complete(&question, &answers));
    }

    #[test]
    fn diagnosis_age_cannot_exceed_current_age() {
        let mut answers = answers_aged(40);
        answers.set_diabetes_history(DiabetesHistory::Yes);
        answers.set_diabetes_age("45");
        let question = diabetes_age_question(&answers);
        assert!(!is_complete(&question, &answers));

        answers.set_diabetes_age("40");
        assert!(is_complete(&question, &answers));
    }

    #[test]
    fn diagnosis_age_must_be_positive_and_numeric() {
        let mut answers = answers_aged(40);
        answers.set_diabetes_history(DiabetesHistory::Yes);
        let question = diabetes_age_question(&answers);

        assert!(!is_complete(&question, &answers));
        for raw in ["0", "", "abc", "-3", "12.5"] {
            answers.set_diabetes_age(raw);
            assert!(!is_complete(&question, &answers), "{:?} accepted", raw);
        }
        answers.set_diabetes_age("1");
        assert!(is_complete(&question, &answers));
    }

    #[test]
    fn metric_question_mirrors_entry_completion() {
        let metric = MetricKey::TotalCholesterol;
        let question = Question::health_metric(metric);
        let mut answers = answers_aged(40);
        assert!(!is_complete(&question, &answers));

        answers.select_input_type(metric, InputType::Manual);
        answers.set_manual_value(metric, "25");
        assert!(!is_complete(&question, &answers));

        answers.set_manual_value(metric, "5");
        assert!(is_complete(&question, &answers));
    }
}
