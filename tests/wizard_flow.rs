//! Integration tests for the wizard core: sequencing, completion gating,
//! proxy synchronization and payload building.

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{json, Value};

use cardio_assess::application::WizardSession;
use cardio_assess::domain::profile::{Sex, UserProfile};
use cardio_assess::domain::questionnaire::{
    battery, compute_questions, is_complete, AnswerField, AnswerState, DiabetesHistory, InputType,
    MetricKey, ProxyAnswer, ProxyQuestion, Question, QuestionKind, SelectionKind,
};
use cardio_assess::domain::submission::build_payload;

// =============================================================================
// Helpers
// =============================================================================

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn profile(dob: (i32, u32, u32)) -> UserProfile {
    UserProfile::new(
        NaiveDate::from_ymd_opt(dob.0, dob.1, dob.2).unwrap(),
        Sex::Male,
        "indonesia",
    )
}

fn first_option(question: &ProxyQuestion) -> ProxyAnswer {
    match question.kind {
        SelectionKind::Single => ProxyAnswer::single(question.options[0]),
        SelectionKind::Multiple => ProxyAnswer::multiple([question.options[0]]),
    }
}

fn payload_json(answers: &AnswerState) -> Value {
    serde_json::to_value(build_payload(answers).unwrap()).unwrap()
}

fn metric_questions(questions: &[Question]) -> Vec<MetricKey> {
    questions.iter().filter_map(Question::metric).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn non_diabetic_manual_run_builds_expected_payload() {
    let mut session = WizardSession::from_profile(&profile((1990, 1, 1)), today());
    session
        .answer_choice(AnswerField::SmokingStatus, "Bukan perokok saat ini")
        .unwrap();
    session
        .answer_choice(AnswerField::DiabetesHistory, "Tidak")
        .unwrap();
    for (metric, value) in [
        (MetricKey::SystolicBloodPressure, "120"),
        (MetricKey::TotalCholesterol, "5"),
        (MetricKey::HdlCholesterol, "1.2"),
    ] {
        session.select_input_type(metric, InputType::Manual).unwrap();
        session.set_manual_value(metric, value).unwrap();
    }

    while session.next() {}
    assert!(session.is_on_last_question());

    let payload = payload_json(session.answers());
    assert_eq!(payload["has_diabetes"], json!(false));
    assert_eq!(payload["smoking_status"], json!("Bukan perokok saat ini"));
    assert_eq!(payload["sbp_input_type"], json!("manual"));
    assert_eq!(payload["sbp_value"], json!(120.0));
    assert_eq!(payload["tchol_value"], json!(5.0));
    assert_eq!(payload["hdl_value"], json!(1.2));

    let keys: Vec<&String> = payload.as_object().unwrap().keys().collect();
    assert!(keys
        .iter()
        .all(|k| !k.starts_with("hba1c_") && !k.starts_with("scr_")));
}

#[test]
fn diagnosis_age_above_current_age_blocks_navigation() {
    // 40 years old on 2026-10-18
    let mut session = WizardSession::from_profile(&profile((1986, 1, 1)), today());
    session
        .answer_choice(AnswerField::SmokingStatus, "Perokok saat ini")
        .unwrap();
    session
        .answer_choice(AnswerField::DiabetesHistory, "Ya")
        .unwrap();
    session.set_diabetes_age("45").unwrap();
    assert_eq!(session.answers().age(), Some(40));

    while session.next() {}
    assert_eq!(session.current_question().kind(), QuestionKind::Input);
    assert!(!session.can_advance());

    session.set_diabetes_age("40").unwrap();
    assert!(session.next());
    assert_eq!(
        session.current_question().metric(),
        Some(MetricKey::SystolicBloodPressure)
    );
}

#[test]
fn exercise_answer_reaches_hdl_without_explicit_assignment() {
    let mut session = WizardSession::from_profile(&profile((1990, 1, 1)), today());
    session
        .select_input_type(MetricKey::HdlCholesterol, InputType::Proxy)
        .unwrap();
    session
        .select_input_type(MetricKey::TotalCholesterol, InputType::Proxy)
        .unwrap();

    session
        .set_proxy_answer(
            MetricKey::TotalCholesterol,
            "exerciseType",
            ProxyAnswer::single("Lari"),
        )
        .unwrap();

    let hdl = session.answers().metric(MetricKey::HdlCholesterol).unwrap();
    assert_eq!(
        hdl.proxy_answer("exerciseType"),
        Some(&ProxyAnswer::single("Lari"))
    );
}

#[test]
fn mirroring_skips_metrics_in_manual_mode() {
    let mut session = WizardSession::from_profile(&profile((1990, 1, 1)), today());
    session
        .select_input_type(MetricKey::HdlCholesterol, InputType::Manual)
        .unwrap();
    session
        .select_input_type(MetricKey::TotalCholesterol, InputType::Proxy)
        .unwrap();

    let mirrored = session
        .set_proxy_answer(
            MetricKey::TotalCholesterol,
            "fishConsumption",
            ProxyAnswer::single("Jarang"),
        )
        .unwrap();

    assert!(mirrored.is_empty());
    let hdl = session.answers().metric(MetricKey::HdlCholesterol).unwrap();
    assert!(hdl.proxy_answers().is_empty());
}

#[test]
fn proxy_metrics_are_renamed_in_payload() {
    let mut session = WizardSession::from_profile(&profile((1990, 1, 1)), today());
    session
        .select_input_type(MetricKey::SystolicBloodPressure, InputType::Proxy)
        .unwrap();
    for question in battery(MetricKey::SystolicBloodPressure) {
        session
            .set_proxy_answer(
                MetricKey::SystolicBloodPressure,
                question.key,
                first_option(question),
            )
            .unwrap();
    }

    let payload = payload_json(session.answers());
    assert_eq!(payload["sbp_input_type"], json!("proxy"));
    let answers = payload["sbp_proxy_answers"].as_object().unwrap();
    assert_eq!(answers["q_fam_htn"], json!("Ya"));
    assert_eq!(answers["q_htn_symptoms"], json!(["Sakit kepala"]));
    assert!(answers.keys().all(|k| k.starts_with("q_")));
}

#[test]
fn switching_diabetes_off_drops_diabetes_metrics() {
    let mut session = WizardSession::from_profile(&profile((1990, 1, 1)), today());
    session
        .answer_choice(AnswerField::DiabetesHistory, "Ya")
        .unwrap();
    session.set_diabetes_age("30").unwrap();
    session
        .select_input_type(MetricKey::Hba1c, InputType::Manual)
        .unwrap();
    session.set_manual_value(MetricKey::Hba1c, "50").unwrap();
    assert_eq!(payload_json(session.answers())["hba1c_value"], json!(50.0));

    session
        .answer_choice(AnswerField::DiabetesHistory, "Tidak")
        .unwrap();
    let payload = payload_json(session.answers());
    assert_eq!(payload.get("hba1c_value"), None);
    assert_eq!(payload["age_at_diabetes_diagnosis"], Value::Null);
    assert_eq!(session.questions().len(), 11);
}

// =============================================================================
// Properties
// =============================================================================

fn history_strategy() -> impl Strategy<Value = Option<DiabetesHistory>> {
    prop_oneof![
        Just(None),
        Just(Some(DiabetesHistory::No)),
        Just(Some(DiabetesHistory::Yes)),
    ]
}

fn metric_strategy() -> impl Strategy<Value = MetricKey> {
    prop::sample::select(MetricKey::ALL.to_vec())
}

/// A metric entry built through the public mutators: mode, a manual value,
/// and a subset of the battery answered.
#[derive(Debug, Clone)]
struct EntryPlan {
    metric: MetricKey,
    mode: InputType,
    manual: f64,
    answered: Vec<bool>,
}

fn entry_strategy() -> impl Strategy<Value = EntryPlan> {
    (
        metric_strategy(),
        prop_oneof![
            Just(InputType::Unselected),
            Just(InputType::Manual),
            Just(InputType::Proxy),
        ],
        -10.0f64..400.0,
        prop::collection::vec(any::<bool>(), 4),
    )
        .prop_map(|(metric, mode, manual, answered)| EntryPlan {
            metric,
            mode,
            manual,
            answered,
        })
}

fn apply_plan(answers: &mut AnswerState, plan: &EntryPlan) {
    answers.select_input_type(plan.metric, plan.mode);
    match plan.mode {
        InputType::Manual => answers.set_manual_value(plan.metric, plan.manual.to_string()),
        InputType::Proxy => {
            for (question, answered) in battery(plan.metric).iter().zip(&plan.answered) {
                if *answered {
                    answers.set_proxy_answer(plan.metric, question.key, first_option(question));
                }
            }
        }
        InputType::Unselected => {}
    }
}

proptest! {
    #[test]
    fn sequence_shape_follows_diabetes_history(history in history_strategy(), age in 18u32..90) {
        let mut answers = AnswerState::from_profile(
            &profile((2026 - age as i32, 1, 1)),
            today(),
        );
        if let Some(history) = history {
            answers.set_diabetes_history(history);
        }
        let questions = compute_questions(&answers);
        let inputs = questions.iter().filter(|q| q.kind() == QuestionKind::Input).count();
        let metrics = metric_questions(&questions);

        prop_assert_eq!(questions.first().map(Question::kind), Some(QuestionKind::Welcome));
        prop_assert_eq!(questions.last().map(Question::kind), Some(QuestionKind::Summary));
        if history == Some(DiabetesHistory::Yes) {
            prop_assert_eq!(inputs, 1);
            prop_assert_eq!(metrics, MetricKey::ALL.to_vec());
        } else {
            prop_assert_eq!(inputs, 0);
            prop_assert_eq!(metrics, MetricKey::CORE.to_vec());
        }
    }

    #[test]
    fn metric_question_completion_mirrors_entry_flag(plan in entry_strategy()) {
        let mut answers = AnswerState::new();
        answers.set_diabetes_history(DiabetesHistory::Yes);
        apply_plan(&mut answers, &plan);

        let question = Question::health_metric(plan.metric);
        let flag = answers.metric(plan.metric).is_some_and(|e| e.is_completed());
        prop_assert_eq!(is_complete(&question, &answers), flag);
    }

    #[test]
    fn manual_completion_matches_range_membership(metric in metric_strategy(), value in -10.0f64..400.0) {
        let mut answers = AnswerState::new();
        answers.select_input_type(metric, InputType::Manual);
        answers.set_manual_value(metric, value.to_string());

        prop_assert_eq!(
            answers.is_metric_completed(metric),
            metric.valid_range().contains(value)
        );
    }

    #[test]
    fn payload_omits_incomplete_metrics(plans in prop::collection::vec(entry_strategy(), 1..8)) {
        let mut answers = AnswerState::new();
        answers.set_diabetes_history(DiabetesHistory::Yes);
        for plan in &plans {
            apply_plan(&mut answers, plan);
        }

        let payload = build_payload(&answers).unwrap();
        for metric in MetricKey::ALL {
            prop_assert_eq!(payload.has_metric(metric), answers.is_metric_completed(metric));
        }
    }
}

#[test]
fn manual_range_boundaries_are_inclusive() {
    let cases = [
        (MetricKey::SystolicBloodPressure, "50", "300", "49", "301"),
        (MetricKey::TotalCholesterol, "1", "20", "0.9", "20.1"),
        (MetricKey::HdlCholesterol, "0.1", "5", "0.09", "5.1"),
        (MetricKey::Hba1c, "20", "200", "19", "201"),
        (MetricKey::SerumCreatinine, "0.1", "15", "0.09", "15.1"),
    ];
    for (metric, min, max, below, above) in cases {
        let mut answers = AnswerState::new();
        answers.select_input_type(metric, InputType::Manual);
        for (value, expected) in [(min, true), (max, true), (below, false), (above, false)] {
            answers.set_manual_value(metric, value);
            assert_eq!(
                answers.is_metric_completed(metric),
                expected,
                "{} = {}",
                metric,
                value
            );
        }
    }
}
