//! Cross-metric synchronization rules for shared proxy questions.
//!
//! Some lifestyle questions appear in more than one battery. When one of
//! them is answered for a metric, the answer is copied into every other
//! metric of the same rule that is currently in proxy mode. The copy happens
//! once per change; there is no lasting binding between the entries.

use super::answers::AnswerState;
use super::metric::{InputType, MetricKey};
use super::proxy::{EXERCISE_TYPE, FISH_CONSUMPTION};

/// A shared proxy key and the metrics it is mirrored across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRule {
    pub key: &'static str,
    pub metrics: &'static [MetricKey],
}

const CHOLESTEROL_METRICS: &[MetricKey] = &[MetricKey::TotalCholesterol, MetricKey::HdlCholesterol];

/// Every synchronization rule in force.
pub const SYNC_RULES: &[SyncRule] = &[
    SyncRule {
        key: EXERCISE_TYPE.key,
        metrics: CHOLESTEROL_METRICS,
    },
    SyncRule {
        key: FISH_CONSUMPTION.key,
        metrics: CHOLESTEROL_METRICS,
    },
];

/// Metrics that should receive a copy when `key` changes on `source`.
pub fn mirror_targets(source: MetricKey, key: &str) -> Vec<MetricKey> {
    SYNC_RULES
        .iter()
        .filter(|rule| rule.key == key && rule.metrics.contains(&source))
        .flat_map(|rule| rule.metrics.iter().copied())
        .filter(|metric| *metric != source)
        .collect()
}

/// Copies the answer for `key` from `source` into its proxy-mode peers.
///
/// Returns the metrics that were updated.
pub fn propagate(answers: &mut AnswerState, source: MetricKey, key: &str) -> Vec<MetricKey> {
    let Some(answer) = answers
        .metric(source)
        .and_then(|entry| entry.proxy_answer(key))
        .cloned()
    else {
        return Vec::new();
    };

    let mut updated = Vec::new();
    for target in mirror_targets(source, key) {
        let in_proxy_mode = answers
            .metric(target)
            .is_some_and(|entry| entry.input_type() == InputType::Proxy);
        if in_proxy_mode {
            answers.set_proxy_answer(target, key, answer.clone());
            updated.push(target);
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::ProxyAnswer;

    fn lari() -> ProxyAnswer {
        ProxyAnswer::single("Lari")
    }

    #[test]
    fn mirror_targets_pairs_cholesterol_metrics() {
        assert_eq!(
            mirror_targets(MetricKey::TotalCholesterol, "exerciseType"),
            vec![MetricKey::HdlCholesterol]
        );
        assert_eq!(
            mirror_targets(MetricKey::HdlCholesterol, "fishConsumption"),
            vec![MetricKey::TotalCholesterol]
        );
    }

    #[test]
    fn unshared_keys_and_other_metrics_have_no_targets() {
        assert!(mirror_targets(MetricKey::TotalCholesterol, "dietPattern").is_empty());
        assert!(mirror_targets(MetricKey::SystolicBloodPressure, "exerciseType").is_empty());
    }

    #[test]
    fn propagate_copies_into_proxy_mode_peer() {
        let mut answers = AnswerState::new();
        answers.select_input_type(MetricKey::HdlCholesterol, InputType::Proxy);
        answers.select_input_type(MetricKey::TotalCholesterol, InputType::Proxy);
        answers.set_proxy_answer(MetricKey::TotalCholesterol, "exerciseType", lari());

        let updated = propagate(&mut answers, MetricKey::TotalCholesterol, "exerciseType");

        assert_eq!(updated, vec![MetricKey::HdlCholesterol]);
        assert_eq!(
            answers
                .metric(MetricKey::HdlCholesterol)
                .and_then(|e| e.proxy_answer("exerciseType")),
            Some(&lari())
        );
    }

    #[test]
    fn propagate_skips_peer_in_manual_mode() {
        let mut answers = AnswerState::new();
        answers.select_input_type(MetricKey::HdlCholesterol, InputType::Manual);
        answers.select_input_type(MetricKey::TotalCholesterol, InputType::Proxy);
        answers.set_proxy_answer(MetricKey::TotalCholesterol, "exerciseType", lari());

        let updated = propagate(&mut answers, MetricKey::TotalCholesterol, "exerciseType");

        assert!(updated.is_empty());
        assert!(answers
            .metric(MetricKey::HdlCholesterol)
            .unwrap()
            .proxy_answers()
            .is_empty());
    }

    #[test]
    fn propagate_skips_peer_without_entry() {
        let mut answers = AnswerState::new();
        answers.select_input_type(MetricKey::TotalCholesterol, InputType::Proxy);
        answers.set_proxy_answer(MetricKey::TotalCholesterol, "fishConsumption", ProxyAnswer::single("Jarang"));

        assert!(propagate(&mut answers, MetricKey::TotalCholesterol, "fishConsumption").is_empty());
        assert!(answers.metric(MetricKey::HdlCholesterol).is_none());
    }

    #[test]
    fn every_rule_key_exists_in_each_listed_battery() {
        for rule in SYNC_RULES {
            for metric in rule.metrics {
                assert!(
                    crate::domain::questionnaire::find_proxy_question(*metric, rule.key).is_some(),
                    "{} missing from {}",
                    rule.key,
                    metric
                );
            }
        }
    }
}
