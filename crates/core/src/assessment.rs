//! Assessment orchestration.
//!
//! [`SymptomEngine`] owns the loaded [`RuleSet`] and turns one [`AssessmentInput`] into one
//! [`AssessmentResult`]. It holds no per-request state, so a single instance constructed at
//! startup can be cloned into every request handler.

use crate::config::CoreConfig;
use crate::constants::{ADVICE, ESCALATION_MESSAGE, MAX_LIKELY_CONDITIONS};
use crate::red_flags::detect;
use crate::rules::RuleSet;
use crate::scoring::score_condition;
use crate::TriageResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Coarse urgency classification of an assessment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageLevel {
    Urgent,
    Routine,
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageLevel::Urgent => write!(f, "urgent"),
            TriageLevel::Routine => write!(f, "routine"),
        }
    }
}

/// A ranked candidate condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LikelyCondition {
    pub condition: String,
    /// Heuristic score rounded to two decimals; always strictly positive.
    pub score: f64,
}

/// Input to a single assessment.
///
/// Values are expected to be validated by the caller (age 0–120).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssessmentInput {
    pub age: u32,
    /// Accepted but not used by any current rule.
    pub sex: Option<String>,
    pub symptoms: Vec<String>,
    /// Accepted but not used by any current rule.
    pub duration_days: Option<u32>,
    pub notes: String,
}

/// Result of a single assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub triage_level: TriageLevel,
    pub triage_reason: Vec<String>,
    pub likely_conditions: Vec<LikelyCondition>,
    pub advice: Vec<String>,
}

/// The rule-evaluation engine.
///
/// Cloning is cheap: the rule set is shared behind an [`Arc`] and never mutated.
#[derive(Clone, Debug)]
pub struct SymptomEngine {
    rules: Arc<RuleSet>,
}

impl SymptomEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Loads the rule set named by `cfg` and builds an engine around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules file cannot be read or is invalid. Callers should treat
    /// this as a fatal startup failure.
    pub fn from_config(cfg: &CoreConfig) -> TriageResult<Self> {
        let rules = RuleSet::load(cfg.rules_path())?;
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Assesses one set of symptoms.
    ///
    /// Never fails: an empty symptom list simply yields no tokens, no conditions and a
    /// routine triage level.
    ///
    /// Conditions with equal rounded scores keep their configuration order.
    pub fn assess(&self, input: &AssessmentInput) -> AssessmentResult {
        let tokens = self.rules.extract(input.symptoms.as_slice(), &input.notes);
        let report = detect(&self.rules, &tokens, input.age);

        let mut likely_conditions: Vec<LikelyCondition> = self
            .rules
            .conditions()
            .iter()
            .filter_map(|condition| {
                let score = score_condition(condition, &tokens, input.age, input.duration_days);
                (score > 0.0).then(|| LikelyCondition {
                    condition: condition.name.clone(),
                    score: round_score(score),
                })
            })
            .collect();

        // Stable sort, so ties stay in configuration order.
        likely_conditions.sort_by(|a, b| b.score.total_cmp(&a.score));
        likely_conditions.truncate(MAX_LIKELY_CONDITIONS);

        let mut triage_reason = report.reasons;
        let triage_level = if report.urgent {
            triage_reason.push(ESCALATION_MESSAGE.to_string());
            TriageLevel::Urgent
        } else {
            TriageLevel::Routine
        };

        tracing::debug!(
            tokens = tokens.len(),
            triage_level = %triage_level,
            reasons = triage_reason.len(),
            conditions = likely_conditions.len(),
            "assessment complete"
        );

        AssessmentResult {
            triage_level,
            triage_reason,
            likely_conditions,
            advice: ADVICE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Rounds to two decimals, resolving exact ties to the even neighbour (0.125 -> 0.12).
fn round_score(score: f64) -> f64 {
    (score * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AGE_RISK_MESSAGE;

    fn engine(yaml: &str) -> SymptomEngine {
        SymptomEngine::new(RuleSet::parse(yaml).expect("parse rules"))
    }

    fn input(age: u32, symptoms: &[&str], notes: &str) -> AssessmentInput {
        AssessmentInput {
            age,
            sex: None,
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            duration_days: None,
            notes: notes.to_string(),
        }
    }

    fn names(result: &AssessmentResult) -> Vec<&str> {
        result
            .likely_conditions
            .iter()
            .map(|c| c.condition.as_str())
            .collect()
    }

    #[test]
    fn routine_flu_example() {
        let engine = engine(
            r#"conditions:
  - name: Flu
    keywords: [fever, cough]
    weights: { keyword: 1.0 }
red_flags:
  - keywords: [chestpain]
    message: Seek emergency care immediately.
"#,
        );

        let result = engine.assess(&AssessmentInput {
            age: 30,
            sex: Some("male".into()),
            symptoms: vec!["fever".into(), "cough".into()],
            duration_days: Some(3),
            notes: String::new(),
        });

        assert_eq!(result.triage_level, TriageLevel::Routine);
        assert!(result.triage_reason.is_empty());
        assert_eq!(
            result.likely_conditions,
            vec![LikelyCondition {
                condition: "Flu".into(),
                score: 2.0
            }]
        );
        assert_eq!(result.advice, ADVICE.to_vec());
    }

    #[test]
    fn urgent_chest_pain_example() {
        let engine = engine(
            r#"red_flags:
  - keywords: [chestpain]
    message: Seek emergency care immediately.
keyword_normalization:
  chest: chestpain
stopwords: [severe, pain]
"#,
        );

        let result = engine.assess(&input(40, &["severe chest pain"], ""));

        assert_eq!(result.triage_level, TriageLevel::Urgent);
        assert_eq!(
            result.triage_reason,
            vec!["Seek emergency care immediately.", ESCALATION_MESSAGE]
        );
        assert!(result.likely_conditions.is_empty());
    }

    #[test]
    fn age_risk_alone_stays_routine() {
        let engine = engine("conditions: []\n");
        let result = engine.assess(&input(80, &["tired"], ""));

        assert_eq!(result.triage_level, TriageLevel::Routine);
        assert_eq!(result.triage_reason, vec![AGE_RISK_MESSAGE]);
    }

    #[test]
    fn escalation_message_follows_age_risk() {
        let engine = engine(
            "red_flags:\n  - keywords: [seizure]\n    message: Seizures need urgent care.\n",
        );
        let result = engine.assess(&input(1, &["seizure"], ""));

        assert_eq!(result.triage_level, TriageLevel::Urgent);
        assert_eq!(
            result.triage_reason,
            vec!["Seizures need urgent care.", AGE_RISK_MESSAGE, ESCALATION_MESSAGE]
        );
    }

    #[test]
    fn ranks_higher_scores_first() {
        let engine = engine(
            r#"conditions:
  - name: B
    keywords: [cough]
    weights: { keyword: 1.5 }
  - name: A
    keywords: [fever, cough]
    weights: { keyword: 1.5 }
"#,
        );
        let result = engine.assess(&input(30, &["fever", "cough"], ""));

        assert_eq!(names(&result), vec!["A", "B"]);
        assert_eq!(result.likely_conditions[0].score, 3.0);
        assert_eq!(result.likely_conditions[1].score, 1.5);
    }

    #[test]
    fn truncates_to_top_five() {
        let engine = engine(
            r#"conditions:
  - { name: C1, keywords: [a] }
  - { name: C2, keywords: [a, b] }
  - { name: C3, keywords: [a, b, c] }
  - { name: C4, keywords: [a, b, c, d] }
  - { name: C5, keywords: [a, b, c, d, e] }
  - { name: C6, keywords: [a, b, c, d, e, f] }
  - { name: C7, keywords: [a, b, c, d, e, f, g] }
"#,
        );
        let result = engine.assess(&input(30, &["a b c d e f g"], ""));

        assert_eq!(result.likely_conditions.len(), MAX_LIKELY_CONDITIONS);
        assert_eq!(names(&result), vec!["C7", "C6", "C5", "C4", "C3"]);
    }

    #[test]
    fn ties_keep_configuration_order() {
        let engine = engine(
            r#"conditions:
  - { name: Zeta, keywords: [cough] }
  - { name: Alpha, keywords: [cough] }
  - { name: Mid, keywords: [cough, fever] }
"#,
        );

        let first = engine.assess(&input(30, &["fever", "cough"], ""));
        assert_eq!(names(&first), vec!["Mid", "Zeta", "Alpha"]);

        for _ in 0..10 {
            let again = engine.assess(&input(30, &["cough", "fever"], ""));
            assert_eq!(again, first);
        }
    }

    #[test]
    fn excludes_zero_scored_conditions() {
        let engine = engine(
            r#"conditions:
  - { name: Flu, keywords: [fever], negative_keywords: [rash] }
  - { name: Measles, keywords: [rash, spots] }
"#,
        );
        let result = engine.assess(&input(30, &["fever", "rash"], ""));

        assert_eq!(names(&result), vec!["Measles"]);
        assert!(result.likely_conditions.iter().all(|c| c.score > 0.0));
    }

    #[test]
    fn notes_contribute_tokens() {
        let engine = engine("conditions:\n  - { name: Flu, keywords: [fever, cough] }\n");
        let result = engine.assess(&input(30, &["fever"], "a dry cough at night"));

        assert_eq!(result.likely_conditions[0].score, 2.0);
    }

    #[test]
    fn scores_are_rounded_to_two_decimals() {
        let engine = engine(
            "conditions:\n  - { name: Cold, keywords: [sneeze, cough], weights: { keyword: 0.3333 } }\n",
        );
        let result = engine.assess(&input(30, &["sneeze", "cough"], ""));

        assert_eq!(result.likely_conditions[0].score, 0.67);
    }

    #[test]
    fn rounding_ties_go_to_even() {
        let engine = engine(
            r#"conditions:
  - { name: A, keywords: [x], weights: { keyword: 0.125 } }
  - { name: B, keywords: [x], weights: { keyword: 0.625 } }
"#,
        );
        let result = engine.assess(&input(30, &["x"], ""));

        let scores: Vec<f64> = result.likely_conditions.iter().map(|c| c.score).collect();
        assert_eq!(names(&result), vec!["B", "A"]);
        assert_eq!(scores, vec![0.62, 0.12]);
    }

    #[test]
    fn empty_input_is_a_valid_routine_outcome() {
        let engine = engine("conditions:\n  - { name: Flu, keywords: [fever] }\n");
        let result = engine.assess(&input(30, &[], ""));

        assert_eq!(result.triage_level, TriageLevel::Routine);
        assert!(result.triage_reason.is_empty());
        assert!(result.likely_conditions.is_empty());
        assert_eq!(result.advice.len(), 3);
    }

    #[test]
    fn sex_does_not_affect_result() {
        let engine = engine("conditions:\n  - { name: Flu, keywords: [fever], age_band: [18, 60] }\n");
        let mut with_sex = input(30, &["fever"], "");
        let without_sex = with_sex.clone();
        with_sex.sex = Some("female".into());

        assert_eq!(engine.assess(&with_sex), engine.assess(&without_sex));
    }

    #[test]
    fn result_serialises_to_the_boundary_shape() {
        let engine = engine("conditions:\n  - { name: Flu, keywords: [fever] }\n");
        let result = engine.assess(&input(30, &["fever"], ""));

        let json = serde_json::to_value(&result).expect("serialise result");
        assert_eq!(json["triage_level"], "routine");
        assert_eq!(json["likely_conditions"][0]["condition"], "Flu");
        assert_eq!(json["likely_conditions"][0]["score"], 1.0);
        assert_eq!(json["advice"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn shipped_rules_end_to_end() {
        let path = crate::config::resolve_rules_path(None).expect("resolve shipped rules");
        let cfg = CoreConfig::new(path).expect("CoreConfig::new should succeed");
        let engine = SymptomEngine::from_config(&cfg).expect("load shipped rules");

        let urgent = engine.assess(&input(40, &["severe chest pain"], ""));
        assert_eq!(urgent.triage_level, TriageLevel::Urgent);
        assert_eq!(urgent.triage_reason.last().map(String::as_str), Some(ESCALATION_MESSAGE));

        let routine = engine.assess(&input(30, &["fever", "cough"], "feeling tired, body aches"));
        assert_eq!(routine.triage_level, TriageLevel::Routine);
        assert_eq!(routine.likely_conditions[0].condition, "Influenza");
        assert!(routine.likely_conditions.len() <= MAX_LIKELY_CONDITIONS);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SymptomEngine>();

        let engine = engine("conditions:\n  - { name: Flu, keywords: [fever] }\n");
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.assess(&input(30, &["fever"], "")))
            })
            .collect();

        for handle in handles {
            let result = handle.join().expect("thread should not panic");
            assert_eq!(result.likely_conditions.len(), 1);
        }
    }
}
