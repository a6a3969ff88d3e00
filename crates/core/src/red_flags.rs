//! Red-flag (urgency) detection.

use crate::constants::{AGE_RISK_MAX_INFANT, AGE_RISK_MESSAGE, AGE_RISK_MIN_ELDERLY};
use crate::rules::{RedFlag, RuleSet};
use crate::tokens::SymptomTokens;

/// Outcome of red-flag detection for one assessment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedFlagReport {
    /// True when at least one configured red flag fired.
    pub urgent: bool,
    /// Messages of the fired red flags in configuration order, followed by the age-risk message if any.
    pub reasons: Vec<String>,
}

impl RedFlag {
    /// Returns true if any of this flag's keywords is present in `tokens`.
    pub fn is_triggered_by(&self, tokens: &SymptomTokens) -> bool {
        self.keywords.iter().any(|keyword| tokens.contains(keyword))
    }
}

/// Returns true for ages that warrant the age-risk reason.
pub fn is_age_at_risk(age: u32) -> bool {
    age <= AGE_RISK_MAX_INFANT || age >= AGE_RISK_MIN_ELDERLY
}

/// Inspects the tokens and age for urgent-care triggers.
///
/// The age-risk message is informational only: it is appended to the reasons but
/// never sets `urgent` by itself.
pub fn detect(rules: &RuleSet, tokens: &SymptomTokens, age: u32) -> RedFlagReport {
    let mut report = RedFlagReport::default();

    for flag in rules.red_flags() {
        if flag.is_triggered_by(tokens) {
            report.urgent = true;
            report.reasons.push(flag.message.clone());
        }
    }

    if is_age_at_risk(age) {
        report.reasons.push(AGE_RISK_MESSAGE.to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::parse(
            r#"red_flags:
  - keywords: [chestpain, crushing]
    message: Seek emergency care immediately.
  - keywords: [unconscious, fainting]
    message: Loss of consciousness needs urgent assessment.
"#,
        )
        .expect("parse rules")
    }

    fn tokens(items: &[&str]) -> SymptomTokens {
        items.iter().copied().collect()
    }

    #[test]
    fn matching_keyword_sets_urgent_and_reports_message() {
        let report = detect(&rules(), &tokens(&["chestpain", "sweating"]), 40);
        assert!(report.urgent);
        assert_eq!(report.reasons, vec!["Seek emergency care immediately."]);
    }

    #[test]
    fn no_match_is_routine_with_no_reasons() {
        let report = detect(&rules(), &tokens(&["cough"]), 30);
        assert_eq!(report, RedFlagReport::default());
    }

    #[test]
    fn messages_follow_configuration_order() {
        let report = detect(&rules(), &tokens(&["fainting", "crushing"]), 30);
        assert!(report.urgent);
        assert_eq!(
            report.reasons,
            vec![
                "Seek emergency care immediately.",
                "Loss of consciousness needs urgent assessment.",
            ]
        );
    }

    #[test]
    fn age_risk_boundaries() {
        let rules = rules();
        let empty = tokens(&[]);

        for age in [0, 1, 75, 120] {
            let report = detect(&rules, &empty, age);
            assert_eq!(report.reasons, vec![AGE_RISK_MESSAGE], "age {age}");
            assert!(!report.urgent, "age {age} alone must not be urgent");
        }

        for age in [2, 30, 74] {
            let report = detect(&rules, &empty, age);
            assert!(report.reasons.is_empty(), "age {age}");
        }
    }

    #[test]
    fn age_risk_message_comes_last() {
        let report = detect(&rules(), &tokens(&["unconscious"]), 80);
        assert!(report.urgent);
        assert_eq!(
            report.reasons,
            vec!["Loss of consciousness needs urgent assessment.", AGE_RISK_MESSAGE]
        );
    }
}
