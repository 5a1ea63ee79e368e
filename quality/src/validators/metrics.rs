//! Metric range validator.
//!
//! Head coverage, standard confidence and PCA confidence are ratios; a value
//! outside [0, 1] (or NaN) means the rule line was misread.

use rulemine_ontology::ExtractedRule;

use crate::report::{Finding, QualityReport};

const VALIDATOR: &str = "rule/metrics";

/// Checks that every ratio metric of every rule lies in [0, 1].
#[must_use]
pub fn validate(rules: &[ExtractedRule]) -> QualityReport {
    let mut report = QualityReport::new();
    for (number, rule) in (1..).zip(rules) {
        match rule.check() {
            Ok(()) => report.push(Finding::pass(VALIDATOR, Some(number), "metrics within [0, 1]")),
            Err(bad) => report.push(Finding::fail_with_details(
                VALIDATOR,
                Some(number),
                format!("{} metric(s) out of range", bad.len()),
                bad.iter().map(ToString::to_string).collect(),
            )),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_metrics_fail_with_details() {
        let ok = ExtractedRule {
            rule: "?a <p> ?b => ?a <q> ?b".to_string(),
            head_coverage: 0.5,
            std_confidence: 0.5,
            pca_confidence: 0.5,
            positive_examples: 1,
            body_size: 1,
        };
        let bad = ExtractedRule {
            head_coverage: 1.5,
            pca_confidence: f64::NAN,
            ..ok.clone()
        };
        let report = validate(&[ok, bad]);
        assert_eq!(report.failure_count(), 1);
        let failure = &report.results[1];
        assert_eq!(failure.rule, Some(2));
        assert_eq!(failure.details.len(), 2);
        assert!(failure.details[0].starts_with("head_coverage = 1.5"));
    }
}
