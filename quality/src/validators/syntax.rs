//! Rule text validator: a rule needs text and an implication arrow.

use rulemine_ontology::ExtractedRule;

use crate::report::{Finding, QualityReport};

const VALIDATOR: &str = "rule/syntax";

/// Arrows accepted between body and head: AMIE's `=>` and the `→` used in
/// hand-written rules.
pub const IMPLICATION_ARROWS: [&str; 2] = ["=>", "→"];

/// Checks that every rule has non-blank text containing an implication.
#[must_use]
pub fn validate(rules: &[ExtractedRule]) -> QualityReport {
    let mut report = QualityReport::new();
    for (number, rule) in (1..).zip(rules) {
        let text = rule.rule.trim();
        let finding = if text.is_empty() {
            Finding::fail(VALIDATOR, Some(number), "rule text is empty")
        } else if !IMPLICATION_ARROWS.iter().any(|arrow| text.contains(arrow)) {
            Finding::fail(VALIDATOR, Some(number), format!("no implication arrow in {text:?}"))
        } else {
            Finding::pass(VALIDATOR, Some(number), "rule text well formed")
        };
        report.push(finding);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(text: &str) -> ExtractedRule {
        ExtractedRule {
            rule: text.to_string(),
            head_coverage: 1.0,
            std_confidence: 1.0,
            pca_confidence: 1.0,
            positive_examples: 1,
            body_size: 1,
        }
    }

    #[test]
    fn empty_and_arrowless_rules_fail() {
        let report = validate(&[
            rule("?a <p> ?b => ?a <q> ?b"),
            rule("   "),
            rule("?a <p> ?b"),
            rule("A(x) ∧ B(x,y) → C(y)"),
        ]);
        let severities: Vec<bool> = report.results.iter().map(Finding::is_failure).collect();
        assert_eq!(severities, [false, true, true, false]);
    }
}
