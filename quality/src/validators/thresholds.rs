//! Confidence threshold validator.
//!
//! AMIE filters on its own thresholds, so a rule below them usually comes
//! from a run with other settings. That is worth a warning, not a failure.

use rulemine_ontology::ExtractedRule;

use crate::report::{Finding, QualityReport};

const VALIDATOR: &str = "rule/thresholds";

/// Minimum confidences a rule is expected to meet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thresholds {
    /// Minimum standard confidence (`-minc`).
    pub min_std_confidence: f64,
    /// Minimum PCA confidence (`-minpca`).
    pub min_pca_confidence: f64,
}

/// Warns for every rule whose confidences fall below `thresholds`.
#[must_use]
pub fn validate(rules: &[ExtractedRule], thresholds: Thresholds) -> QualityReport {
    let mut report = QualityReport::new();
    for (number, rule) in (1..).zip(rules) {
        let mut below = Vec::new();
        if rule.std_confidence < thresholds.min_std_confidence {
            below.push(format!(
                "std confidence {} < {}",
                rule.std_confidence, thresholds.min_std_confidence
            ));
        }
        if rule.pca_confidence < thresholds.min_pca_confidence {
            below.push(format!(
                "pca confidence {} < {}",
                rule.pca_confidence, thresholds.min_pca_confidence
            ));
        }
        if below.is_empty() {
            report.push(Finding::pass(VALIDATOR, Some(number), "confidences meet thresholds"));
        } else {
            report.push(Finding::warn(VALIDATOR, Some(number), below.join("; ")));
        }
    }
    report
}
