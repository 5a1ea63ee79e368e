//! Quality figures computed from AMIE statistics.

use std::fmt;

use rulemine_ontology::ExtractedRule;

/// Quality figures of one rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleQuality {
    /// Number of head facts the rule predicts correctly.
    pub support: u64,
    /// Head coverage.
    pub head_coverage: f64,
    /// Standard confidence.
    pub std_confidence: f64,
    /// PCA confidence.
    pub pca_confidence: f64,
}

impl fmt::Display for RuleQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Support: {}, Head coverage: {:.2}, Confidence: {:.2}, PCA confidence: {:.2}",
            self.support, self.head_coverage, self.std_confidence, self.pca_confidence
        )
    }
}

/// Aggregate quality of a rule set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetQuality {
    /// Number of rules.
    pub count: usize,
    /// Mean head coverage.
    pub mean_head_coverage: f64,
    /// Mean standard confidence.
    pub mean_std_confidence: f64,
    /// Mean PCA confidence.
    pub mean_pca_confidence: f64,
    /// Sum of all supports.
    pub total_support: u64,
}

impl fmt::Display for SetQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rules, total support {}, mean head coverage {:.2}, mean confidence {:.2}, mean PCA confidence {:.2}",
            self.count,
            self.total_support,
            self.mean_head_coverage,
            self.mean_std_confidence,
            self.mean_pca_confidence
        )
    }
}

/// Quality figures of `rule`.
#[must_use]
pub fn measure_rule(rule: &ExtractedRule) -> RuleQuality {
    RuleQuality {
        support: rule.positive_examples,
        head_coverage: rule.head_coverage,
        std_confidence: rule.std_confidence,
        pca_confidence: rule.pca_confidence,
    }
}

/// Aggregate quality of `rules`; `None` for an empty set.
#[must_use]
pub fn measure_set(rules: &[ExtractedRule]) -> Option<SetQuality> {
    if rules.is_empty() {
        return None;
    }
    let n = rules.len() as f64;
    let mean = |metric: fn(&ExtractedRule) -> f64| rules.iter().map(metric).sum::<f64>() / n;
    Some(SetQuality {
        count: rules.len(),
        mean_head_coverage: mean(|r| r.head_coverage),
        mean_std_confidence: mean(|r| r.std_confidence),
        mean_pca_confidence: mean(|r| r.pca_confidence),
        total_support: rules
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.positive_examples)),
    })
}
