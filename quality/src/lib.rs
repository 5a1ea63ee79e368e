//! Rule quality for the rulemine workbench.
//!
//! This crate measures mined rules and validates them against sanity and
//! threshold checks, producing a report in the same pass/warn/fail shape for
//! every check.
//!
//! # Checks
//!
//! | Validator | Failure | Warning |
//! |-----------|---------|---------|
//! | `rule/syntax` | empty text, no `=>` or `→` | |
//! | `rule/metrics` | ratio outside [0, 1] or NaN | |
//! | `rule/thresholds` | | confidence below `-minc` / `-minpca` |
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use rulemine_quality::{validate_file, Thresholds};
//!
//! let report = validate_file(Path::new("rules.json"), Thresholds::default())?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod metrics;
pub mod report;
pub mod validators;

use std::path::Path;

use anyhow::{Context, Result};
use rulemine_ontology::ExtractedRule;
use tracing::debug;

pub use metrics::{measure_rule, measure_set, RuleQuality, SetQuality};
pub use report::{Finding, QualityReport, Severity};
pub use validators::thresholds::Thresholds;

/// Runs all validators over `rules` and returns the aggregated report.
///
/// Validators run in this order:
/// 1. Rule text (`rule/syntax`)
/// 2. Metric ranges (`rule/metrics`)
/// 3. Confidence thresholds (`rule/thresholds`)
#[must_use]
pub fn validate(rules: &[ExtractedRule], thresholds: Thresholds) -> QualityReport {
    let mut report = QualityReport::new();

    report.extend(validators::syntax::validate(rules));
    report.extend(validators::metrics::validate(rules));
    report.extend(validators::thresholds::validate(rules, thresholds));

    debug!(
        rules = rules.len(),
        failures = report.failure_count(),
        warnings = report.warning_count(),
        "rules validated"
    );
    report
}

/// Loads a JSON rules file and validates it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not rules JSON.
pub fn validate_file(path: &Path, thresholds: Thresholds) -> Result<QualityReport> {
    let rules = rulemine_ontology::load_rules(path)
        .with_context(|| format!("Failed to load rules from {}", path.display()))?;
    Ok(validate(&rules, thresholds))
}
