//! Quality report types: per-rule findings, severity levels, and report aggregation.

use std::fmt;

/// Severity level of a quality check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The rule is usable but below expectations.
    Warning,
    /// The rule is unusable.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        })
    }
}

/// A single quality check result.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// Short identifier of the validator that produced this result.
    pub validator: &'static str,
    /// 1-based number of the rule checked, `None` for set-level checks.
    pub rule: Option<usize>,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl Finding {
    fn new(validator: &'static str, rule: Option<usize>, message: String, severity: Severity) -> Self {
        Self {
            validator,
            rule,
            message,
            severity,
            details: Vec::new(),
        }
    }

    /// Creates a passing result.
    pub fn pass(validator: &'static str, rule: Option<usize>, message: impl Into<String>) -> Self {
        Self::new(validator, rule, message.into(), Severity::Pass)
    }

    /// Creates a warning result.
    pub fn warn(validator: &'static str, rule: Option<usize>, message: impl Into<String>) -> Self {
        Self::new(validator, rule, message.into(), Severity::Warning)
    }

    /// Creates a failure result.
    pub fn fail(validator: &'static str, rule: Option<usize>, message: impl Into<String>) -> Self {
        Self::new(validator, rule, message.into(), Severity::Failure)
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        validator: &'static str,
        rule: Option<usize>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            details,
            ..Self::fail(validator, rule, message)
        }
    }

    /// Returns true if this result represents a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }

    /// Returns true if this result represents a warning.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.validator)?;
        if let Some(rule) = self.rule {
            write!(f, " rule #{rule}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Aggregated quality report from all validators.
#[derive(Debug, Default)]
pub struct QualityReport {
    /// All individual results across all validators.
    pub results: Vec<Finding>,
}

impl QualityReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: Finding) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: QualityReport) {
        self.results.extend(other.results);
    }

    /// Returns the count of failed checks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Returns the count of warnings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_warning()).count()
    }

    /// Returns true if all checks passed (no failures).
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// Results concerning rule number `rule`.
    pub fn for_rule(&self, rule: usize) -> impl Iterator<Item = &Finding> {
        self.results.iter().filter(move |r| r.rule == Some(rule))
    }
}
