//! Rule-extraction backends.
//!
//! A [`RuleBackend`] turns an ontology into rules. [`AmieBackend`] converts
//! the ontology to Turtle and runs AMIE3 on it; [`StaticBackend`] returns a
//! fixed rule list and is used by demos and tests that have no Java runtime.

use std::path::PathBuf;
use std::time::Duration;

use rulemine_ontology::convert::convert_with;
use rulemine_ontology::{ConversionError, ConversionSummary, ExtractedRule, OntologyReference};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AmieSettings;
use crate::outcome::{ProcessOutput, ProcessResult, RunError};
use crate::output::parse_rules;
use crate::params::AmieParameters;
use crate::runner::run_in;

/// Why an extraction produced no rules.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The ontology could not be converted to Turtle.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The mining tool could not be run.
    #[error(transparent)]
    Run(#[from] RunError),

    /// The mining tool exceeded its time budget.
    #[error("rule mining timed out after {}s (pid {pid}); raise the timeout or the thresholds", .elapsed.as_secs())]
    TimedOut {
        /// PID the tool ran under.
        pid: u32,
        /// Time waited before the kill.
        elapsed: Duration,
    },
}

/// Rules extracted from one ontology.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Mined rules, in the order the backend produced them.
    pub rules: Vec<ExtractedRule>,
    /// Output lines that looked like rules but could not be read.
    pub skipped: usize,
    /// Conversion step, if the backend ran one.
    pub conversion: Option<ConversionSummary>,
    /// Raw tool output, if the backend ran a tool.
    pub output: Option<ProcessOutput>,
}

/// Something that extracts rules from an ontology.
pub trait RuleBackend {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Extracts rules from `ontology`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if no rules could be produced.
    fn extract(&self, ontology: &OntologyReference) -> Result<Extraction, BackendError>;
}

/// Converts the ontology to Turtle and mines it with AMIE3.
#[derive(Debug, Clone)]
pub struct AmieBackend {
    settings: AmieSettings,
    params: AmieParameters,
}

impl AmieBackend {
    /// A backend running with `settings` and `params`.
    #[must_use]
    pub fn new(settings: AmieSettings, params: AmieParameters) -> Self {
        Self { settings, params }
    }

    /// Mining parameters.
    #[must_use]
    pub fn params(&self) -> &AmieParameters {
        &self.params
    }

    /// Where the converted ontology is written.
    #[must_use]
    pub fn turtle_path(&self) -> PathBuf {
        self.settings.turtle_path()
    }
}

impl RuleBackend for AmieBackend {
    fn name(&self) -> &str {
        "amie3"
    }

    fn extract(&self, ontology: &OntologyReference) -> Result<Extraction, BackendError> {
        let launcher = self.settings.launcher();
        // Checked here too so a missing jar does not cost a conversion.
        if !launcher.tool().exists() {
            return Err(RunError::Launch {
                program: launcher.tool().display().to_string(),
                reason: "tool artifact not found".to_string(),
            }
            .into());
        }

        let turtle = self.settings.turtle_path();
        let conversion = convert_with(&ontology.path, &turtle, ontology.format)?;
        // The tool resolves relative paths against its own working directory.
        let turtle = turtle.canonicalize().unwrap_or(turtle);

        let mut result = run_in(
            &turtle,
            &self.params,
            &launcher,
            self.settings.timeout(),
            &self.settings.workdir,
        );
        if self.settings.strict_exit {
            result = result.into_strict();
        }

        match result {
            ProcessResult::Success(output) => {
                if !output.exited_successfully() {
                    warn!(exit_code = ?output.exit_code, "AMIE exited unsuccessfully; parsing its output anyway");
                }
                let parsed = parse_rules(&output.stdout);
                info!(rules = parsed.rules.len(), skipped = parsed.skipped, "AMIE run parsed");
                Ok(Extraction {
                    rules: parsed.rules,
                    skipped: parsed.skipped,
                    conversion: Some(conversion),
                    output: Some(output),
                })
            }
            ProcessResult::Failure(err) => Err(err.into()),
            ProcessResult::TimedOut { pid, elapsed } => Err(BackendError::TimedOut { pid, elapsed }),
        }
    }
}

/// Returns a fixed list of rules without running anything.
#[derive(Debug, Clone, Default)]
pub struct StaticBackend {
    rules: Vec<ExtractedRule>,
}

impl StaticBackend {
    /// A backend that always returns `rules`.
    #[must_use]
    pub fn new(rules: Vec<ExtractedRule>) -> Self {
        Self { rules }
    }

    /// A backend returning one illustrative rule.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(vec![ExtractedRule {
            rule: "A(x) ∧ B(x,y) → C(y)".to_string(),
            head_coverage: 0.75,
            std_confidence: 0.80,
            pca_confidence: 0.78,
            positive_examples: 120,
            body_size: 2,
        }])
    }
}

impl RuleBackend for StaticBackend {
    fn name(&self) -> &str {
        "static"
    }

    fn extract(&self, _ontology: &OntologyReference) -> Result<Extraction, BackendError> {
        Ok(Extraction {
            rules: self.rules.clone(),
            ..Extraction::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_backend_returns_its_rules() {
        let backend = StaticBackend::sample();
        let extraction = backend
            .extract(&OntologyReference::new("anything.owl"))
            .unwrap();
        assert_eq!(backend.name(), "static");
        assert_eq!(extraction.rules.len(), 1);
        assert_eq!(extraction.rules[0].positive_examples, 120);
        assert!(extraction.conversion.is_none());
    }

    #[test]
    fn missing_jar_fails_before_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AmieSettings {
            jar: dir.path().join("nonexistent.jar"),
            workdir: dir.path().to_path_buf(),
            ..AmieSettings::default()
        };
        let backend = AmieBackend::new(settings, AmieParameters::default());
        let err = backend
            .extract(&OntologyReference::new(dir.path().join("sample.owl")))
            .unwrap_err();
        assert!(matches!(err, BackendError::Run(RunError::Launch { .. })));
        assert!(!backend.turtle_path().exists());
    }
}
