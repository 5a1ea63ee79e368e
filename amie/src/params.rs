//! AMIE3 mining parameters.
//!
//! Parameters are built per run from what the user typed; they are never
//! persisted. Each raw field is trimmed and parsed to its semantic type.

use thiserror::Error;

/// Command-line flag for the minimum standard confidence.
pub const FLAG_MIN_STD_CONFIDENCE: &str = "-minc";
/// Command-line flag for the minimum PCA confidence.
pub const FLAG_MIN_PCA_CONFIDENCE: &str = "-minpca";
/// Command-line flag for the number of mining threads.
pub const FLAG_THREAD_COUNT: &str = "-nc";
/// Command-line flag enabling constants in rule atoms.
pub const FLAG_CONSTANTS: &str = "-const";

/// A parameter value that could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for {flag}: {reason}")]
pub struct ParameterError {
    /// The AMIE flag the value belongs to.
    pub flag: &'static str,
    /// The raw value as supplied.
    pub value: String,
    /// Why it was rejected.
    pub reason: String,
}

impl ParameterError {
    fn new(flag: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            flag,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Thresholds and switches passed to one AMIE3 invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmieParameters {
    /// `-minc`: minimum standard confidence, ≥ 0.
    pub min_std_confidence: f64,
    /// `-minpca`: minimum PCA confidence, ≥ 0.
    pub min_pca_confidence: f64,
    /// `-nc`: number of mining threads, > 0.
    pub thread_count: u32,
    /// `-const`: allow constants in rule atoms.
    pub constants_enabled: bool,
}

impl Default for AmieParameters {
    fn default() -> Self {
        Self {
            min_std_confidence: 0.0,
            min_pca_confidence: 0.0,
            thread_count: 8,
            constants_enabled: false,
        }
    }
}

impl AmieParameters {
    /// Builds validated parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] if a confidence is negative or not finite,
    /// or if `thread_count` is zero.
    pub fn new(
        min_std_confidence: f64,
        min_pca_confidence: f64,
        thread_count: u32,
        constants_enabled: bool,
    ) -> Result<Self, ParameterError> {
        check_confidence(FLAG_MIN_STD_CONFIDENCE, min_std_confidence)?;
        check_confidence(FLAG_MIN_PCA_CONFIDENCE, min_pca_confidence)?;
        if thread_count == 0 {
            return Err(ParameterError::new(FLAG_THREAD_COUNT, "0", "must be a positive integer"));
        }
        Ok(Self {
            min_std_confidence,
            min_pca_confidence,
            thread_count,
            constants_enabled,
        })
    }

    /// Parses parameters from raw text fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] naming the first field that does not parse
    /// or is out of range.
    pub fn from_text(
        min_std_confidence: &str,
        min_pca_confidence: &str,
        thread_count: &str,
        constants_enabled: bool,
    ) -> Result<Self, ParameterError> {
        let minc = parse_float(FLAG_MIN_STD_CONFIDENCE, min_std_confidence)?;
        let minpca = parse_float(FLAG_MIN_PCA_CONFIDENCE, min_pca_confidence)?;
        let raw_nc = thread_count.trim();
        let nc = raw_nc
            .parse::<u32>()
            .map_err(|e| ParameterError::new(FLAG_THREAD_COUNT, raw_nc, e.to_string()))?;
        Self::new(minc, minpca, nc, constants_enabled)
    }

    /// Renders the flag/value pairs in command-line order.
    ///
    /// `-const` comes first when enabled, then `-minc`, `-minpca`, `-nc`.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(7);
        if self.constants_enabled {
            args.push(FLAG_CONSTANTS.to_string());
        }
        args.push(FLAG_MIN_STD_CONFIDENCE.to_string());
        args.push(format_float(self.min_std_confidence));
        args.push(FLAG_MIN_PCA_CONFIDENCE.to_string());
        args.push(format_float(self.min_pca_confidence));
        args.push(FLAG_THREAD_COUNT.to_string());
        args.push(self.thread_count.to_string());
        args
    }
}

fn parse_float(flag: &'static str, raw: &str) -> Result<f64, ParameterError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|e| ParameterError::new(flag, trimmed, e.to_string()))?;
    check_confidence(flag, value)?;
    Ok(value)
}

fn check_confidence(flag: &'static str, value: f64) -> Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::new(flag, value.to_string(), "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ParameterError::new(flag, value.to_string(), "must not be negative"));
    }
    Ok(())
}

/// `0.0` rather than `0`, so the value reads as a float on the command line.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
