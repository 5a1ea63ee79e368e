//! Core workbench model types.
//!
//! These types represent what a rule-mining session works with: ontology
//! files the user loaded and the rules mined from them. Both are plain owned
//! values; the [`Registry`](crate::Registry) keeps them in insertion order.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// RDF serialization of an ontology file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    /// RDF/XML, the usual OWL file format (`.owl`, `.rdf`, `.xml`).
    RdfXml,
    /// Turtle 1.1 (`.ttl`).
    Turtle,
    /// N-Triples (`.nt`).
    NTriples,
}

impl RdfFormat {
    /// Returns the short name used on the command line and in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RdfFormat::RdfXml => "rdfxml",
            RdfFormat::Turtle => "turtle",
            RdfFormat::NTriples => "ntriples",
        }
    }

    /// Parses a short format name (`rdfxml`, `xml`, `owl`, `turtle`, `ttl`,
    /// `ntriples`, `nt`), case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rdfxml" | "rdf/xml" | "xml" | "owl" | "rdf" => Some(RdfFormat::RdfXml),
            "turtle" | "ttl" => Some(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Some(RdfFormat::NTriples),
            _ => None,
        }
    }

    /// Detects the format from the file extension.
    ///
    /// Files without a recognised extension are treated as RDF/XML, the
    /// format OWL ontologies are normally distributed in.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "ttl" => Some(RdfFormat::Turtle),
                "nt" => Some(RdfFormat::NTriples),
                "owl" | "rdf" | "xml" => Some(RdfFormat::RdfXml),
                _ => None,
            })
            .unwrap_or(RdfFormat::RdfXml)
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded ontology file.
///
/// The path is checked for existence once, when the reference is registered;
/// it is not re-validated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyReference {
    /// Path as supplied by the user.
    pub path: PathBuf,
    /// Serialization detected from the file extension.
    pub format: RdfFormat,
}

impl OntologyReference {
    /// Creates a reference, detecting the format from the extension.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = RdfFormat::from_path(&path);
        Self { path, format }
    }
}

/// A rule mined from an ontology, with its AMIE quality statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRule {
    /// Rule expression, e.g. `?a <hasChild> ?b  => ?b <hasParent> ?a`.
    pub rule: String,
    /// Ratio of head facts predicted by the rule, in [0, 1].
    pub head_coverage: f64,
    /// Standard (closed-world) confidence, in [0, 1].
    pub std_confidence: f64,
    /// Partial completeness assumption confidence, in [0, 1].
    pub pca_confidence: f64,
    /// Number of head facts the rule predicts correctly (support).
    pub positive_examples: u64,
    /// Number of atoms in the rule body.
    pub body_size: u64,
}

/// A metric of an [`ExtractedRule`] that lies outside [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricOutOfRange {
    /// Field name of the offending metric.
    pub metric: &'static str,
    /// The offending value.
    pub value: f64,
}

impl fmt::Display for MetricOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} is outside [0, 1]", self.metric, self.value)
    }
}

impl ExtractedRule {
    /// Returns the three ratio metrics with their field names.
    #[must_use]
    pub fn ratios(&self) -> [(&'static str, f64); 3] {
        [
            ("head_coverage", self.head_coverage),
            ("std_confidence", self.std_confidence),
            ("pca_confidence", self.pca_confidence),
        ]
    }

    /// Checks that every ratio metric lies in [0, 1].
    ///
    /// # Errors
    ///
    /// Returns every metric that is out of range (NaN included).
    pub fn check(&self) -> Result<(), Vec<MetricOutOfRange>> {
        let bad: Vec<MetricOutOfRange> = self
            .ratios()
            .into_iter()
            .filter(|(_, value)| !(0.0..=1.0).contains(value))
            .map(|(metric, value)| MetricOutOfRange { metric, value })
            .collect();
        if bad.is_empty() {
            Ok(())
        } else {
            Err(bad)
        }
    }
}

impl fmt::Display for ExtractedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rule: {}", self.rule)?;
        writeln!(f, "Head Coverage: {}", self.head_coverage)?;
        writeln!(f, "Std Confidence: {}", self.std_confidence)?;
        writeln!(f, "PCA Confidence: {}", self.pca_confidence)?;
        writeln!(f, "Positive Examples: {}", self.positive_examples)?;
        write!(f, "Body Size: {}", self.body_size)
    }
}
