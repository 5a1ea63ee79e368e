//! In-memory registry of loaded ontologies and extracted rules.
//!
//! The registry only grows during a session: ontologies and rules are
//! appended and listed back in insertion order. Consumers number rules
//! `1..=n` in that order.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::fs::write_atomic;
use crate::model::{ExtractedRule, OntologyReference};
use crate::serializer::{json, text, RulesFormat};

/// Errors raised by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The ontology file does not exist.
    #[error("ontology file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Reading or writing a rules file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The rules file is not valid rules JSON.
    #[error("invalid rules JSON in {}: {source}", .path.display())]
    Json {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Append-only store of the session's ontologies and rules.
#[derive(Debug, Default)]
pub struct Registry {
    ontologies: Vec<OntologyReference>,
    rules: Vec<ExtractedRule>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an ontology file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::FileNotFound`] if `path` does not exist; the
    /// registry is unchanged in that case.
    pub fn add_ontology(&mut self, path: impl Into<PathBuf>) -> Result<&OntologyReference, RegistryError> {
        let path = path.into();
        if !path.exists() {
            return Err(RegistryError::FileNotFound(path));
        }
        let reference = OntologyReference::new(path);
        info!(path = %reference.path.display(), format = %reference.format, "ontology loaded");
        self.ontologies.push(reference);
        let idx = self.ontologies.len() - 1;
        Ok(&self.ontologies[idx])
    }

    /// Loaded ontologies in load order.
    #[must_use]
    pub fn ontologies(&self) -> &[OntologyReference] {
        &self.ontologies
    }

    /// The most recently loaded ontology, if any.
    #[must_use]
    pub fn latest_ontology(&self) -> Option<&OntologyReference> {
        self.ontologies.last()
    }

    /// Appends an extracted rule.
    pub fn add_rule(&mut self, rule: ExtractedRule) {
        debug!(rule = %rule.rule, "rule registered");
        self.rules.push(rule);
    }

    /// Appends rules in iteration order and returns how many were added.
    pub fn extend_rules(&mut self, rules: impl IntoIterator<Item = ExtractedRule>) -> usize {
        let before = self.rules.len();
        for rule in rules {
            self.add_rule(rule);
        }
        self.rules.len() - before
    }

    /// Extracted rules in extraction order.
    #[must_use]
    pub fn rules(&self) -> &[ExtractedRule] {
        &self.rules
    }

    /// Rules paired with their 1-based display number.
    pub fn numbered_rules(&self) -> impl Iterator<Item = (usize, &ExtractedRule)> {
        self.rules.iter().enumerate().map(|(i, rule)| (i + 1, rule))
    }

    /// Returns true if neither ontologies nor rules have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ontologies.is_empty() && self.rules.is_empty()
    }

    /// Saves all rules to `path` in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be serialized or the file cannot
    /// be written. A failed save never leaves a partial file at `path`.
    pub fn save_rules(&self, path: &Path, format: RulesFormat) -> Result<(), RegistryError> {
        let body = match format {
            RulesFormat::Text => text::to_text(&self.rules),
            RulesFormat::Json => json::to_json(&self.rules).map_err(|source| RegistryError::Json {
                path: path.to_path_buf(),
                source,
            })?,
        };
        write_atomic(path, body.as_bytes()).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), rules = self.rules.len(), %format, "rules saved");
        Ok(())
    }
}

/// Reads a JSON rules file written by [`Registry::save_rules`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not rules JSON.
pub fn load_rules(path: &Path) -> Result<Vec<ExtractedRule>, RegistryError> {
    let body = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    json::from_json(&body).map_err(|source| RegistryError::Json {
        path: path.to_path_buf(),
        source,
    })
}
