//! One workbench session: loaded ontologies, mined rules and the settings
//! AMIE3 runs with.

use std::path::{Path, PathBuf};

use rulemine_ontology::{ConversionSummary, OntologyReference, Registry, RegistryError, RulesFormat};
use thiserror::Error;
use tracing::info;

use crate::backend::{AmieBackend, BackendError, RuleBackend};
use crate::config::AmieSettings;
use crate::outcome::ProcessOutput;
use crate::params::AmieParameters;

/// Errors raised by [`Session`] runs.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No ontology has been loaded yet.
    #[error("no ontology loaded; load one before running AMIE")]
    NoOntology,

    /// The backend failed; the registry is unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// What one extraction did.
#[derive(Debug, Clone)]
pub struct SessionRun {
    /// Ontology the rules were mined from.
    pub ontology: PathBuf,
    /// Conversion step, if the backend ran one.
    pub conversion: Option<ConversionSummary>,
    /// Raw tool output, if the backend ran a tool.
    pub output: Option<ProcessOutput>,
    /// Rules appended to the registry.
    pub rules_added: usize,
    /// Tool output lines that could not be read as rules.
    pub skipped: usize,
}

/// Registry plus AMIE settings.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    settings: AmieSettings,
}

impl Session {
    /// An empty session.
    #[must_use]
    pub fn new(settings: AmieSettings) -> Self {
        Self {
            registry: Registry::new(),
            settings,
        }
    }

    /// Loaded ontologies and mined rules.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Settings used by [`Session::run_amie`].
    #[must_use]
    pub fn settings(&self) -> &AmieSettings {
        &self.settings
    }

    /// Registers an ontology file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::FileNotFound`] if `path` does not exist.
    pub fn load_ontology(&mut self, path: impl Into<PathBuf>) -> Result<&OntologyReference, RegistryError> {
        self.registry.add_ontology(path)
    }

    /// Mines the most recently loaded ontology with AMIE3 and appends the
    /// rules it prints.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoOntology`] if nothing is loaded, or
    /// [`SessionError::Backend`] if conversion or the run fails.
    pub fn run_amie(&mut self, params: AmieParameters) -> Result<SessionRun, SessionError> {
        let backend = AmieBackend::new(self.settings.clone(), params);
        self.extract_with(&backend)
    }

    /// Mines the most recently loaded ontology with `backend`.
    ///
    /// # Errors
    ///
    /// See [`Session::run_amie`].
    pub fn extract_with(&mut self, backend: &dyn RuleBackend) -> Result<SessionRun, SessionError> {
        let ontology = self
            .registry
            .latest_ontology()
            .cloned()
            .ok_or(SessionError::NoOntology)?;
        info!(backend = backend.name(), ontology = %ontology.path.display(), "extracting rules");

        let extraction = backend.extract(&ontology)?;
        let rules_added = self.registry.extend_rules(extraction.rules);
        Ok(SessionRun {
            ontology: ontology.path,
            conversion: extraction.conversion,
            output: extraction.output,
            rules_added,
            skipped: extraction.skipped,
        })
    }

    /// Saves every mined rule to `path`.
    ///
    /// # Errors
    ///
    /// See [`Registry::save_rules`].
    pub fn save_rules(&self, path: &Path, format: RulesFormat) -> Result<(), RegistryError> {
        self.registry.save_rules(path, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StaticBackend;

    #[test]
    fn run_without_ontology_is_rejected() {
        let mut session = Session::new(AmieSettings::default());
        let err = session.extract_with(&StaticBackend::sample()).unwrap_err();
        assert!(matches!(err, SessionError::NoOntology));
        assert!(session.registry().is_empty());
    }

    #[test]
    fn extraction_appends_to_the_registry() {
        let dir = tempfile::tempdir().unwrap();
        let owl = dir.path().join("sample.owl");
        std::fs::write(&owl, "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"/>").unwrap();

        let mut session = Session::new(AmieSettings::default());
        session.load_ontology(&owl).unwrap();
        let backend = StaticBackend::sample();
        let first = session.extract_with(&backend).unwrap();
        let second = session.extract_with(&backend).unwrap();

        assert_eq!(first.rules_added, 1);
        assert_eq!(second.rules_added, 1);
        assert_eq!(first.ontology, owl);
        assert_eq!(session.registry().rules().len(), 2);
    }
}
