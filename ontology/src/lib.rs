//! Ontology layer of the rulemine workbench.
//!
//! The `rulemine-ontology` crate holds the session data a rule-mining run
//! works on (loaded ontology files and extracted rules), the converter that
//! turns an OWL ontology in RDF/XML into the Turtle file AMIE3 consumes, and
//! the serializers rules are saved with.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use rulemine_ontology::{convert, Registry};
//!
//! let mut registry = Registry::new();
//! let ontology = registry.add_ontology("family.owl")?.path.clone();
//! let summary = convert::convert(&ontology, Path::new("ontology.ttl"))?;
//! println!("{} triples", summary.triples);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Saving rules
//!
//! ```no_run
//! use std::path::Path;
//! use rulemine_ontology::{Registry, RulesFormat};
//!
//! let registry = Registry::new();
//! registry.save_rules(Path::new("rules.txt"), RulesFormat::Text)?;
//! # Ok::<(), rulemine_ontology::RegistryError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod convert;
pub mod fs;
pub mod model;
pub mod registry;
pub mod serializer;

pub use convert::{ConversionError, ConversionSummary};
pub use model::{ExtractedRule, MetricOutOfRange, OntologyReference, RdfFormat};
pub use registry::{load_rules, Registry, RegistryError};
pub use serializer::RulesFormat;
