//! AMIE3 orchestration for the rulemine workbench.
//!
//! The `rulemine-amie` crate builds AMIE3 invocations from validated
//! parameters, runs them as bounded child processes, parses the rules they
//! print and feeds them into a [`Session`].
//!
//! # Entry Point
//!
//! ```no_run
//! use rulemine_amie::{AmieParameters, AmieSettings, Session};
//!
//! let mut session = Session::new(AmieSettings::load(None)?);
//! session.load_ontology("family.owl")?;
//! let run = session.run_amie(AmieParameters::new(0.1, 0.1, 4, false)?)?;
//! println!("{} rules mined", run.rules_added);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Running the tool directly
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//! use rulemine_amie::{run, AmieParameters, Launcher, ProcessResult};
//!
//! let launcher = Launcher::jar("java", "amie3.5.1.jar");
//! match run(Path::new("ontology.ttl"), &AmieParameters::default(), &launcher, Duration::from_secs(120)) {
//!     ProcessResult::Success(output) => print!("{}", output.stdout),
//!     ProcessResult::Failure(err) => eprintln!("{err}"),
//!     ProcessResult::TimedOut { elapsed, .. } => eprintln!("timed out after {elapsed:?}"),
//! }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod backend;
pub mod command;
pub mod config;
pub mod outcome;
pub mod output;
pub mod params;
pub mod runner;
pub mod session;

pub use backend::{AmieBackend, BackendError, Extraction, RuleBackend, StaticBackend};
pub use command::{AmieCommand, Launcher};
pub use config::{AmieSettings, ConfigError};
pub use outcome::{ProcessOutput, ProcessResult, RunError};
pub use output::{parse_rules, ParsedOutput};
pub use params::{AmieParameters, ParameterError};
pub use runner::{run, run_in};
pub use session::{Session, SessionError, SessionRun};
