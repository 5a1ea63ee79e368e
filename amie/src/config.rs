//! Settings for running AMIE3.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. Command-line flags are applied on top by the
//! clients.
//!
//! ```toml
//! [amie]
//! java = "/usr/bin/java"
//! jar = "/opt/amie/amie3.5.1.jar"
//! timeout_secs = 300
//! turtle_file = "ontology.ttl"
//! strict_exit = false
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::command::Launcher;

/// File name of the AMIE3 jar looked up next to the running executable.
pub const AMIE_JAR_NAME: &str = "amie3.5.1.jar";
/// Settings file looked up in the working directory.
pub const SETTINGS_FILE_NAME: &str = "rulemine.toml";
/// Default time budget for one AMIE3 run.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Default name of the converted ontology.
pub const DEFAULT_TURTLE_FILE: &str = "ontology.ttl";

/// Overrides the jar path.
pub const ENV_JAR: &str = "RULEMINE_AMIE_JAR";
/// Overrides the Java runtime.
pub const ENV_JAVA: &str = "RULEMINE_JAVA";
/// Overrides the timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "RULEMINE_TIMEOUT_SECS";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for these settings.
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    /// The settings file parses but holds an unusable value.
    #[error("invalid settings file {}: {reason}", .path.display())]
    Invalid {
        /// Settings file path.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// An environment override has an unusable value.
    #[error("invalid value {value:?} for {var}: {reason}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Where and how AMIE3 runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmieSettings {
    /// Java runtime used for `.jar` tools.
    pub java: String,
    /// Tool artifact: an AMIE3 jar, or a native executable.
    pub jar: PathBuf,
    /// Time budget per run, in seconds.
    pub timeout_secs: u64,
    /// Working directory of the tool; the Turtle file is written here.
    pub workdir: PathBuf,
    /// File name of the converted ontology inside `workdir`.
    pub turtle_file: String,
    /// Treat a non-zero exit code as a failure.
    pub strict_exit: bool,
}

impl Default for AmieSettings {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            jar: default_jar_path(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            workdir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            turtle_file: DEFAULT_TURTLE_FILE.to_string(),
            strict_exit: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    amie: AmieSettings,
}

impl AmieSettings {
    /// Loads settings from `path`, or from `rulemine.toml` in the current
    /// directory if it exists, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an explicitly given file is missing, a
    /// file is not valid settings TOML, or an environment override is bad.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let local = Path::new(SETTINGS_FILE_NAME);
                if local.exists() {
                    Self::from_file(local)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env_with(|var| std::env::var(var).ok())?;
        Ok(settings)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`], [`ConfigError::Parse`] or
    /// [`ConfigError::Invalid`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(path = %path.display(), "settings file loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text with an `[amie]` table.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text does not describe these settings.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let file: SettingsFile = toml::from_str(text)?;
        Ok(file.amie)
    }

    /// Checks values TOML accepts but a run cannot use.
    ///
    /// # Errors
    ///
    /// Returns the reason the settings are unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        if self.turtle_file.trim().is_empty() {
            return Err("turtle_file must not be empty".to_string());
        }
        Ok(())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value (see [`ENV_JAR`], [`ENV_JAVA`], [`ENV_TIMEOUT_SECS`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if the timeout is not a positive integer.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(jar) = lookup(ENV_JAR).filter(|v| !v.trim().is_empty()) {
            self.jar = PathBuf::from(jar.trim());
        }
        if let Some(java) = lookup(ENV_JAVA).filter(|v| !v.trim().is_empty()) {
            self.java = java.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_timeout(&raw).map_err(|reason| ConfigError::Env {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    /// Time budget per run.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path the converted ontology is written to.
    #[must_use]
    pub fn turtle_path(&self) -> PathBuf {
        self.workdir.join(&self.turtle_file)
    }

    /// `java -jar <jar>` for `.jar` artifacts, the artifact itself otherwise.
    #[must_use]
    pub fn launcher(&self) -> Launcher {
        let is_jar = self
            .jar
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jar"));
        if is_jar {
            Launcher::jar(&self.java, &self.jar)
        } else {
            Launcher::binary(&self.jar)
        }
    }
}

fn parse_timeout(raw: &str) -> Result<u64, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(secs) => Ok(secs),
        Err(e) => Err(e.to_string()),
    }
}

/// `amie3.5.1.jar` next to the running executable.
fn default_jar_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(AMIE_JAR_NAME)))
        .unwrap_or_else(|| PathBuf::from(AMIE_JAR_NAME))
}
