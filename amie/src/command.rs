//! AMIE3 command-line construction.
//!
//! The argument list has a fixed shape:
//!
//! ```text
//! <runtime> [runtime args] <tool> [-const] -minc <f> -minpca <f> -nc <n> <ontology>
//! ```
//!
//! Flag order is deterministic and the ontology path is always the last
//! argument.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::params::AmieParameters;

/// How the rule-mining tool is started.
///
/// Only the spawned process is killed on timeout. A [`Launcher::Binary`] or
/// [`Launcher::Interpreted`] tool that starts processes of its own leaves
/// them running; the runner stops waiting for their output after a short
/// grace period instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// `java -jar <jar>`.
    Jar {
        /// Java runtime executable.
        java: OsString,
        /// Path to the AMIE3 jar.
        jar: PathBuf,
    },
    /// A native executable started directly.
    Binary(PathBuf),
    /// A script run through an interpreter, e.g. `sh amie.sh`.
    Interpreted {
        /// Interpreter executable.
        interpreter: OsString,
        /// Script path.
        script: PathBuf,
    },
}

impl Launcher {
    /// `java -jar <jar>`.
    #[must_use]
    pub fn jar(java: impl Into<OsString>, jar: impl Into<PathBuf>) -> Self {
        Launcher::Jar {
            java: java.into(),
            jar: jar.into(),
        }
    }

    /// A native executable.
    #[must_use]
    pub fn binary(path: impl Into<PathBuf>) -> Self {
        Launcher::Binary(path.into())
    }

    /// A script run through `interpreter`.
    #[must_use]
    pub fn interpreted(interpreter: impl Into<OsString>, script: impl Into<PathBuf>) -> Self {
        Launcher::Interpreted {
            interpreter: interpreter.into(),
            script: script.into(),
        }
    }

    /// The tool artifact that must exist before launch.
    #[must_use]
    pub fn tool(&self) -> &Path {
        match self {
            Launcher::Jar { jar, .. } => jar,
            Launcher::Binary(path) => path,
            Launcher::Interpreted { script, .. } => script,
        }
    }

    /// The executable actually spawned.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        match self {
            Launcher::Jar { java, .. } => java,
            Launcher::Binary(path) => path.as_os_str(),
            Launcher::Interpreted { interpreter, .. } => interpreter,
        }
    }

    fn leading_args(&self) -> Vec<OsString> {
        match self {
            Launcher::Jar { jar, .. } => vec!["-jar".into(), jar.clone().into_os_string()],
            Launcher::Binary(_) => Vec::new(),
            Launcher::Interpreted { script, .. } => vec![script.clone().into_os_string()],
        }
    }
}

/// A fully built tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmieCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl AmieCommand {
    /// Builds the invocation for `ontology` with `params`.
    #[must_use]
    pub fn build(launcher: &Launcher, params: &AmieParameters, ontology: &Path) -> Self {
        let mut args = launcher.leading_args();
        args.extend(params.to_args().into_iter().map(OsString::from));
        args.push(ontology.as_os_str().to_os_string());
        Self {
            program: launcher.program().to_os_string(),
            args,
        }
    }

    /// The executable to spawn.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments after the program, in order.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// A [`Command`] with `workdir` as working directory, stdin closed and
    /// both output streams piped.
    #[must_use]
    pub fn to_command(&self, workdir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl fmt::Display for AmieCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &AmieCommand) -> Vec<String> {
        cmd.args().iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn jar_command_matches_amie_layout() {
        let launcher = Launcher::jar("java", "/opt/amie/amie3.5.1.jar");
        let params = AmieParameters::new(0.1, 0.2, 8, false).unwrap();
        let cmd = AmieCommand::build(&launcher, &params, Path::new("/work/ontology.ttl"));

        assert_eq!(cmd.program(), "java");
        assert_eq!(
            args_of(&cmd),
            [
                "-jar",
                "/opt/amie/amie3.5.1.jar",
                "-minc",
                "0.1",
                "-minpca",
                "0.2",
                "-nc",
                "8",
                "/work/ontology.ttl"
            ]
        );
    }

    #[test]
    fn const_flag_follows_the_jar() {
        let launcher = Launcher::jar("java", "amie.jar");
        let params = AmieParameters::new(0.0, 0.0, 8, true).unwrap();
        let cmd = AmieCommand::build(&launcher, &params, Path::new("ontology.ttl"));
        assert_eq!(
            cmd.to_string(),
            "java -jar amie.jar -const -minc 0.0 -minpca 0.0 -nc 8 ontology.ttl"
        );
    }

    #[test]
    fn binary_runs_tool_directly() {
        let launcher = Launcher::binary("/usr/local/bin/amie");
        let cmd = AmieCommand::build(&launcher, &AmieParameters::default(), Path::new("o.ttl"));
        assert_eq!(cmd.program(), "/usr/local/bin/amie");
        assert_eq!(args_of(&cmd)[0], "-minc");
        assert_eq!(launcher.tool(), Path::new("/usr/local/bin/amie"));
    }

    #[test]
    fn interpreted_passes_script_first() {
        let launcher = Launcher::interpreted("sh", "fake-amie.sh");
        let cmd = AmieCommand::build(&launcher, &AmieParameters::default(), Path::new("o.ttl"));
        assert_eq!(cmd.program(), "sh");
        assert_eq!(args_of(&cmd)[0], "fake-amie.sh");
        assert_eq!(args_of(&cmd).last().map(String::as_str), Some("o.ttl"));
    }
}
