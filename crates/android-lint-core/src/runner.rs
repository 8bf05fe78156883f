//! Invocation of the external `lint` tool.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::LintConfig;
use crate::report::{parse_report, ReportError};
use crate::types::Issue;

/// Paths handed to one lint invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRequest {
    /// Android project directory (holds `AndroidManifest.xml`).
    pub project_dir: PathBuf,
    /// Source roots.
    pub source_dirs: Vec<PathBuf>,
    /// Compiled class directories.
    pub binary_dirs: Vec<PathBuf>,
    /// Library jars and other classpath entries.
    pub libraries: Vec<PathBuf>,
}

/// Runs Android Lint and returns the issues it emits, in emission order.
pub trait LintRunner {
    /// Invokes lint synchronously.
    ///
    /// # Errors
    ///
    /// Returns an error when lint cannot be started, fails, or produces an
    /// unreadable report.
    fn run(&self, request: &LintRequest) -> Result<Vec<Issue>, RunnerError>;
}

/// Errors invoking lint.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The executable could not be started.
    #[error("failed to start {command}: {source}")]
    Spawn {
        /// Executable that failed to start.
        command: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Lint exited unsuccessfully.
    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        /// Executable that failed.
        command: String,
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// IO error around the report file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The report could not be parsed.
    #[error("invalid lint report: {0}")]
    Report(#[from] ReportError),
}

/// Runs the `lint` command-line program and parses its XML report.
#[derive(Debug, Clone)]
pub struct CommandLintRunner {
    command: String,
    args: Vec<String>,
}

impl CommandLintRunner {
    /// Creates a runner for the given executable.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Creates a runner from the `[lint]` config section.
    #[must_use]
    pub fn from_config(config: &LintConfig) -> Self {
        Self::new(config.command.clone()).args(config.args.iter().cloned())
    }

    /// Adds extra arguments placed before the generated ones.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Builds the command line for `request`, writing the report to `xml`.
    #[must_use]
    pub fn command_line(&self, request: &LintRequest, xml: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args);
        cmd.args(["--quiet", "--fullpath"]);
        cmd.arg("--xml").arg(xml);
        for dir in &request.source_dirs {
            cmd.arg("--sources").arg(dir);
        }
        for dir in &request.binary_dirs {
            cmd.arg("--classpath").arg(dir);
        }
        for lib in &request.libraries {
            cmd.arg("--libraries").arg(lib);
        }
        cmd.arg(&request.project_dir);
        cmd
    }
}

impl LintRunner for CommandLintRunner {
    fn run(&self, request: &LintRequest) -> Result<Vec<Issue>, RunnerError> {
        let report = tempfile::Builder::new()
            .prefix("android-lint-")
            .suffix(".xml")
            .tempfile()?;

        let mut cmd = self.command_line(request, report.path());
        debug!("Running {:?}", cmd);

        let output = cmd.output().map_err(|e| RunnerError::Spawn {
            command: self.command.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(RunnerError::Failed {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let xml = std::fs::read_to_string(report.path())?;
        if xml.trim().is_empty() {
            debug!("lint wrote an empty report");
            return Ok(Vec::new());
        }
        Ok(parse_report(&xml)?)
    }
}
