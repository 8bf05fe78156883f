//! Core types for lint issues, host violations, and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity of a violation as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Severity as emitted by Android Lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Fatal: blocks release builds.
    Fatal,
    /// Error.
    Error,
    /// Warning.
    Warning,
    /// Informational only.
    Informational,
    /// Check disabled for this location.
    Ignore,
}

impl LintSeverity {
    /// Parses a severity name as written in lint XML reports.
    ///
    /// Matching is case-insensitive. Both `Information` (lint's own
    /// spelling) and `Informational` are accepted.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "fatal" => Some(Self::Fatal),
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "information" | "informational" => Some(Self::Informational),
            "ignore" => Some(Self::Ignore),
            _ => None,
        }
    }

    /// Host log level for issues of this severity.
    #[must_use]
    pub const fn log_level(self) -> tracing::Level {
        match self {
            Self::Fatal | Self::Error => tracing::Level::ERROR,
            Self::Warning => tracing::Level::WARN,
            Self::Informational => tracing::Level::INFO,
            Self::Ignore => tracing::Level::DEBUG,
        }
    }

    /// Host severity a violation takes when the profile sets no override.
    #[must_use]
    pub const fn host_severity(self) -> Severity {
        match self {
            Self::Fatal | Self::Error => Severity::Error,
            Self::Warning => Severity::Warning,
            Self::Informational | Self::Ignore => Severity::Info,
        }
    }

    /// Whether a self-reported lint failure at this severity aborts the run.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Fatal | Self::Error)
    }
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fatal => write!(f, "Fatal"),
            Self::Error => write!(f, "Error"),
            Self::Warning => write!(f, "Warning"),
            Self::Informational => write!(f, "Information"),
            Self::Ignore => write!(f, "Ignore"),
        }
    }
}

/// Location of an issue as reported by the linter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueLocation {
    /// File path, absolute or relative to the linted project directory.
    pub file: PathBuf,
    /// Line number (1-indexed), when the issue points into the file.
    pub line: Option<usize>,
    /// Column number (1-indexed).
    pub column: Option<usize>,
}

impl IssueLocation {
    /// Creates a location pointing at a line of a file.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
            column: None,
        }
    }

    /// Creates a location for a whole file.
    #[must_use]
    pub fn file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            line: None,
            column: None,
        }
    }

    /// Sets the column.
    #[must_use]
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

/// One problem reported by Android Lint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Lint check identifier (e.g., `HardcodedText`).
    pub rule_id: String,
    /// Severity assigned by lint.
    pub severity: LintSeverity,
    /// Human-readable message.
    pub message: String,
    /// Primary location, if lint attached one.
    pub location: Option<IssueLocation>,
    /// Lint category (e.g., `Correctness`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Lint priority, 1 (lowest) to 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// One-line summary of the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Issue {
    /// Rule id lint uses when reporting problems with its own execution.
    pub const INTERNAL_ERROR_ID: &'static str = "LintError";

    /// Creates a new issue without location.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        severity: LintSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            location: None,
            category: None,
            priority: None,
            summary: None,
        }
    }

    /// Attaches a location.
    #[must_use]
    pub fn at(mut self, location: IssueLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Whether lint reported this issue about its own execution.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.rule_id == Self::INTERNAL_ERROR_ID
    }

    /// Whether this issue signals a lint failure that must abort the run.
    #[must_use]
    pub fn is_internal_failure(&self) -> bool {
        self.is_internal() && self.severity.is_blocking()
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rule_id, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({}", location.file.display())?;
            if let Some(line) = location.line {
                write!(f, ":{line}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A host-addressable resource an issue location resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Resource key, relative to the module base dir with `/` separators.
    pub key: String,
    /// Absolute path of the file on disk.
    pub path: PathBuf,
}

impl Resource {
    /// Creates a resource handle.
    #[must_use]
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// A violation reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule repository key (always [`crate::REPOSITORY_KEY`]).
    pub repository: String,
    /// Lint rule id.
    pub rule: String,
    /// Host severity.
    pub severity: Severity,
    /// Resource the violation is attached to.
    pub resource: Resource,
    /// Line number (1-indexed), absent for file-level violations.
    pub line: Option<usize>,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation in the Android Lint repository.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        resource: Resource,
        line: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            repository: crate::REPOSITORY_KEY.to_string(),
            rule: rule.into(),
            severity,
            resource,
            line,
            message: message.into(),
        }
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{}:{} at {}", self.repository, self.rule, self.resource.key);
        if let Some(line) = self.line {
            let _ = write!(output, ":{line}");
        }
        output.push('\n');
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.resource.key)?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        write!(f, ": {} [{}] {}", self.severity, self.rule, self.message)
    }
}

/// Result of running the sensor on one module.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations reported, in lint emission order.
    pub violations: Vec<Violation>,
    /// Number of issues lint emitted.
    pub issues_found: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }
}
