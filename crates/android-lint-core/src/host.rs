//! Capabilities the host provides to the sensor.
//!
//! Each capability is a trait so the gate and the executor can run against
//! the filesystem-backed implementations in [`crate::fs`] or against test
//! stand-ins returning canned data.

use std::path::{Path, PathBuf};

use crate::types::{Resource, Severity, Violation};

/// Source language of files in a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Java sources (`.java`).
    Java,
    /// Kotlin sources (`.kt`).
    Kotlin,
}

impl Language {
    /// File extension of sources in this language.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
        }
    }

    /// Whether `path` is a source file of this language.
    #[must_use]
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Java => write!(f, "java"),
            Self::Kotlin => write!(f, "kotlin"),
        }
    }
}

/// Lists the source files of a module.
pub trait SourceIndex {
    /// Returns the source files written in `language`.
    fn files(&self, language: Language) -> Vec<PathBuf>;

    /// Whether the module has at least one source file in `language`.
    fn has_files(&self, language: Language) -> bool {
        !self.files(language).is_empty()
    }
}

/// A rule enabled in the current quality profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRule {
    /// Lint rule id.
    pub rule_id: String,
    /// Severity the profile assigns, overriding the lint severity.
    pub severity: Option<Severity>,
}

impl ActiveRule {
    /// Creates an active rule without severity override.
    #[must_use]
    pub fn new(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity: None,
        }
    }

    /// Sets the severity override.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}

/// The Rule Activation Set of the Android Lint repository.
///
/// Queried, never mutated, by the sensor.
pub trait RuleActivation {
    /// Returns the rule if it is present and enabled.
    fn active_rule(&self, rule_id: &str) -> Option<ActiveRule>;

    /// Number of enabled rules.
    fn active_count(&self) -> usize;

    /// Whether no rule is enabled.
    fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// Maps issue file paths to host resources.
pub trait ResourceResolver {
    /// Resolves `path`, or returns `None` when the host does not track the
    /// file (outside the module, or excluded).
    fn resolve(&self, path: &Path) -> Option<Resource>;
}

/// Receives the violations the sensor reports.
pub trait ViolationSink {
    /// Records one violation.
    fn save_violation(&mut self, violation: Violation);
}

impl ViolationSink for Vec<Violation> {
    fn save_violation(&mut self, violation: Violation) {
        self.push(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listing(Vec<PathBuf>);

    impl SourceIndex for Listing {
        fn files(&self, language: Language) -> Vec<PathBuf> {
            self.0
                .iter()
                .filter(|p| language.matches(p))
                .cloned()
                .collect()
        }
    }

    #[test]
    fn language_matches_extension() {
        assert!(Language::Java.matches(Path::new("src/MyClass.java")));
        assert!(!Language::Java.matches(Path::new("src/MyClass.kt")));
        assert!(Language::Kotlin.matches(Path::new("src/MyClass.kt")));
        assert!(!Language::Kotlin.matches(Path::new("Makefile")));
    }

    #[test]
    fn has_files_defaults_to_files() {
        let index = Listing(vec![PathBuf::from("MyClass.java")]);
        assert!(index.has_files(Language::Java));
        assert!(!index.has_files(Language::Kotlin));
    }

    #[test]
    fn vec_is_a_violation_sink() {
        let mut sink: Vec<Violation> = Vec::new();
        sink.save_violation(Violation::new(
            "UnusedIds",
            Severity::Info,
            Resource::new("Main.java", "/p/Main.java"),
            None,
            "unused",
        ));
        assert_eq!(sink.len(), 1);
    }
}
