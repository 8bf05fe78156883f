//! Configuration types for android-lint-sensor.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::module::ModuleDescriptor;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Module layout.
    #[serde(default)]
    pub module: ModuleConfig,

    /// How to invoke the `lint` executable.
    #[serde(default)]
    pub lint: LintConfig,

    /// Quality profile: lint rule id to activation.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds the module descriptor, resolving relative paths against
    /// `base_dir`.
    #[must_use]
    pub fn module_descriptor(&self) -> ModuleDescriptor {
        let base = &self.module.base_dir;
        ModuleDescriptor::new(base.clone())
            .with_project_path(self.module.project_path.clone())
            .with_source_dirs(resolve_all(base, &self.module.sources))
            .with_binary_dirs(resolve_all(base, &self.module.binaries))
            .with_classpath(resolve_all(base, &self.module.classpath))
    }
}

fn resolve_all(base: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| if p.is_absolute() { p.clone() } else { base.join(p) })
        .collect()
}

/// Module layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Module base directory (default: current directory).
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Path, relative to `base_dir`, where the Android project resides
    /// (the directory holding `AndroidManifest.xml`).
    #[serde(default, alias = "sonar.androidLint.projectPath")]
    pub project_path: Option<PathBuf>,

    /// Source directories.
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,

    /// Compiled output directories.
    #[serde(default = "default_binaries")]
    pub binaries: Vec<PathBuf>,

    /// Additional classpath entries (jars, class directories).
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Glob patterns for files whose issues are not reported.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            project_path: None,
            sources: default_sources(),
            binaries: default_binaries(),
            classpath: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_sources() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}

fn default_binaries() -> Vec<PathBuf> {
    vec![PathBuf::from("bin")]
}

/// Invocation settings for the `lint` executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Executable name or path.
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra arguments placed before the generated ones.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
        }
    }
}

fn default_command() -> String {
    "lint".to_string()
}

/// Per-rule activation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled (default: true).
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Host severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

impl RuleConfig {
    /// Whether the rule is active. A listed rule is active unless it sets
    /// `enabled = false`; unlisted rules are never active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
