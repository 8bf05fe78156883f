//! # android-lint-core
//!
//! Runs Android Lint as a sensor of a code-quality host.
//!
//! The crate holds the two pieces of logic the host relies on:
//!
//! - the applicability gate ([`should_execute`]): a module is analyzed only
//!   when it has Java sources, the quality profile activates at least one
//!   Android Lint rule, and `AndroidManifest.xml` is present
//! - the [`LintExecutor`]: checks that sources are compiled, runs lint, and
//!   turns each issue of an active rule into a [`Violation`]
//!
//! Host capabilities ([`SourceIndex`], [`RuleActivation`],
//! [`ResourceResolver`], [`ViolationSink`]) and the linter itself
//! ([`LintRunner`]) are traits.
//!
//! ## Example
//!
//! ```ignore
//! use android_lint_core::{
//!     CommandLintRunner, Config, FsResourceResolver, FsSourceIndex, LintExecutor,
//!     QualityProfile, Sensor,
//! };
//!
//! let config = Config::from_file("android-lint.toml".as_ref())?;
//! let module = config.module_descriptor();
//! let profile = QualityProfile::from_config(&config);
//! let sensor = Sensor::new(LintExecutor::new(CommandLintRunner::from_config(&config.lint)));
//!
//! if sensor.should_execute_on_module(&FsSourceIndex::new(&module), &profile, &module) {
//!     let mut violations = Vec::new();
//!     sensor.analyse(&module, &profile, &FsResourceResolver::new(&module), &mut violations)?;
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod executor;
pub mod fs;
mod host;
mod log;
mod module;
mod profile;
pub mod report;
mod runner;
mod sensor;
mod types;

/// Key of the Android Lint rule repository in the host.
pub const REPOSITORY_KEY: &str = "android-lint";

/// Host property holding the Android project path.
pub const PROJECT_PATH_PROPERTY: &str = "sonar.androidLint.projectPath";

pub use config::{Config, ConfigError, LintConfig, ModuleConfig, RuleConfig};
pub use executor::{ExecutionSummary, ExecutorError, LintExecutor, NOT_COMPILED_MESSAGE};
pub use fs::{FsResourceResolver, FsSourceIndex};
pub use host::{
    ActiveRule, Language, ResourceResolver, RuleActivation, SourceIndex, ViolationSink,
};
pub use log::{IssueLog, TracingIssueLog};
pub use module::{MissingOutput, ModuleDescriptor, ANDROID_MANIFEST_XML};
pub use profile::QualityProfile;
pub use report::{parse_report, ReportError};
pub use runner::{CommandLintRunner, LintRequest, LintRunner, RunnerError};
pub use sensor::{evaluate, should_execute, Applicability, Sensor, TARGET_LANGUAGE};
pub use types::{Issue, IssueLocation, LintResult, LintSeverity, Resource, Severity, Violation};
