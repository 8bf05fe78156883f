//! The Android Lint sensor: applicability gate plus execution.

use std::path::PathBuf;

use tracing::debug;

use crate::executor::{ExecutionSummary, ExecutorError, LintExecutor};
use crate::host::{Language, ResourceResolver, RuleActivation, SourceIndex, ViolationSink};
use crate::module::ModuleDescriptor;

/// Language a module must contain to be analyzed.
pub const TARGET_LANGUAGE: Language = Language::Java;

/// Outcome of each applicability criterion for a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicability {
    /// The module has at least one source file of [`TARGET_LANGUAGE`].
    pub has_sources: bool,
    /// At least one Android Lint rule is active.
    pub has_active_rules: bool,
    /// Where the manifest was looked up.
    pub manifest: PathBuf,
    /// The manifest exists.
    pub manifest_found: bool,
}

impl Applicability {
    /// Whether all criteria hold.
    #[must_use]
    pub fn should_execute(&self) -> bool {
        self.has_sources && self.has_active_rules && self.manifest_found
    }
}

/// Evaluates every applicability criterion.
#[must_use]
pub fn evaluate(
    sources: &dyn SourceIndex,
    rules: &dyn RuleActivation,
    module: &ModuleDescriptor,
) -> Applicability {
    let manifest = module.manifest_path();
    Applicability {
        has_sources: sources.has_files(TARGET_LANGUAGE),
        has_active_rules: !rules.is_empty(),
        manifest_found: manifest.exists(),
        manifest,
    }
}

/// Whether lint should run on the module: it has Java sources, the profile
/// activates at least one Android Lint rule, and `AndroidManifest.xml`
/// exists in the project directory.
#[must_use]
pub fn should_execute(
    sources: &dyn SourceIndex,
    rules: &dyn RuleActivation,
    module: &ModuleDescriptor,
) -> bool {
    let decision = sources.has_files(TARGET_LANGUAGE)
        && !rules.is_empty()
        && module.manifest_path().exists();
    debug!(
        "Android Lint {} on {}",
        if decision { "applies" } else { "does not apply" },
        module.base_dir.display()
    );
    decision
}

/// Host-facing sensor.
pub struct Sensor {
    executor: LintExecutor,
}

impl Sensor {
    /// Creates a sensor around an executor.
    #[must_use]
    pub fn new(executor: LintExecutor) -> Self {
        Self { executor }
    }

    /// See [`should_execute`].
    #[must_use]
    pub fn should_execute_on_module(
        &self,
        sources: &dyn SourceIndex,
        rules: &dyn RuleActivation,
        module: &ModuleDescriptor,
    ) -> bool {
        should_execute(sources, rules, module)
    }

    /// Runs lint on the module.
    ///
    /// # Errors
    ///
    /// See [`LintExecutor::execute`].
    pub fn analyse(
        &self,
        module: &ModuleDescriptor,
        rules: &dyn RuleActivation,
        resources: &dyn ResourceResolver,
        sink: &mut dyn ViolationSink,
    ) -> Result<ExecutionSummary, ExecutorError> {
        self.executor.execute(module, rules, resources, sink)
    }
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AndroidLintSensor")
    }
}
