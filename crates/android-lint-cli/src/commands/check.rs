//! Check command implementation.

use anyhow::{Context, Result};
use android_lint_core::{
    CommandLintRunner, FsResourceResolver, FsSourceIndex, LintExecutor, LintResult,
    QualityProfile, Sensor,
};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::{ModuleArgs, OutputFormat};

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    module_args: &ModuleArgs,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = super::load_config(path, module_args, source)?;
    let module = config.module_descriptor();
    let profile = QualityProfile::from_config(&config);

    let sensor = Sensor::new(LintExecutor::new(CommandLintRunner::from_config(
        &config.lint,
    )));

    if !sensor.should_execute_on_module(&FsSourceIndex::new(&module), &profile, &module) {
        tracing::info!(
            "{} skipped: {} is not an Android module with active rules (see `probe`)",
            sensor,
            module.base_dir.display()
        );
        return Ok(());
    }

    let resolver = FsResourceResolver::new(&module)
        .excludes(config.module.exclude.iter().cloned())
        .excludes(exclude);

    tracing::info!(
        "Analyzing {} with {} active rule(s)",
        module.project_dir().display(),
        profile.active_rules().len()
    );

    let mut result = LintResult::new();
    let summary = sensor
        .analyse(&module, &profile, &resolver, &mut result.violations)
        .context("Android Lint analysis failed")?;
    result.issues_found = summary.issues;

    super::output::print(&result, format)?;

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
