//! Probe command implementation.

use anyhow::Result;
use android_lint_core::{evaluate, FsSourceIndex, QualityProfile, TARGET_LANGUAGE};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::ModuleArgs;

/// Runs the probe command.
pub fn run(path: &Path, module_args: &ModuleArgs, source: &ConfigSource) -> Result<()> {
    let config = super::load_config(path, module_args, source)?;
    let module = config.module_descriptor();
    let profile = QualityProfile::from_config(&config);

    let applicability = evaluate(&FsSourceIndex::new(&module), &profile, &module);

    println!(
        "{} {} source files",
        mark(applicability.has_sources),
        TARGET_LANGUAGE
    );
    println!(
        "{} active Android Lint rules",
        mark(applicability.has_active_rules)
    );
    println!(
        "{} {}",
        mark(applicability.manifest_found),
        applicability.manifest.display()
    );
    println!();

    if applicability.should_execute() {
        println!("Android Lint applies to {}", module.base_dir.display());
    } else {
        println!(
            "Android Lint does not apply to {}",
            module.base_dir.display()
        );
    }

    Ok(())
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "\x1b[32m[x]\x1b[0m"
    } else {
        "\x1b[31m[ ]\x1b[0m"
    }
}
