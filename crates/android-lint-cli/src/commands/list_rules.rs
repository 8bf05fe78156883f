//! List rules command implementation.

use anyhow::Result;
use android_lint_core::{QualityProfile, REPOSITORY_KEY};

use crate::config_resolver::ConfigSource;

/// Runs the list-rules command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = source.load()?;
    let profile = QualityProfile::from_config(&config);
    let rules = profile.active_rules();

    println!("Active rules in repository {REPOSITORY_KEY}:\n");
    println!("{:<35} Severity", "Rule");
    println!("{}", "-".repeat(60));

    for rule in &rules {
        let severity = rule
            .severity
            .map_or_else(|| "(from lint)".to_string(), |s| s.to_string());
        println!("{:<35} {}", rule.rule_id, severity);
    }

    if rules.is_empty() {
        println!("(none: add [rules.<LintId>] tables to android-lint.toml)");
    }

    Ok(())
}
