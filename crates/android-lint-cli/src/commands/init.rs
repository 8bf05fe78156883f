//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# android-lint-sensor configuration

[module]
# Module base directory (default: directory passed on the command line)
# base_dir = "."

# Path, relative to base_dir, of the directory holding AndroidManifest.xml
# project_path = "app"

sources = ["src"]
# Compiled classes; the analysis fails when these do not exist
binaries = ["bin"]
# classpath = ["libs/android-support-v4.jar"]

# Glob patterns whose issues are not reported
exclude = [
    "**/generated/**",
]

[lint]
# Android SDK lint executable
command = "lint"
# args = ["--offline"]

# Active rules: one table per lint issue id
# Each rule can be disabled and have its severity overridden

[rules.HardcodedText]
# severity = "warning"

[rules.UnusedResources]

[rules.SetJavaScriptEnabled]
severity = "error"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("android-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created android-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit android-lint.toml to describe the module and its rules");
    println!("  2. Build the module so its binary directories exist");
    println!("  3. Run: android-lint-sensor check");

    Ok(())
}
