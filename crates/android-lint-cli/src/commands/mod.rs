//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;
pub mod probe;

use anyhow::Result;
use android_lint_core::fs::normalize;
use android_lint_core::Config;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::ModuleArgs;

/// Loads the config and applies the module base path and command-line
/// overrides.
pub fn load_config(path: &Path, args: &ModuleArgs, source: &ConfigSource) -> Result<Config> {
    let mut config = source.load()?;

    let module = &mut config.module;
    module.base_dir = normalize(&path.join(&module.base_dir));
    if args.project_path.is_some() {
        module.project_path.clone_from(&args.project_path);
    }
    if !args.sources.is_empty() {
        module.sources.clone_from(&args.sources);
    }
    if !args.binaries.is_empty() {
        module.binaries.clone_from(&args.binaries);
    }
    if !args.classpath.is_empty() {
        module.classpath.clone_from(&args.classpath);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn overrides_replace_config_values() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("android-lint.toml");
        std::fs::write(
            &config_path,
            r#"
[module]
project_path = "app"
sources = ["app/src"]
"#,
        )
        .unwrap();

        let args = ModuleArgs {
            project_path: Some(PathBuf::from("HelloWorld")),
            binaries: vec![PathBuf::from("HelloWorld/bin")],
            ..ModuleArgs::default()
        };
        let config = load_config(tmp.path(), &args, &ConfigSource::Module(config_path)).unwrap();

        assert_eq!(config.module.base_dir, tmp.path());
        assert_eq!(config.module.project_path, Some(PathBuf::from("HelloWorld")));
        assert_eq!(config.module.sources, vec![PathBuf::from("app/src")]);
        assert_eq!(config.module.binaries, vec![PathBuf::from("HelloWorld/bin")]);

        let module = config.module_descriptor();
        assert_eq!(module.project_dir(), tmp.path().join("HelloWorld"));
    }

    #[test]
    fn relative_module_path_becomes_absolute() {
        let config = load_config(
            Path::new("mod"),
            &ModuleArgs::default(),
            &ConfigSource::Default,
        )
        .unwrap();

        let cwd = std::env::current_dir().unwrap();
        assert!(config.module.base_dir.is_absolute());
        assert_eq!(config.module.base_dir, cwd.join("mod"));
        assert_eq!(
            config.module_descriptor().source_dirs,
            vec![cwd.join("mod").join("src")]
        );
    }
}
