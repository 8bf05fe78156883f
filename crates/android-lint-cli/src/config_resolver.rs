//! Locating and loading `android-lint.toml`.
//!
//! An explicit `--config` path always wins, even when the file is missing,
//! in which case loading fails. Otherwise the first existing file among the
//! module's `android-lint.toml`, `.android-lint.toml` and the global
//! `config.toml` is used, and built-in defaults apply when none exists.

use anyhow::{Context, Result};
use android_lint_core::Config;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "ANDROID_LINT_SENSOR_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the module.
    Module(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults.
    Default,
}

impl ConfigSource {
    fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Module(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    pub fn load(&self) -> Result<Config> {
        tracing::debug!("Using {self}");
        match self.path() {
            Some(p) => Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display())),
            None => Ok(Config::default()),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "config {}", p.display()),
            Self::Module(p) => write!(f, "module config {}", p.display()),
            Self::Global(p) => write!(f, "global config {}", p.display()),
            Self::Default => write!(f, "default config"),
        }
    }
}

/// Finds the config file for a module.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigLocator {
    /// Module-level config file names, in lookup order.
    const MODULE_NAMES: [&'static str; 2] = ["android-lint.toml", ".android-lint.toml"];

    /// Config file name inside the global directory.
    const GLOBAL_NAME: &'static str = "config.toml";

    /// Creates a locator honoring `--config` and the global directory.
    #[must_use]
    pub fn new(explicit: Option<&Path>) -> Self {
        Self {
            explicit: explicit.map(Path::to_path_buf),
            global_dir: global_config_dir(),
        }
    }

    #[cfg(test)]
    fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Picks the config source for the module at `module_dir`.
    #[must_use]
    pub fn locate(&self, module_dir: &Path) -> ConfigSource {
        if let Some(p) = &self.explicit {
            return ConfigSource::Explicit(p.clone());
        }

        let module = Self::MODULE_NAMES
            .iter()
            .map(|name| ConfigSource::Module(module_dir.join(name)));
        let global = self
            .global_dir
            .iter()
            .map(|dir| ConfigSource::Global(dir.join(Self::GLOBAL_NAME)));

        module
            .chain(global)
            .find(|source| source.path().is_some_and(Path::is_file))
            .unwrap_or(ConfigSource::Default)
    }
}

/// `$ANDROID_LINT_SENSOR_CONFIG_DIR`, else `~/.android-lint-sensor`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".android-lint-sensor")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn locator(explicit: Option<&Path>, global: &TempDir) -> ConfigLocator {
        ConfigLocator::new(explicit).with_global_dir(Some(global.path().to_path_buf()))
    }

    #[test]
    fn explicit_path_is_used_even_if_missing() {
        let module = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(module.path().join("android-lint.toml"), "").unwrap();
        let explicit = module.path().join("typo.toml");

        let source = locator(Some(&explicit), &global).locate(module.path());
        assert_eq!(source, ConfigSource::Explicit(explicit));
        assert!(source
            .load()
            .unwrap_err()
            .to_string()
            .contains("Failed to load config"));
    }

    #[test]
    fn module_config_beats_global() {
        let module = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(module.path().join(".android-lint.toml"), "").unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        assert_eq!(
            locator(None, &global).locate(module.path()),
            ConfigSource::Module(module.path().join(".android-lint.toml"))
        );

        fs::write(module.path().join("android-lint.toml"), "").unwrap();
        assert_eq!(
            locator(None, &global).locate(module.path()),
            ConfigSource::Module(module.path().join("android-lint.toml"))
        );
    }

    #[test]
    fn global_config_is_the_fallback() {
        let module = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        assert_eq!(locator(None, &global).locate(module.path()), ConfigSource::Default);

        fs::write(
            global.path().join("config.toml"),
            "[lint]\ncommand = \"/opt/sdk/tools/lint\"\n",
        )
        .unwrap();
        let source = locator(None, &global).locate(module.path());
        assert_eq!(source, ConfigSource::Global(global.path().join("config.toml")));
        assert_eq!(source.load().unwrap().lint.command, "/opt/sdk/tools/lint");
    }

    #[test]
    fn default_source_loads_defaults() {
        let config = ConfigSource::Default.load().unwrap();
        assert_eq!(config.lint.command, "lint");
        assert!(config.rules.is_empty());
    }
}
