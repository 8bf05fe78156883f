//! Module descriptor supplied by the host.

use std::path::{Path, PathBuf};

/// File name lint needs to recognise an Android project.
pub const ANDROID_MANIFEST_XML: &str = "AndroidManifest.xml";

/// Layout of one module under analysis.
///
/// Read-only to the sensor; every invocation receives a fresh descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Module base directory.
    pub base_dir: PathBuf,
    /// Configured path of the Android project relative to `base_dir`.
    pub project_path: Option<PathBuf>,
    /// Source directories.
    pub source_dirs: Vec<PathBuf>,
    /// Compiled output directories.
    pub binary_dirs: Vec<PathBuf>,
    /// Classpath entries.
    pub classpath: Vec<PathBuf>,
}

impl ModuleDescriptor {
    /// Creates a descriptor rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the configured project path.
    #[must_use]
    pub fn with_project_path(mut self, project_path: Option<PathBuf>) -> Self {
        self.project_path = project_path;
        self
    }

    /// Sets the source directories.
    #[must_use]
    pub fn with_source_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.source_dirs = dirs;
        self
    }

    /// Sets the binary directories.
    #[must_use]
    pub fn with_binary_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.binary_dirs = dirs;
        self
    }

    /// Sets the classpath entries.
    #[must_use]
    pub fn with_classpath(mut self, entries: Vec<PathBuf>) -> Self {
        self.classpath = entries;
        self
    }

    /// Directory holding the Android project: `base_dir/project_path` when a
    /// project path is configured, `base_dir` otherwise.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        match &self.project_path {
            Some(rel) => self.base_dir.join(rel),
            None => self.base_dir.clone(),
        }
    }

    /// Expected location of the Android manifest.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir().join(ANDROID_MANIFEST_XML)
    }

    /// Checks that compiled output is present.
    ///
    /// Returns `None` when at least one binary directory is configured and
    /// all of them exist.
    #[must_use]
    pub fn missing_output(&self) -> Option<MissingOutput<'_>> {
        if self.binary_dirs.is_empty() {
            return Some(MissingOutput::NoneConfigured);
        }
        self.binary_dirs
            .iter()
            .find(|dir| !dir.is_dir())
            .map(|dir| MissingOutput::Absent(dir.as_path()))
    }

    /// Classpath entries that are not already binary directories.
    #[must_use]
    pub fn libraries(&self) -> Vec<PathBuf> {
        self.classpath
            .iter()
            .filter(|entry| !self.binary_dirs.contains(entry))
            .cloned()
            .collect()
    }
}

/// Why a module's compiled output is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingOutput<'a> {
    /// No binary directory is configured.
    NoneConfigured,
    /// A configured binary directory does not exist.
    Absent(&'a Path),
}

impl std::fmt::Display for MissingOutput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoneConfigured => write!(f, "no binary directory configured"),
            Self::Absent(dir) => write!(f, "{} does not exist", dir.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_dir_without_project_path() {
        let module = ModuleDescriptor::new("/work/app");
        assert_eq!(module.project_dir(), PathBuf::from("/work/app"));
        assert_eq!(
            module.manifest_path(),
            PathBuf::from("/work/app/AndroidManifest.xml")
        );
    }

    #[test]
    fn project_dir_concatenates_project_path() {
        let module = ModuleDescriptor::new("/work")
            .with_project_path(Some(PathBuf::from("HelloWorld")));
        assert_eq!(module.project_dir(), PathBuf::from("/work/HelloWorld"));
        assert_eq!(
            module.manifest_path(),
            PathBuf::from("/work/HelloWorld/AndroidManifest.xml")
        );
    }

    #[test]
    fn missing_output_reports_first_absent_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let module = ModuleDescriptor::new(tmp.path())
            .with_binary_dirs(vec![tmp.path().to_path_buf(), PathBuf::from("/not/exist")]);
        assert_eq!(
            module.missing_output(),
            Some(MissingOutput::Absent(Path::new("/not/exist")))
        );

        let module = ModuleDescriptor::new(tmp.path()).with_binary_dirs(vec![tmp.path().into()]);
        assert_eq!(module.missing_output(), None);
    }

    #[test]
    fn missing_output_when_none_configured() {
        let module = ModuleDescriptor::new("/work");
        assert_eq!(module.missing_output(), Some(MissingOutput::NoneConfigured));
    }

    #[test]
    fn libraries_exclude_binary_dirs() {
        let module = ModuleDescriptor::new("/work")
            .with_binary_dirs(vec![PathBuf::from("/work/bin")])
            .with_classpath(vec![
                PathBuf::from("/work/bin"),
                PathBuf::from("/work/libs/support.jar"),
            ]);
        assert_eq!(
            module.libraries(),
            vec![PathBuf::from("/work/libs/support.jar")]
        );
    }
}
