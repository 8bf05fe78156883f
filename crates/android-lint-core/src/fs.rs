//! Filesystem-backed host capabilities.

use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::host::{Language, ResourceResolver, SourceIndex};
use crate::module::ModuleDescriptor;
use crate::types::Resource;

/// Lists source files by walking the module's source directories.
#[derive(Debug, Clone)]
pub struct FsSourceIndex {
    source_dirs: Vec<PathBuf>,
}

impl FsSourceIndex {
    /// Creates an index over `module`'s source directories.
    #[must_use]
    pub fn new(module: &ModuleDescriptor) -> Self {
        Self {
            source_dirs: module.source_dirs.clone(),
        }
    }
}

impl SourceIndex for FsSourceIndex {
    fn files(&self, language: Language) -> Vec<PathBuf> {
        self.source_dirs
            .iter()
            .filter(|dir| dir.is_dir())
            .flat_map(|dir| WalkDir::new(dir).follow_links(true))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && language.matches(entry.path()))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    fn has_files(&self, language: Language) -> bool {
        self.source_dirs
            .iter()
            .filter(|dir| dir.is_dir())
            .flat_map(|dir| WalkDir::new(dir).follow_links(true))
            .filter_map(Result::ok)
            .any(|entry| entry.file_type().is_file() && language.matches(entry.path()))
    }
}

/// Resolves files inside the module base directory that no exclusion
/// pattern matches.
#[derive(Debug, Clone)]
pub struct FsResourceResolver {
    base_dir: PathBuf,
    exclude_patterns: Vec<String>,
}

impl FsResourceResolver {
    /// Creates a resolver rooted at `module`'s base directory.
    #[must_use]
    pub fn new(module: &ModuleDescriptor) -> Self {
        Self {
            base_dir: normalize(&module.base_dir),
            exclude_patterns: Vec::new(),
        }
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Checks if a base-relative key matches an exclusion pattern.
    fn should_exclude(&self, key: &str) -> bool {
        self.exclude_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern).is_ok_and(|glob_pattern| glob_pattern.matches(key))
        })
    }
}

impl ResourceResolver for FsResourceResolver {
    fn resolve(&self, path: &Path) -> Option<Resource> {
        let path = normalize(&self.base_dir.join(path));
        if !path.is_file() {
            debug!("No such file: {}", path.display());
            return None;
        }

        let relative = path.strip_prefix(&self.base_dir).ok()?;
        let key = relative_key(relative);

        if self.should_exclude(&key) {
            debug!("Excluding: {}", path.display());
            return None;
        }

        Some(Resource::new(key, path))
    }
}

/// Lexically normalizes a path, making it absolute against the current
/// directory.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn relative_key(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
