//! Lint execution: path resolution, lint invocation, issue translation.

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};

use crate::fs::normalize;
use crate::host::{ResourceResolver, RuleActivation, ViolationSink};
use crate::log::{IssueLog, TracingIssueLog};
use crate::module::ModuleDescriptor;
use crate::runner::{LintRequest, LintRunner, RunnerError};
use crate::types::{Issue, LintSeverity, Violation};

/// Message of the configuration error raised when compiled output is missing.
pub const NOT_COMPILED_MESSAGE: &str = "Android Lint needs sources to be compiled.";

/// Errors that abort the analysis of a module.
#[derive(Debug, Error, Diagnostic)]
pub enum ExecutorError {
    /// The module's binary directories are missing.
    #[error("Android Lint needs sources to be compiled.")]
    #[diagnostic(
        code(android_lint::not_compiled),
        help("build the module so its binary directories exist, then run the analysis again")
    )]
    NotCompiled {
        /// Which binary directory is missing.
        reason: String,
    },

    /// Lint could not be run.
    #[error("Android Lint failed: {0}")]
    #[diagnostic(code(android_lint::lint_failed))]
    Lint(#[from] RunnerError),

    /// Lint reported a blocking problem with its own execution.
    #[error("Android Lint reported an internal error: {message}")]
    #[diagnostic(code(android_lint::internal_error))]
    Internal {
        /// Message lint attached to its `LintError` issue.
        message: String,
    },
}

/// Counters for one execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Issues lint emitted.
    pub issues: usize,
    /// Violations reported to the host.
    pub reported: usize,
    /// Issues skipped because their rule is not active.
    pub inactive: usize,
    /// Issues skipped because their location did not resolve.
    pub unresolved: usize,
}

/// Runs lint on a module and reports violations for active rules.
///
/// Executions are independent: the executor keeps no state between calls.
pub struct LintExecutor {
    runner: Box<dyn LintRunner>,
    log: Box<dyn IssueLog>,
}

impl LintExecutor {
    /// Creates an executor logging issues through `tracing`.
    #[must_use]
    pub fn new<R: LintRunner + 'static>(runner: R) -> Self {
        Self {
            runner: Box::new(runner),
            log: Box::new(TracingIssueLog),
        }
    }

    /// Replaces the issue log.
    #[must_use]
    pub fn with_log<L: IssueLog + 'static>(mut self, log: L) -> Self {
        self.log = Box::new(log);
        self
    }

    /// Builds the lint request for a module.
    #[must_use]
    pub fn request_for(module: &ModuleDescriptor) -> LintRequest {
        LintRequest {
            project_dir: module.project_dir(),
            source_dirs: module.source_dirs.clone(),
            binary_dirs: module.binary_dirs.clone(),
            libraries: module.libraries(),
        }
    }

    /// Analyzes one module.
    ///
    /// Violations reach `sink` in the order lint emitted the issues.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::NotCompiled`] before lint runs when binary
    /// directories are missing, and fails without reporting anything when
    /// lint cannot run or reports a blocking internal error.
    pub fn execute(
        &self,
        module: &ModuleDescriptor,
        rules: &dyn RuleActivation,
        resources: &dyn ResourceResolver,
        sink: &mut dyn ViolationSink,
    ) -> Result<ExecutionSummary, ExecutorError> {
        if let Some(missing) = module.missing_output() {
            return Err(ExecutorError::NotCompiled {
                reason: missing.to_string(),
            });
        }

        let request = Self::request_for(module);
        info!("Running Android Lint on {}", request.project_dir.display());

        let issues = match self.runner.run(&request) {
            Ok(issues) => issues,
            Err(err) => {
                self.log.log(LintSeverity::Error, Some(&err), "Android Lint failed");
                return Err(err.into());
            }
        };
        info!("Android Lint emitted {} issue(s)", issues.len());

        for issue in &issues {
            self.log.log(issue.severity, None, &issue.to_string());
        }

        if let Some(failure) = issues.iter().find(|i| i.is_internal_failure()) {
            return Err(ExecutorError::Internal {
                message: failure.message.clone(),
            });
        }

        let mut summary = ExecutionSummary {
            issues: issues.len(),
            ..ExecutionSummary::default()
        };

        for issue in issues {
            match Self::translate(module, rules, resources, issue) {
                Translation::Violation(violation) => {
                    sink.save_violation(violation);
                    summary.reported += 1;
                }
                Translation::Inactive => summary.inactive += 1,
                Translation::Unresolved => summary.unresolved += 1,
            }
        }

        info!(
            "Reported {} violation(s) ({} inactive, {} unresolved)",
            summary.reported, summary.inactive, summary.unresolved
        );

        Ok(summary)
    }

    fn translate(
        module: &ModuleDescriptor,
        rules: &dyn RuleActivation,
        resources: &dyn ResourceResolver,
        issue: Issue,
    ) -> Translation {
        let Some(active) = rules.active_rule(&issue.rule_id) else {
            debug!("Skipping issue of inactive rule {}", issue.rule_id);
            return Translation::Inactive;
        };

        let Some(location) = issue.location else {
            debug!("Skipping {} issue without location", issue.rule_id);
            return Translation::Unresolved;
        };

        // Relative lint paths are relative to the project directory.
        let path = if location.file.is_absolute() {
            location.file
        } else {
            normalize(&module.project_dir().join(location.file))
        };

        let Some(resource) = resources.resolve(&path) else {
            debug!("Skipping {} issue on untracked {}", issue.rule_id, path.display());
            return Translation::Unresolved;
        };

        let severity = active
            .severity
            .unwrap_or_else(|| issue.severity.host_severity());

        Translation::Violation(Violation::new(
            issue.rule_id,
            severity,
            resource,
            location.line,
            issue.message,
        ))
    }
}

enum Translation {
    Violation(Violation),
    Inactive,
    Unresolved,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::QualityProfile;
    use crate::types::{IssueLocation, Resource, Severity};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    struct Canned(Vec<Issue>);

    impl LintRunner for Canned {
        fn run(&self, _request: &LintRequest) -> Result<Vec<Issue>, RunnerError> {
            Ok(self.0.clone())
        }
    }

    struct AnyFile;

    impl ResourceResolver for AnyFile {
        fn resolve(&self, path: &Path) -> Option<Resource> {
            Some(Resource::new(path.display().to_string(), path))
        }
    }

    struct Broken;

    impl LintRunner for Broken {
        fn run(&self, _request: &LintRequest) -> Result<Vec<Issue>, RunnerError> {
            Err(RunnerError::Failed {
                command: "lint".to_string(),
                status: "exit status: 2".to_string(),
                stderr: "No such project".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct SeenPaths(RefCell<Vec<PathBuf>>);

    impl ResourceResolver for SeenPaths {
        fn resolve(&self, path: &Path) -> Option<Resource> {
            self.0.borrow_mut().push(path.to_path_buf());
            Some(Resource::new(path.display().to_string(), path))
        }
    }

    type LogEntries = Rc<RefCell<Vec<(LintSeverity, Option<String>, String)>>>;

    struct SharedLog(LogEntries);

    impl IssueLog for SharedLog {
        fn log(
            &self,
            severity: LintSeverity,
            error: Option<&(dyn std::error::Error + 'static)>,
            message: &str,
        ) {
            self.0.borrow_mut().push((
                severity,
                error.map(ToString::to_string),
                message.to_string(),
            ));
        }
    }

    fn compiled_module(dir: &Path) -> ModuleDescriptor {
        ModuleDescriptor::new(dir).with_binary_dirs(vec![dir.to_path_buf()])
    }

    #[test]
    fn not_compiled_message_is_fixed() {
        let err = ExecutorError::NotCompiled {
            reason: "bin does not exist".to_string(),
        };
        assert_eq!(err.to_string(), NOT_COMPILED_MESSAGE);
    }

    #[test]
    fn request_splits_binaries_and_libraries() {
        let module = ModuleDescriptor::new("/work")
            .with_project_path(Some(PathBuf::from("HelloWorld")))
            .with_source_dirs(vec![PathBuf::from("/work/HelloWorld/src")])
            .with_binary_dirs(vec![PathBuf::from("/work/HelloWorld/bin")])
            .with_classpath(vec![
                PathBuf::from("/work/HelloWorld/bin"),
                PathBuf::from("/work/libs/a.jar"),
            ]);

        let request = LintExecutor::request_for(&module);
        assert_eq!(request.project_dir, PathBuf::from("/work/HelloWorld"));
        assert_eq!(request.binary_dirs, vec![PathBuf::from("/work/HelloWorld/bin")]);
        assert_eq!(request.libraries, vec![PathBuf::from("/work/libs/a.jar")]);
    }

    #[test]
    fn relative_issue_paths_resolve_against_project_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let module = compiled_module(tmp.path()).with_project_path(Some(PathBuf::from("app")));
        let executor = LintExecutor::new(Canned(vec![Issue::new(
            "UnusedIds",
            LintSeverity::Warning,
            "Unused id",
        )
        .at(IssueLocation::new("res/layout/main.xml", 4))]));

        let mut sink = Vec::new();
        let summary = executor
            .execute(
                &module,
                &QualityProfile::new().activate("UnusedIds"),
                &AnyFile,
                &mut sink,
            )
            .unwrap();

        assert_eq!(summary.reported, 1);
        assert_eq!(
            sink[0].resource.path,
            tmp.path().join("app").join("res/layout/main.xml")
        );
        assert_eq!(sink[0].line, Some(4));
        assert_eq!(sink[0].severity, Severity::Warning);
    }

    #[test]
    fn profile_severity_overrides_lint_severity() {
        let tmp = tempfile::tempdir().unwrap();
        let executor = LintExecutor::new(Canned(vec![Issue::new(
            "HardcodedText",
            LintSeverity::Warning,
            "Hardcoded string",
        )
        .at(IssueLocation::new("/p/main.xml", 1))]));

        let mut sink = Vec::new();
        executor
            .execute(
                &compiled_module(tmp.path()),
                &QualityProfile::new().activate_with("HardcodedText", Severity::Error),
                &AnyFile,
                &mut sink,
            )
            .unwrap();
        assert_eq!(sink[0].severity, Severity::Error);
    }

    #[test]
    fn issue_without_location_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let executor = LintExecutor::new(Canned(vec![Issue::new(
            "MissingApplicationIcon",
            LintSeverity::Warning,
            "Should set an application icon",
        )]));

        let mut sink = Vec::new();
        let summary = executor
            .execute(
                &compiled_module(tmp.path()),
                &QualityProfile::new().activate("MissingApplicationIcon"),
                &AnyFile,
                &mut sink,
            )
            .unwrap();
        assert!(sink.is_empty());
        assert_eq!(summary.unresolved, 1);
    }

    #[test]
    fn blocking_internal_error_aborts_before_reporting() {
        let tmp = tempfile::tempdir().unwrap();
        let executor = LintExecutor::new(Canned(vec![
            Issue::new("UnusedIds", LintSeverity::Warning, "Unused id")
                .at(IssueLocation::new("/p/main.xml", 1)),
            Issue::new("LintError", LintSeverity::Error, "Unexpected failure during lint analysis"),
        ]));

        let mut sink = Vec::new();
        let err = executor
            .execute(
                &compiled_module(tmp.path()),
                &QualityProfile::new().activate("UnusedIds"),
                &AnyFile,
                &mut sink,
            )
            .unwrap_err();
        assert!(matches!(err, ExecutorError::Internal { .. }), "{err}");
        assert!(sink.is_empty());
    }

    #[test]
    fn informational_internal_error_does_not_abort() {
        let tmp = tempfile::tempdir().unwrap();
        let executor = LintExecutor::new(Canned(vec![Issue::new(
            "LintError",
            LintSeverity::Informational,
            "Skipped baseline",
        )]));

        let mut sink = Vec::new();
        let summary = executor
            .execute(
                &compiled_module(tmp.path()),
                &QualityProfile::new().activate("UnusedIds"),
                &AnyFile,
                &mut sink,
            )
            .unwrap();
        assert_eq!(summary.issues, 1);
        assert_eq!(summary.inactive, 1);
    }

    #[test]
    fn relative_base_dir_yields_absolute_issue_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let module = ModuleDescriptor::new("mod").with_binary_dirs(vec![tmp.path().to_path_buf()]);
        let executor = LintExecutor::new(Canned(vec![Issue::new(
            "UnusedIds",
            LintSeverity::Warning,
            "Unused id",
        )
        .at(IssueLocation::new("res/main.xml", 2))]));

        let resolver = SeenPaths::default();
        let mut sink = Vec::new();
        executor
            .execute(
                &module,
                &QualityProfile::new().activate("UnusedIds"),
                &resolver,
                &mut sink,
            )
            .unwrap();

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(*resolver.0.borrow(), vec![cwd.join("mod/res/main.xml")]);
    }

    #[test]
    fn runner_failure_is_logged_with_its_error() {
        let tmp = tempfile::tempdir().unwrap();
        let entries = LogEntries::default();
        let executor = LintExecutor::new(Broken).with_log(SharedLog(Rc::clone(&entries)));

        let mut sink = Vec::new();
        let err = executor
            .execute(
                &compiled_module(tmp.path()),
                &QualityProfile::new().activate("UnusedIds"),
                &AnyFile,
                &mut sink,
            )
            .unwrap_err();

        assert!(matches!(err, ExecutorError::Lint(RunnerError::Failed { .. })), "{err}");
        let entries = entries.borrow();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, LintSeverity::Error);
        assert_eq!(
            entries[0].1.as_deref(),
            Some("lint exited with exit status: 2: No such project")
        );
    }
}
