//! Severity-keyed log sink for lint issues.

use tracing::Level;

use crate::types::LintSeverity;

/// Receives every issue lint emits, whether or not it becomes a violation.
pub trait IssueLog {
    /// Logs one message at the level [`LintSeverity::log_level`] maps
    /// `severity` to, with an optional associated error.
    fn log(
        &self,
        severity: LintSeverity,
        error: Option<&(dyn std::error::Error + 'static)>,
        message: &str,
    );
}

/// Forwards issues to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingIssueLog;

impl IssueLog for TracingIssueLog {
    fn log(
        &self,
        severity: LintSeverity,
        error: Option<&(dyn std::error::Error + 'static)>,
        message: &str,
    ) {
        let level = severity.log_level();
        match error {
            Some(error) => emit_with_error(level, error, message),
            None => emit(level, message),
        }
    }
}

// `tracing` macros need the level at compile time.
fn emit(level: Level, message: &str) {
    if level == Level::ERROR {
        tracing::error!("{message}");
    } else if level == Level::WARN {
        tracing::warn!("{message}");
    } else if level == Level::INFO {
        tracing::info!("{message}");
    } else if level == Level::DEBUG {
        tracing::debug!("{message}");
    } else {
        tracing::trace!("{message}");
    }
}

fn emit_with_error(level: Level, error: &(dyn std::error::Error + 'static), message: &str) {
    if level == Level::ERROR {
        tracing::error!(error, "{message}");
    } else if level == Level::WARN {
        tracing::warn!(error, "{message}");
    } else if level == Level::INFO {
        tracing::info!(error, "{message}");
    } else if level == Level::DEBUG {
        tracing::debug!(error, "{message}");
    } else {
        tracing::trace!(error, "{message}");
    }
}
