//! Error types used by the bootvisor runtime and runners.
//!
//! This module defines two main error enums:
//!
//! - [`RunError`] — errors raised by individual runner executions, lifecycle
//!   hooks, and shutdown triggers.
//! - [`BootError`] — errors raised by the orchestration layer itself, carrying
//!   the contextual wrapping the bootstrap applies ("starting X failed",
//!   "stopping X failed", and so on).
//!
//! Both types provide helper methods (`as_label`) for logging/metrics.
//! [`BootError::is_canceled`] walks the wrap chain so that a clean cancellation
//! is recognizable no matter how deeply it was wrapped.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by runner executions, hooks, and triggers.
///
/// These represent failures of the individual units the bootstrap drives,
/// as opposed to failures of the orchestration itself.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError {
    /// Execution failed with a terminal internal error.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Execution exceeded its bounded context.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: Duration,
    },

    /// Execution was cancelled because the shared scope shut down.
    ///
    /// Cancellation is a clean exit, not a failure: the bootstrap filters it
    /// out of its aggregate result.
    #[error("context cancelled")]
    Canceled,
}

impl RunError {
    /// Shorthand for [`RunError::Fail`] from any displayable message.
    pub fn fail(error: impl Into<String>) -> Self {
        RunError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::Fail { .. } => "run_failed",
            RunError::Timeout { .. } => "run_timeout",
            RunError::Canceled => "run_canceled",
        }
    }

    /// Returns `true` when this error is a clean cancellation.
    pub fn is_canceled(&self) -> bool {
        matches!(self, RunError::Canceled)
    }
}

/// # Errors produced by the bootstrap orchestration.
///
/// Each variant preserves the point of failure and the underlying
/// [`RunError`]. The top-level result of a bootstrap run is always either
/// `Ok(())` or [`BootError::Run`] wrapping the first failure observed across
/// all concurrent tasks.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BootError {
    /// The pre-start hook failed. Surfaced without additional context: the
    /// hook's own error is the whole story, nothing was started yet.
    #[error(transparent)]
    BeforeRun(RunError),

    /// The shutdown controller's wait operation returned an error, usually
    /// the cancellation of the shared scope.
    #[error(transparent)]
    Wait(RunError),

    /// A runner's run operation returned a terminal error.
    #[error("starting {name} failed: {source}")]
    StartFailed {
        /// Name of the failing runner.
        name: String,
        /// The runner's own error.
        source: RunError,
    },

    /// A runner's stop operation failed during a shutdown callback.
    ///
    /// Handled by the shutdown controller's error handler; never surfaced
    /// through the bootstrap's own result.
    #[error("stopping {name} failed: {source}")]
    StopFailed {
        /// Name of the failing runner.
        name: String,
        /// The runner's own error.
        source: RunError,
    },

    /// The post-start hook failed.
    #[error("onRun err: {source}")]
    OnRun {
        /// The hook's own error.
        source: RunError,
    },

    /// A shutdown callback did not finish within the controller's bound.
    #[error("shutdown callback timed out after {timeout:?}")]
    CallbackTimeout {
        /// The configured callback timeout.
        timeout: Duration,
    },

    /// A spawned task could not be joined (it panicked).
    #[error("task join failed: {message}")]
    Join {
        /// The join error description.
        message: String,
    },

    /// Aggregate failure of a bootstrap run: the first error observed across
    /// all concurrent tasks, re-wrapped.
    #[error("bootstrap run err: {source}")]
    Run {
        /// The triggering error.
        source: Box<BootError>,
    },
}

impl BootError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BootError::BeforeRun(_) => "boot_before_run",
            BootError::Wait(_) => "boot_wait",
            BootError::StartFailed { .. } => "boot_start_failed",
            BootError::StopFailed { .. } => "boot_stop_failed",
            BootError::OnRun { .. } => "boot_on_run",
            BootError::CallbackTimeout { .. } => "boot_callback_timeout",
            BootError::Join { .. } => "boot_join",
            BootError::Run { .. } => "boot_run",
        }
    }

    /// Returns `true` when the error is, at its root, a clean cancellation
    /// of the shared scope.
    ///
    /// Walks the wrap chain, so a cancelled runner wrapped as
    /// `StartFailed` wrapped again as `Run` is still recognized as clean.
    pub fn is_canceled(&self) -> bool {
        match self {
            BootError::BeforeRun(source) | BootError::Wait(source) => source.is_canceled(),
            BootError::StartFailed { source, .. }
            | BootError::StopFailed { source, .. }
            | BootError::OnRun { source } => source.is_canceled(),
            BootError::Run { source } => source.is_canceled(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_failed_display() {
        let err = BootError::StartFailed {
            name: "web".into(),
            source: RunError::fail("boom"),
        };
        assert_eq!(err.to_string(), "starting web failed: execution failed: boom");
    }

    #[test]
    fn test_stop_failed_display() {
        let err = BootError::StopFailed {
            name: "web".into(),
            source: RunError::fail("boom"),
        };
        assert_eq!(err.to_string(), "stopping web failed: execution failed: boom");
    }

    #[test]
    fn test_on_run_display() {
        let err = BootError::OnRun {
            source: RunError::fail("hook"),
        };
        assert_eq!(err.to_string(), "onRun err: execution failed: hook");
    }

    #[test]
    fn test_run_wraps_with_context() {
        let err = BootError::Run {
            source: Box::new(BootError::OnRun {
                source: RunError::fail("hook"),
            }),
        };
        assert_eq!(
            err.to_string(),
            "bootstrap run err: onRun err: execution failed: hook"
        );
    }

    #[test]
    fn test_before_run_is_transparent() {
        let err = BootError::BeforeRun(RunError::fail("gate"));
        assert_eq!(err.to_string(), "execution failed: gate");
    }

    #[test]
    fn test_is_canceled_walks_the_wrap_chain() {
        let clean = BootError::Run {
            source: Box::new(BootError::StartFailed {
                name: "web".into(),
                source: RunError::Canceled,
            }),
        };
        assert!(clean.is_canceled(), "cancellation must survive wrapping");

        let dirty = BootError::Run {
            source: Box::new(BootError::OnRun {
                source: RunError::fail("hook"),
            }),
        };
        assert!(!dirty.is_canceled());
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(RunError::Canceled.as_label(), "run_canceled");
        assert_eq!(
            RunError::Timeout {
                timeout: Duration::from_secs(1)
            }
            .as_label(),
            "run_timeout"
        );
        assert_eq!(BootError::Wait(RunError::Canceled).as_label(), "boot_wait");
    }
}
