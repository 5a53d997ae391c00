//! # Bootstrap configuration builder.
//!
//! [`BootstrapBuilder`] assembles a [`Bootstrap`] from overrides applied in
//! call order: runner registrations append, hook setters overwrite, and the
//! shutdown override takes an `Option` so that `None` is an explicit "keep
//! whatever was set" no-op rather than an error. After [`build`] the
//! controller is never absent: a default [`Graceful`] (1s callback timeout,
//! OS-signal trigger, logging error handler) is installed unless overridden.
//!
//! [`build`]: BootstrapBuilder::build
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use bootvisor::{Bootstrap, Graceful, ManualTrigger};
//!
//! let shutdown = Arc::new(
//!     Graceful::builder()
//!         .timeout(Duration::from_secs(5))
//!         .trigger(Arc::new(ManualTrigger::new()))
//!         .build(),
//! );
//!
//! let boot = Bootstrap::builder()
//!     .on_run(|_ctx| async { Ok(()) })
//!     .shutdown(Some(shutdown))
//!     .shutdown(None) // explicit no-op: the override above survives
//!     .build();
//! # let _ = boot;
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::boot::bootstrap::{Bootstrap, Hook};
use crate::error::RunError;
use crate::runners::RunnerRef;
use crate::shutdown::{Controller, Graceful};

/// Builder for [`Bootstrap`]; overrides apply in call order.
#[derive(Default)]
pub struct BootstrapBuilder {
    runners: Vec<RunnerRef>,
    before_run: Option<Hook>,
    on_run: Option<Hook>,
    shutdown: Option<Arc<dyn Controller>>,
}

impl BootstrapBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one runner. Startup order follows registration order.
    pub fn runner(mut self, runner: RunnerRef) -> Self {
        self.runners.push(runner);
        self
    }

    /// Appends a batch of runners; accumulates across calls.
    pub fn runners<I>(mut self, runners: I) -> Self
    where
        I: IntoIterator<Item = RunnerRef>,
    {
        self.runners.extend(runners);
        self
    }

    /// Sets the pre-start hook; a later call overwrites an earlier one.
    ///
    /// The hook runs synchronously before anything is spawned and gates the
    /// whole run: its error becomes the run result and no runner starts.
    pub fn before_run<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), RunError>> + Send + 'static,
    {
        self.before_run = Some(Arc::new(move |ctx| hook(ctx).boxed()));
        self
    }

    /// Sets the post-start hook; a later call overwrites an earlier one.
    ///
    /// The hook runs as a concurrent task once every runner has confirmed its
    /// start; its failure wraps as "onRun err" and cancels the shared scope.
    pub fn on_run<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), RunError>> + Send + 'static,
    {
        self.on_run = Some(Arc::new(move |ctx| hook(ctx).boxed()));
        self
    }

    /// Overrides the shutdown controller.
    ///
    /// `None` preserves whatever was set before, including the default — the
    /// sentinel lets callers thread an optional override without branching.
    pub fn shutdown(mut self, controller: Option<Arc<dyn Controller>>) -> Self {
        if let Some(controller) = controller {
            self.shutdown = Some(controller);
        }
        self
    }

    /// Builds the bootstrap, installing the default [`Graceful`] controller
    /// when none was supplied.
    pub fn build(self) -> Bootstrap {
        Bootstrap {
            runners: self.runners,
            before_run: self.before_run,
            on_run: self.on_run,
            gs: self
                .shutdown
                .unwrap_or_else(|| Arc::new(Graceful::builder().build())),
        }
    }
}
