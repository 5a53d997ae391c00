//! # Bootstrap: ordered startup, shutdown coordination, result aggregation.
//!
//! The [`Bootstrap`] owns the runner set, two optional lifecycle hooks, and a
//! shutdown [`Controller`]. One call to [`Bootstrap::run`] drives the whole
//! process lifecycle.
//!
//! ## Run sequence
//! ```text
//! run(ctx):
//!   no runners ──► error log, Ok(())
//!   before_run(ctx) ──► Err? return it (hard gate, nothing was started)
//!   scope = ctx.child_token()
//!
//!   spawn: controller.wait(scope)                 (coordination task)
//!   for each runner, in order:
//!     controller.add_callback(stop runner)        (registered BEFORE spawn)
//!     spawn: log "starting" → signal barrier → runner.run(scope)
//!   barrier: one confirmation per runner          ("about to run", not "running")
//!   log "bootstrap started"
//!   spawn: on_run(scope)                          (post-start task)
//!
//!   join all:
//!     first Err ──► scope.cancel(), retained      (later errors dropped)
//!   aggregate:
//!     clean cancellation ──► Ok(())
//!     anything else      ──► "bootstrap run err" wrap
//! ```
//!
//! ## Rules
//! - The pre-start hook completes before any runner starts; if it fails, no
//!   runner is started and no stop callback is registered.
//! - A runner's stop callback exists before its run task does, so a runner can
//!   never need stopping while no callback is registered.
//! - The barrier waits for each runner's "about to run" checkpoint only; a
//!   slow-starting runner does not block the others.
//! - Stop operations run under the controller's own bounded context, decoupled
//!   from the shared scope: stop logic still works after the scope cancelled.
//! - `Bootstrap` is built once and run once; stop callbacks accumulate on the
//!   controller, so a second `run` on the same instance is not supported.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::{sync::mpsc, task::JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::Level;

use crate::error::{BootError, RunError};
use crate::runners::RunnerRef;
use crate::shutdown::{Callback, CallbackFn, Controller, ShutdownEvent};

/// Stored lifecycle hook: called with the shared scope, yields a boxed future.
pub(crate) type Hook =
    Arc<dyn Fn(CancellationToken) -> BoxFuture<'static, Result<(), RunError>> + Send + Sync>;

/// Coordinates runner startup, shutdown callbacks, and error aggregation.
///
/// Construct via [`Bootstrap::builder`].
pub struct Bootstrap {
    pub(crate) runners: Vec<RunnerRef>,
    pub(crate) before_run: Option<Hook>,
    pub(crate) on_run: Option<Hook>,
    pub(crate) gs: Arc<dyn Controller>,
}

impl Bootstrap {
    /// Returns a builder with no runners, no hooks, and the default graceful
    /// shutdown controller pending at [`build`](super::BootstrapBuilder::build).
    pub fn builder() -> super::BootstrapBuilder {
        super::BootstrapBuilder::new()
    }

    /// Runs every configured runner until all finish, one fails, or a
    /// shutdown is triggered.
    ///
    /// Returns `Ok(())` for an empty runner set (a process started with
    /// nothing to do), for a clean external cancellation, and for a
    /// triggered shutdown where every unit stopped cleanly. The first real
    /// failure across all concurrent tasks is returned wrapped as
    /// "bootstrap run err".
    pub async fn run(&self, ctx: CancellationToken) -> Result<(), BootError> {
        if self.runners.is_empty() {
            tracing::error!("no runners, abort");
            return Ok(());
        }

        if let Some(before) = &self.before_run {
            before(ctx.clone()).await.map_err(BootError::BeforeRun)?;
        }

        let scope = ctx.child_token();
        let mut set: JoinSet<Result<(), BootError>> = JoinSet::new();

        {
            let gs = Arc::clone(&self.gs);
            let wait_scope = scope.clone();
            set.spawn(async move { gs.wait(wait_scope).await.map_err(BootError::Wait) });
        }

        let (started_tx, mut started_rx) = mpsc::channel::<()>(self.runners.len());
        for runner in &self.runners {
            self.gs.add_callback(stop_callback(Arc::clone(runner)));

            let runner = Arc::clone(runner);
            let run_scope = scope.clone();
            let started = started_tx.clone();
            set.spawn(async move {
                if tracing::enabled!(Level::INFO) {
                    tracing::info!(runner = runner.name(), "starting runner");
                }
                // Capacity equals the runner count, so this never blocks.
                let _ = started.send(()).await;
                runner
                    .run(run_scope)
                    .await
                    .map_err(|source| BootError::StartFailed {
                        name: runner.name().to_string(),
                        source,
                    })
            });
        }
        drop(started_tx);

        for _ in 0..self.runners.len() {
            if started_rx.recv().await.is_none() {
                break;
            }
        }
        if tracing::enabled!(Level::INFO) {
            tracing::info!("bootstrap started");
        }

        let on_run = self.on_run.clone();
        let hook_scope = scope.clone();
        set.spawn(async move {
            if let Some(hook) = on_run {
                hook(hook_scope)
                    .await
                    .map_err(|source| BootError::OnRun { source })?;
            }
            Ok(())
        });

        let mut first_err: Option<BootError> = None;
        while let Some(joined) = set.join_next().await {
            let res = joined.unwrap_or_else(|e| {
                Err(BootError::Join {
                    message: e.to_string(),
                })
            });
            if let Err(err) = res {
                if first_err.is_none() {
                    scope.cancel();
                    first_err = Some(err);
                }
            }
        }

        match first_err {
            Some(err) if !err.is_canceled() => Err(BootError::Run {
                source: Box::new(err),
            }),
            _ => Ok(()),
        }
    }
}

/// Builds the stop callback registered for one runner.
///
/// Invoked by the shutdown controller with its own bounded context and the
/// shutdown cause; failures are wrapped as "stopping <name> failed" and go to
/// the controller's error handler.
fn stop_callback(runner: RunnerRef) -> Arc<dyn Callback> {
    CallbackFn::arc(move |stop_ctx: CancellationToken, event: ShutdownEvent| {
        let runner = Arc::clone(&runner);
        async move {
            if tracing::enabled!(Level::INFO) {
                tracing::info!(
                    runner = runner.name(),
                    cause = event.reason(),
                    "stopping runner"
                );
            }
            runner
                .stop(stop_ctx)
                .await
                .map_err(|source| BootError::StopFailed {
                    name: runner.name().to_string(),
                    source,
                })?;
            if tracing::enabled!(Level::INFO) {
                tracing::info!(runner = runner.name(), "runner stopped");
            }
            Ok(())
        }
    })
}
