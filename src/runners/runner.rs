//! # The runner contract.
//!
//! A [`Runner`] is a long-lived unit of work managed by the bootstrap: it has a
//! stable name, a blocking [`run`](Runner::run) operation, and a graceful
//! [`stop`](Runner::stop) operation. The common handle type is [`RunnerRef`],
//! an `Arc<dyn Runner>` suitable for sharing across the runtime.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RunError;

/// # Long-lived, stoppable unit of work.
///
/// `run` must block until the given context is cancelled or a terminal
/// internal error occurs; it must not return spuriously. `stop` must attempt
/// graceful termination within its own bounded context and is called at most
/// once per bootstrap run, via the shutdown controller's callback mechanism.
///
/// There is no enforced ordering between `run` returning and `stop` being
/// called: both are triggered by the same shutdown cause, and a runner whose
/// `run` returns `Ok` while its `stop` is still in flight has exited cleanly.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use bootvisor::{RunError, Runner};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Runner for Echo {
///     fn name(&self) -> &str { "echo" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), RunError> {
///         ctx.cancelled().await;
///         Ok(())
///     }
///
///     async fn stop(&self, _ctx: CancellationToken) -> Result<(), RunError> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Runner: Send + Sync + 'static {
    /// Returns a stable, human-readable runner name.
    ///
    /// Names are unique by convention, not enforced.
    fn name(&self) -> &str;

    /// Executes the runner until it is stopped, the context is cancelled, or
    /// a terminal internal error occurs.
    async fn run(&self, ctx: CancellationToken) -> Result<(), RunError>;

    /// Gracefully terminates the runner within the given bounded context.
    ///
    /// The context is independent of the run context: stop logic still gets
    /// its full budget even when the shared scope is already cancelled.
    async fn stop(&self, ctx: CancellationToken) -> Result<(), RunError>;
}

/// Shared handle to a runner.
pub type RunnerRef = Arc<dyn Runner>;
