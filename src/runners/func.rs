//! # Closure-backed runner (`RunnerFn`)
//!
//! [`RunnerFn`] wraps a run closure and a stop closure, producing a fresh
//! future per invocation. This avoids shared mutable state; if the two
//! closures need to talk to each other (the usual case: stop tells run to
//! return), share a token or channel explicitly between them.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use bootvisor::{RunError, RunnerFn, RunnerRef};
//!
//! let halt = CancellationToken::new();
//! let stop_halt = halt.clone();
//!
//! let r: RunnerRef = RunnerFn::arc(
//!     "worker",
//!     move |ctx: CancellationToken| {
//!         let halt = halt.clone();
//!         async move {
//!             tokio::select! {
//!                 _ = ctx.cancelled() => {}
//!                 _ = halt.cancelled() => {}
//!             }
//!             Ok::<(), RunError>(())
//!         }
//!     },
//!     move |_ctx: CancellationToken| {
//!         let halt = stop_halt.clone();
//!         async move {
//!             halt.cancel();
//!             Ok::<(), RunError>(())
//!         }
//!     },
//! );
//!
//! assert_eq!(r.name(), "worker");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RunError;
use crate::runners::runner::Runner;

/// Closure-backed runner implementation.
///
/// Wraps a run closure and a stop closure that each *create* a new future per
/// call.
pub struct RunnerFn<R, S> {
    name: Cow<'static, str>,
    run: R,
    stop: S,
}

impl<R, S> RunnerFn<R, S> {
    /// Creates a new closure-backed runner.
    ///
    /// Prefer [`RunnerFn::arc`] when you immediately need a
    /// [`RunnerRef`](crate::RunnerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, run: R, stop: S) -> Self {
        Self {
            name: name.into(),
            run,
            stop,
        }
    }

    /// Creates the runner and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, run: R, stop: S) -> Arc<Self> {
        Arc::new(Self::new(name, run, stop))
    }
}

#[async_trait]
impl<R, RFut, S, SFut> Runner for RunnerFn<R, S>
where
    R: Fn(CancellationToken) -> RFut + Send + Sync + 'static,
    RFut: Future<Output = Result<(), RunError>> + Send + 'static,
    S: Fn(CancellationToken) -> SFut + Send + Sync + 'static,
    SFut: Future<Output = Result<(), RunError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: CancellationToken) -> Result<(), RunError> {
        (self.run)(ctx).await
    }

    async fn stop(&self, ctx: CancellationToken) -> Result<(), RunError> {
        (self.stop)(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_runner_fn_invokes_both_closures() {
        let runs = Arc::new(AtomicUsize::new(0));
        let stops = Arc::new(AtomicUsize::new(0));
        let run_count = Arc::clone(&runs);
        let stop_count = Arc::clone(&stops);

        let r = RunnerFn::arc(
            "counted",
            move |_ctx: CancellationToken| {
                let runs = Arc::clone(&run_count);
                async move {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
            move |_ctx: CancellationToken| {
                let stops = Arc::clone(&stop_count);
                async move {
                    stops.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
        );

        assert_eq!(r.name(), "counted");
        r.run(CancellationToken::new()).await.unwrap();
        r.stop(CancellationToken::new()).await.unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }
}
