//! # Teardown callbacks.
//!
//! A [`Callback`] is invoked by the shutdown controller once a termination
//! cause is known. Each invocation receives its own bounded
//! [`CancellationToken`], decoupled from the shared run scope, and the
//! [`ShutdownEvent`] carrying the cause. [`CallbackFn`] adapts a closure.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::BootError;
use crate::shutdown::controller::ShutdownEvent;

/// # Function invoked during shutdown.
///
/// Errors returned here are handed to the controller's
/// [`ErrorHandler`](crate::ErrorHandler); they never fail the bootstrap run.
#[async_trait]
pub trait Callback: Send + Sync {
    /// Performs one unit of teardown work.
    ///
    /// `ctx` is cancelled when the callback's time budget is exhausted;
    /// implementations should observe it and return promptly.
    async fn on_shutdown(
        &self,
        ctx: CancellationToken,
        event: &ShutdownEvent,
    ) -> Result<(), BootError>;
}

/// Closure-backed callback implementation.
pub struct CallbackFn<F> {
    f: F,
}

impl<F> CallbackFn<F> {
    /// Creates a new closure-backed callback.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the callback and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Callback for CallbackFn<F>
where
    F: Fn(CancellationToken, ShutdownEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BootError>> + Send + 'static,
{
    async fn on_shutdown(
        &self,
        ctx: CancellationToken,
        event: &ShutdownEvent,
    ) -> Result<(), BootError> {
        (self.f)(ctx, event.clone()).await
    }
}
