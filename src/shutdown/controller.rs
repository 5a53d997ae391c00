//! # The shutdown controller contract.
//!
//! A [`Controller`] detects a termination cause and drives registered teardown
//! callbacks. The bootstrap consumes exactly two operations from it: blocking
//! on [`wait`](Controller::wait) in its coordination task, and registering one
//! stop callback per runner via [`add_callback`](Controller::add_callback).

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RunError;
use crate::shutdown::callback::Callback;

/// The cause delivered to shutdown callbacks.
///
/// Carries only a textual reason, no structured payload.
#[derive(Clone, Debug)]
pub struct ShutdownEvent {
    reason: String,
}

impl ShutdownEvent {
    /// Creates an event from a textual reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the textual reason for the shutdown.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// # Shutdown controller capability.
///
/// Implementations decide what a "termination cause" is (OS signal, timer,
/// manual call) and how callbacks are bounded. The crate ships [`Graceful`]
/// as the default implementation.
///
/// [`Graceful`]: crate::Graceful
#[async_trait]
pub trait Controller: Send + Sync {
    /// Blocks until a shutdown is triggered or `ctx` is cancelled.
    ///
    /// In both cases the registered callbacks are driven before returning.
    /// Returns `Ok(())` when an external trigger caused the shutdown, and
    /// `Err(RunError::Canceled)` when `ctx` itself was cancelled, so that
    /// callers can tell a clean scope teardown from a real trigger.
    async fn wait(&self, ctx: CancellationToken) -> Result<(), RunError>;

    /// Registers a callback to be invoked during shutdown.
    ///
    /// Callbacks registered after the shutdown sequence has started are not
    /// invoked.
    fn add_callback(&self, cb: Arc<dyn Callback>);
}
