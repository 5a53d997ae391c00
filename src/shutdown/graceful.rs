//! # Graceful shutdown controller.
//!
//! [`Graceful`] is the default [`Controller`]: it blocks on a [`Trigger`]
//! (or on cancellation of the scope it was given), then drives every
//! registered callback concurrently, each under an independent bounded
//! timeout. Callback failures and timeouts go to an [`ErrorHandler`], never
//! to the bootstrap's result.
//!
//! ## Shutdown path
//! ```text
//! wait(scope):
//!   select:
//!     trigger fired(reason) ──► drive callbacks ──► Ok(())
//!     scope cancelled       ──► drive callbacks ──► Err(Canceled)
//!
//! drive(event):
//!   for each callback (concurrently):
//!     fresh stop token
//!     timeout(bound, cb.on_shutdown(stop_token, event))
//!       ├─ Ok(Ok)   → done
//!       ├─ Ok(Err)  → error handler
//!       └─ elapsed  → cancel stop token → CallbackTimeout → error handler
//! ```
//!
//! ## Rules
//! - Callbacks run **concurrently**; no ordering is promised between them.
//! - Each callback gets a **fresh** token, decoupled from the run scope, so
//!   stop logic still gets its full budget after the scope is cancelled.
//! - A zero timeout means unbounded callbacks.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::{task::JoinSet, time};
use tokio_util::sync::CancellationToken;

use crate::error::{BootError, RunError};
use crate::shutdown::callback::Callback;
use crate::shutdown::controller::{Controller, ShutdownEvent};
use crate::shutdown::trigger::{SignalTrigger, Trigger};

/// # Sink for shutdown-time failures.
///
/// Receives every callback error and timeout. Implementations must not block
/// for long; they are called inline from the shutdown sequence.
pub trait ErrorHandler: Send + Sync {
    /// Handles one failure observed during shutdown.
    fn handle(&self, err: &BootError);
}

/// Closure-backed error handler.
pub struct ErrorHandlerFn<F> {
    f: F,
}

impl<F> ErrorHandlerFn<F> {
    /// Creates a new closure-backed handler.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F> ErrorHandler for ErrorHandlerFn<F>
where
    F: Fn(&BootError) + Send + Sync,
{
    fn handle(&self, err: &BootError) {
        (self.f)(err)
    }
}

/// Default error handler: logs failures at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogErrorHandler;

impl ErrorHandler for LogErrorHandler {
    fn handle(&self, err: &BootError) {
        tracing::error!(error = %err, label = err.as_label(), "error when shutting down");
    }
}

/// Default shutdown controller with bounded, concurrent callbacks.
///
/// Build via [`Graceful::builder`]. Defaults: 1s callback timeout,
/// [`SignalTrigger`], [`LogErrorHandler`].
pub struct Graceful {
    timeout: Duration,
    trigger: Arc<dyn Trigger>,
    on_error: Arc<dyn ErrorHandler>,
    callbacks: Mutex<Vec<Arc<dyn Callback>>>,
}

impl Graceful {
    /// Returns a builder with the default configuration.
    pub fn builder() -> GracefulBuilder {
        GracefulBuilder::default()
    }

    /// Drives all registered callbacks for the given event and waits for
    /// every one of them to finish or time out.
    async fn drive(&self, event: ShutdownEvent) {
        let callbacks: Vec<Arc<dyn Callback>> = self
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut set = JoinSet::new();
        for cb in callbacks {
            let event = event.clone();
            let bound = self.timeout;
            let on_error = Arc::clone(&self.on_error);
            set.spawn(async move {
                let stop_ctx = CancellationToken::new();
                let res = if bound > Duration::ZERO {
                    match time::timeout(bound, cb.on_shutdown(stop_ctx.clone(), &event)).await {
                        Ok(res) => res,
                        Err(_elapsed) => {
                            stop_ctx.cancel();
                            Err(BootError::CallbackTimeout { timeout: bound })
                        }
                    }
                } else {
                    cb.on_shutdown(stop_ctx.clone(), &event).await
                };
                if let Err(err) = res {
                    on_error.handle(&err);
                }
            });
        }
        while set.join_next().await.is_some() {}
    }
}

#[async_trait]
impl Controller for Graceful {
    async fn wait(&self, ctx: CancellationToken) -> Result<(), RunError> {
        tokio::select! {
            fired = self.trigger.fired() => {
                let reason = fired?;
                self.drive(ShutdownEvent::new(reason)).await;
                Ok(())
            }
            _ = ctx.cancelled() => {
                self.drive(ShutdownEvent::new("context cancelled")).await;
                Err(RunError::Canceled)
            }
        }
    }

    fn add_callback(&self, cb: Arc<dyn Callback>) {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cb);
    }
}

/// Builder for [`Graceful`].
pub struct GracefulBuilder {
    timeout: Duration,
    trigger: Arc<dyn Trigger>,
    on_error: Arc<dyn ErrorHandler>,
}

impl Default for GracefulBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            trigger: Arc::new(SignalTrigger),
            on_error: Arc::new(LogErrorHandler),
        }
    }
}

impl GracefulBuilder {
    /// Sets the per-callback time bound. Zero means unbounded.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the termination trigger.
    pub fn trigger(mut self, trigger: Arc<dyn Trigger>) -> Self {
        self.trigger = trigger;
        self
    }

    /// Replaces the shutdown-time error handler.
    pub fn error_handler(mut self, on_error: Arc<dyn ErrorHandler>) -> Self {
        self.on_error = on_error;
        self
    }

    /// Builds the controller.
    pub fn build(self) -> Graceful {
        Graceful {
            timeout: self.timeout,
            trigger: self.trigger,
            on_error: self.on_error,
            callbacks: Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::shutdown::callback::CallbackFn;
    use crate::shutdown::trigger::ManualTrigger;

    #[derive(Clone, Default)]
    struct RecordingHandler {
        errors: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingHandler {
        fn errors(&self) -> Vec<String> {
            self.errors.lock().unwrap().clone()
        }
    }

    impl ErrorHandler for RecordingHandler {
        fn handle(&self, err: &BootError) {
            self.errors.lock().unwrap().push(err.to_string());
        }
    }

    fn counting_callback(
        count: Arc<AtomicUsize>,
        reasons: Arc<Mutex<Vec<String>>>,
    ) -> Arc<dyn Callback> {
        CallbackFn::arc(move |_ctx, event: ShutdownEvent| {
            let count = Arc::clone(&count);
            let reasons = Arc::clone(&reasons);
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                reasons.lock().unwrap().push(event.reason().to_string());
                Ok::<(), BootError>(())
            }
        })
    }

    #[tokio::test]
    async fn test_trigger_drives_all_callbacks() {
        let trigger = ManualTrigger::new();
        let gs = Graceful::builder()
            .trigger(Arc::new(trigger.clone()))
            .build();

        let count = Arc::new(AtomicUsize::new(0));
        let reasons = Arc::new(Mutex::new(Vec::new()));
        gs.add_callback(counting_callback(Arc::clone(&count), Arc::clone(&reasons)));
        gs.add_callback(counting_callback(Arc::clone(&count), Arc::clone(&reasons)));

        trigger.trigger("bye");
        let res = gs.wait(CancellationToken::new()).await;
        assert!(res.is_ok(), "triggered shutdown is not an error");
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(reasons.lock().unwrap().as_slice(), ["bye", "bye"]);
    }

    #[tokio::test]
    async fn test_cancelled_scope_still_drives_callbacks() {
        let gs = Graceful::builder()
            .trigger(Arc::new(ManualTrigger::new()))
            .build();

        let count = Arc::new(AtomicUsize::new(0));
        let reasons = Arc::new(Mutex::new(Vec::new()));
        gs.add_callback(counting_callback(Arc::clone(&count), Arc::clone(&reasons)));

        let ctx = CancellationToken::new();
        ctx.cancel();
        let res = gs.wait(ctx).await;
        assert!(
            matches!(res, Err(RunError::Canceled)),
            "scope cancellation must be reported as Canceled, got {res:?}"
        );
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(reasons.lock().unwrap().as_slice(), ["context cancelled"]);
    }

    #[tokio::test]
    async fn test_slow_callback_is_reported_as_timeout() {
        let trigger = ManualTrigger::new();
        let handler = RecordingHandler::default();
        let gs = Graceful::builder()
            .trigger(Arc::new(trigger.clone()))
            .timeout(Duration::from_millis(10))
            .error_handler(Arc::new(handler.clone()))
            .build();

        gs.add_callback(CallbackFn::arc(
            |_ctx: CancellationToken, _event: ShutdownEvent| async {
                std::future::pending::<()>().await;
                Ok::<(), BootError>(())
            },
        ));

        trigger.trigger("bye");
        gs.wait(CancellationToken::new()).await.unwrap();

        let errors = handler.errors();
        assert_eq!(errors.len(), 1);
        assert!(
            errors[0].contains("timed out"),
            "expected timeout report, got: {}",
            errors[0]
        );
    }

    #[tokio::test]
    async fn test_zero_timeout_means_unbounded() {
        let trigger = ManualTrigger::new();
        let handler = RecordingHandler::default();
        let gs = Graceful::builder()
            .trigger(Arc::new(trigger.clone()))
            .timeout(Duration::ZERO)
            .error_handler(Arc::new(handler.clone()))
            .build();

        let count = Arc::new(AtomicUsize::new(0));
        let cb_count = Arc::clone(&count);
        gs.add_callback(CallbackFn::arc(
            move |_ctx: CancellationToken, _event: ShutdownEvent| {
                let count = Arc::clone(&cb_count);
                async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    count.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), BootError>(())
                }
            },
        ));

        trigger.trigger("bye");
        gs.wait(CancellationToken::new()).await.unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(handler.errors().is_empty());
    }

    #[tokio::test]
    async fn test_callback_error_goes_to_handler_not_caller() {
        let trigger = ManualTrigger::new();
        let handler = RecordingHandler::default();
        let gs = Graceful::builder()
            .trigger(Arc::new(trigger.clone()))
            .error_handler(Arc::new(handler.clone()))
            .build();

        gs.add_callback(CallbackFn::arc(
            |_ctx: CancellationToken, _event: ShutdownEvent| async {
                Err::<(), BootError>(BootError::StopFailed {
                    name: "web".into(),
                    source: RunError::fail("boom"),
                })
            },
        ));

        trigger.trigger("bye");
        let res = gs.wait(CancellationToken::new()).await;
        assert!(res.is_ok(), "callback failures must not surface via wait");
        assert_eq!(handler.errors().len(), 1);
        assert!(handler.errors()[0].contains("stopping web failed"));
    }
}
