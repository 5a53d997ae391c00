//! # Shutdown triggers.
//!
//! A [`Trigger`] resolves once a termination cause exists and reports it as a
//! textual reason. Three implementations are provided:
//! - [`SignalTrigger`] - OS termination signals (the production default)
//! - [`ManualTrigger`] - programmatic trigger, sticky across late waiters
//! - [`DelayTrigger`] - fires after a fixed duration
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT` (quit signal, often used for core dumps or hard stop)
//!
//! **Windows platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RunError;

/// # Termination cause detector.
///
/// `fired` resolves when the trigger's cause occurs, yielding the textual
/// reason delivered to shutdown callbacks. A trigger that cannot arm itself
/// (e.g. signal registration failure) returns an error instead, which fails
/// the bootstrap: a process that cannot observe its shutdown signal should
/// not run blind.
#[async_trait]
pub trait Trigger: Send + Sync {
    /// Resolves when the trigger fires, yielding the shutdown reason.
    async fn fired(&self) -> Result<String, RunError>;
}

/// Trigger backed by OS termination signals.
///
/// Each call to [`fired`](Trigger::fired) creates independent signal
/// listeners.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalTrigger;

#[cfg(unix)]
#[async_trait]
impl Trigger for SignalTrigger {
    async fn fired(&self) -> Result<String, RunError> {
        use tokio::signal::unix::{signal, SignalKind};

        let register = |kind: SignalKind| {
            signal(kind).map_err(|e| RunError::fail(format!("signal registration failed: {e}")))
        };
        let mut sigint = register(SignalKind::interrupt())?;
        let mut sigterm = register(SignalKind::terminate())?;
        let mut sigquit = register(SignalKind::quit())?;

        let reason = tokio::select! {
            _ = tokio::signal::ctrl_c() => "interrupt",
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
            _ = sigquit.recv() => "SIGQUIT",
        };
        Ok(reason.to_string())
    }
}

#[cfg(not(unix))]
#[async_trait]
impl Trigger for SignalTrigger {
    async fn fired(&self) -> Result<String, RunError> {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| RunError::fail(format!("signal registration failed: {e}")))?;
        Ok("ctrl-c".to_string())
    }
}

/// Programmatic trigger.
///
/// Sticky: a [`trigger`](ManualTrigger::trigger) call made before anyone
/// waits still fires, and every waiter observes it. The first reason supplied
/// wins; later calls are no-ops.
#[derive(Clone, Debug, Default)]
pub struct ManualTrigger {
    fired: CancellationToken,
    reason: Arc<Mutex<Option<String>>>,
}

impl ManualTrigger {
    /// Creates an un-fired trigger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the trigger with the given reason.
    pub fn trigger(&self, reason: impl Into<String>) {
        let mut slot = self.reason.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(reason.into());
        }
        drop(slot);
        self.fired.cancel();
    }
}

#[async_trait]
impl Trigger for ManualTrigger {
    async fn fired(&self) -> Result<String, RunError> {
        self.fired.cancelled().await;
        let slot = self.reason.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.clone().unwrap_or_else(|| "manual trigger".to_string()))
    }
}

/// Trigger that fires once a fixed duration has elapsed.
///
/// Useful for bounded-lifetime processes and tests.
#[derive(Clone, Copy, Debug)]
pub struct DelayTrigger {
    delay: Duration,
}

impl DelayTrigger {
    /// Creates a trigger that fires after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Trigger for DelayTrigger {
    async fn fired(&self) -> Result<String, RunError> {
        tokio::time::sleep(self.delay).await;
        Ok(format!("timer elapsed after {:?}", self.delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_trigger_is_sticky() {
        let trigger = ManualTrigger::new();
        trigger.trigger("early");
        let reason = trigger.fired().await.unwrap();
        assert_eq!(reason, "early", "firing before wait must not be lost");
    }

    #[tokio::test]
    async fn test_manual_trigger_first_reason_wins() {
        let trigger = ManualTrigger::new();
        trigger.trigger("first");
        trigger.trigger("second");
        assert_eq!(trigger.fired().await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_manual_trigger_default_reason() {
        let trigger = ManualTrigger::new();
        trigger.fired.cancel();
        assert_eq!(trigger.fired().await.unwrap(), "manual trigger");
    }

    #[tokio::test]
    async fn test_delay_trigger_fires_with_timer_reason() {
        let trigger = DelayTrigger::new(Duration::from_millis(10));
        let reason = trigger.fired().await.unwrap();
        assert!(
            reason.starts_with("timer elapsed"),
            "unexpected reason: {reason}"
        );
    }
}
