//! # bootvisor
//!
//! **Bootvisor** is a lightweight process lifecycle orchestration library for Rust.
//!
//! It starts a set of independently running long-lived workers ("runners"),
//! coordinates an ordered startup/shutdown sequence, and terminates cleanly
//! when any worker fails, when an external shutdown trigger fires, or when
//! all workers finish. It is designed as a building block for service
//! entrypoints, not a supervisor: failed runners are not restarted.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    Runner    │   │    Runner    │   │    Runner    │
//!     │ (worker #1)  │   │ (worker #2)  │   │ (worker #3)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Bootstrap (lifecycle orchestrator)                               │
//! │  - before_run hook (hard gate: runs before anything starts)       │
//! │  - shared scope (one CancellationToken child of the caller's)     │
//! │  - start-confirmation barrier (all runners announce "about to     │
//! │    run" before the on_run hook is spawned)                        │
//! │  - first-error-wins aggregation across all spawned tasks          │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Controller (shutdown coordination, default: Graceful)            │
//! │  - Trigger: OS signal / manual / timer                            │
//! │  - one stop callback per runner, bounded timeout each             │
//! │  - ErrorHandler: sink for stop failures (default logs them)       │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Bootstrap::run(ctx)
//!   ├─► no runners?            error log, Ok(())
//!   ├─► before_run(ctx)        Err → returned as-is, nothing started
//!   ├─► spawn controller.wait(scope)
//!   ├─► per runner, in order:
//!   │     register stop callback, then spawn:
//!   │       "starting runner" → barrier signal → runner.run(scope)
//!   ├─► barrier satisfied → "bootstrap started" → spawn on_run(scope)
//!   └─► join everything:
//!         first error cancels the scope and becomes the cause
//!         clean cancellation → Ok(())
//!         anything else → wrapped as "bootstrap run err"
//! ```
//!
//! ## Features
//! | Area            | Description                                               | Key types / traits                  |
//! |-----------------|-----------------------------------------------------------|-------------------------------------|
//! | **Runners**     | Long-lived, stoppable units of work.                      | [`Runner`], [`RunnerFn`], [`RunnerRef`] |
//! | **Orchestration** | Ordered startup, hooks, error aggregation.              | [`Bootstrap`], [`BootstrapBuilder`] |
//! | **Shutdown**    | Trigger detection and bounded teardown callbacks.         | [`Controller`], [`Graceful`], [`Trigger`] |
//! | **Errors**      | Typed errors for orchestration and runner execution.      | [`BootError`], [`RunError`]         |
//!
//! Logging goes through [`tracing`]; the crate emits level-gated info/error
//! events and installs no subscriber of its own.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use bootvisor::{Bootstrap, Graceful, ManualTrigger, RunError, RunnerFn, RunnerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A runner that blocks until it is stopped or the scope is cancelled.
//!     let halt = CancellationToken::new();
//!     let stop_halt = halt.clone();
//!     let worker: RunnerRef = RunnerFn::arc(
//!         "worker",
//!         move |ctx: CancellationToken| {
//!             let halt = halt.clone();
//!             async move {
//!                 tokio::select! {
//!                     _ = ctx.cancelled() => {}
//!                     _ = halt.cancelled() => {}
//!                 }
//!                 Ok::<(), RunError>(())
//!             }
//!         },
//!         move |_ctx: CancellationToken| {
//!             let halt = stop_halt.clone();
//!             async move {
//!                 halt.cancel();
//!                 Ok::<(), RunError>(())
//!             }
//!         },
//!     );
//!
//!     // A manual trigger so this example shuts itself down; production code
//!     // usually keeps the default OS-signal trigger.
//!     let trigger = ManualTrigger::new();
//!     let shutdown = Arc::new(Graceful::builder().trigger(Arc::new(trigger.clone())).build());
//!
//!     let boot = Bootstrap::builder()
//!         .runner(worker)
//!         .on_run(move |_ctx| {
//!             let trigger = trigger.clone();
//!             async move {
//!                 trigger.trigger("example finished");
//!                 Ok::<(), RunError>(())
//!             }
//!         })
//!         .shutdown(Some(shutdown))
//!         .build();
//!
//!     boot.run(CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```

mod boot;
mod error;
mod runners;
mod shutdown;

// ---- Public re-exports ----

pub use boot::{Bootstrap, BootstrapBuilder};
pub use error::{BootError, RunError};
pub use runners::{Runner, RunnerFn, RunnerRef};
pub use shutdown::{
    Callback, CallbackFn, Controller, DelayTrigger, ErrorHandler, ErrorHandlerFn, Graceful,
    GracefulBuilder, LogErrorHandler, ManualTrigger, ShutdownEvent, SignalTrigger, Trigger,
};
