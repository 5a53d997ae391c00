//! # Shutdown coordination.
//!
//! This module provides the capability the bootstrap consumes to learn about
//! process shutdown, plus a default implementation:
//! - [`Controller`] - trait for shutdown controllers (wait + callback registry)
//! - [`ShutdownEvent`] - the textual reason delivered to callbacks
//! - [`Callback`] / [`CallbackFn`] - teardown callbacks invoked during shutdown
//! - [`Graceful`] - default controller: trigger-driven, bounded callbacks
//! - [`Trigger`] implementations: [`SignalTrigger`], [`ManualTrigger`],
//!   [`DelayTrigger`]
//! - [`ErrorHandler`] - sink for callback failures ([`LogErrorHandler`] default)

mod callback;
mod controller;
mod graceful;
mod trigger;

pub use callback::{Callback, CallbackFn};
pub use controller::{Controller, ShutdownEvent};
pub use graceful::{ErrorHandler, ErrorHandlerFn, Graceful, GracefulBuilder, LogErrorHandler};
pub use trigger::{DelayTrigger, ManualTrigger, SignalTrigger, Trigger};
