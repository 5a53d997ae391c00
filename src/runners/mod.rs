//! # Runner abstractions.
//!
//! This module provides the core runner-related types:
//! - [`Runner`] - trait for long-lived, stoppable units of work
//! - [`RunnerFn`] - closure-backed runner implementation
//! - [`RunnerRef`] - shared reference to a runner (`Arc<dyn Runner>`)

mod func;
mod runner;

pub use func::RunnerFn;
pub use runner::{Runner, RunnerRef};
