//! Orchestration core: startup sequencing and result aggregation.
//!
//! The only public API from this module is [`Bootstrap`] and its
//! [`BootstrapBuilder`]:
//! - [`bootstrap`]: drives the whole lifecycle of one process run;
//! - [`builder`]: assembles a bootstrap, installing the default graceful
//!   shutdown controller when none was supplied.

mod bootstrap;
mod builder;

pub use bootstrap::Bootstrap;
pub use builder::BootstrapBuilder;
