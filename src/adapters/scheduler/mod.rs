//! Session closure adapters.
//!
//! - `TokioClosureScheduler` - one-shot timers (`ClosureScheduler` port)
//! - `ExpirySweeper` - periodic reconciliation of missed closures

mod expiry_sweeper;
mod tokio_scheduler;

pub use expiry_sweeper::{ExpirySweeper, ExpirySweeperConfig};
pub use tokio_scheduler::TokioClosureScheduler;
