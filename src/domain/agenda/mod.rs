//! Agenda domain module.
//!
//! Agenda items ("pautas") and the lifecycle of their voting session:
//! `Pending -> Open -> Closed`.

mod aggregate;
mod errors;

pub use aggregate::{Agenda, SessionDuration};
pub use errors::AgendaError;
