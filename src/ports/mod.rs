//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `AgendaRepository` - Agenda persistence, single-open-agenda enforcement
//! - `VoteRepository` - One vote per (agenda, voter), tallies by choice
//!
//! ## Boundary Ports
//!
//! - `IdentityValidator` - External voter eligibility lookup
//! - `ClosureScheduler` - One-shot session closure timers
//! - `Clock` - Current time

mod agenda_repository;
mod clock;
mod closure_scheduler;
mod identity_validator;
mod vote_repository;

pub use agenda_repository::{AgendaRepository, OpenTransition, SaveResult};
pub use clock::{Clock, SystemClock};
pub use closure_scheduler::ClosureScheduler;
pub use identity_validator::{IdentityValidator, VoterEligibility};
pub use vote_repository::{VoteInsert, VoteRepository};
