//! In-memory adapters.
//!
//! Process-local implementations of the store ports plus a settable clock and
//! a recording scheduler. Used by the test suites and for running the service
//! without a database.

mod agenda_repository;
mod clock;
mod closure_scheduler;
mod vote_repository;

pub use agenda_repository::InMemoryAgendaRepository;
pub use clock::ManualClock;
pub use closure_scheduler::RecordingClosureScheduler;
pub use vote_repository::InMemoryVoteRepository;
