//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the voting domain.

mod agenda_status;
mod command;
mod errors;
mod ids;
mod state_machine;
mod timestamp;
mod vote_choice;

pub use agenda_status::AgendaStatus;
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AgendaId;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use vote_choice::VoteChoice;
