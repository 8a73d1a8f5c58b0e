//! Voting domain module.
//!
//! Voter identifiers (CPF), ballots and tallies.

mod cpf;
mod errors;
mod tally;
mod vote;

pub use cpf::{Cpf, CPF_LENGTH};
pub use errors::{TallyError, VotingError};
pub use tally::Tally;
pub use vote::Vote;
