//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod agenda;
pub mod tally;
pub mod voting;

#[cfg(test)]
pub(crate) mod test_support;

pub use agenda::{
    CloseExpiredSessionsHandler, CloseOutcome, CloseSessionHandler, CreateAgendaCommand,
    CreateAgendaHandler, CreateAgendaResult, FindOpenAgendaHandler, ListAgendasHandler,
    ListAgendasQuery, OpenSessionCommand, OpenSessionHandler, OpenSessionResult, SweepResult,
};
pub use tally::{GetResultHandler, GetResultQuery};
pub use voting::{CastVoteCommand, CastVoteHandler, CastVoteResult, ListVotesHandler, ListVotesQuery};
