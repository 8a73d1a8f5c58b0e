//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (create, open, close, cast) write through the store
//! ports; query handlers (find, list, result) only read.

pub mod handlers;

pub use handlers::{
    // Agenda lifecycle
    CloseExpiredSessionsHandler, CloseOutcome, CloseSessionHandler, CreateAgendaCommand,
    CreateAgendaHandler, CreateAgendaResult, FindOpenAgendaHandler, ListAgendasHandler,
    ListAgendasQuery, OpenSessionCommand, OpenSessionHandler, OpenSessionResult, SweepResult,
    // Voting
    CastVoteCommand, CastVoteHandler, CastVoteResult, ListVotesHandler, ListVotesQuery,
    // Tally
    GetResultHandler, GetResultQuery,
};
