//! Voting command and query handlers.

mod cast_vote;
mod list_votes;

pub use cast_vote::{CastVoteCommand, CastVoteHandler, CastVoteResult};
pub use list_votes::{ListVotesHandler, ListVotesQuery};
