//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, enums, errors)
//! - `agenda` - Agenda aggregate and the voting session lifecycle
//! - `voting` - Voter identifiers, ballots and tallies

pub mod agenda;
pub mod foundation;
pub mod voting;
