//! HTTP adapter for agendas, votes and tallies.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::VotingHandlers;
pub use routes::voting_routes;
