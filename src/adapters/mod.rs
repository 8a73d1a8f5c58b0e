//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL agenda and vote stores
//! - `memory` - In-memory stores, settable clock, recording scheduler
//! - `identity` - Voter eligibility lookups (HTTP, static table)
//! - `scheduler` - Closure timers and the expiry sweeper
//! - `http` - axum REST API

pub mod http;
pub mod identity;
pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use identity::{HttpIdentityValidator, HttpIdentityValidatorConfig, StaticIdentityValidator};
pub use memory::{
    InMemoryAgendaRepository, InMemoryVoteRepository, ManualClock, RecordingClosureScheduler,
};
pub use postgres::{PostgresAgendaRepository, PostgresVoteRepository};
pub use scheduler::{ExpirySweeper, ExpirySweeperConfig, TokioClosureScheduler};
