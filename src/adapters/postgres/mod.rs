//! PostgreSQL adapters - Database implementations for the store ports.
//!
//! - `PostgresAgendaRepository` - Agendas and the single-open-agenda index
//! - `PostgresVoteRepository` - Votes keyed by (agenda, voter)
//!
//! Schema lives in `migrations/` and is applied with [`MIGRATOR`].

mod agenda_repository;
mod vote_repository;

pub use agenda_repository::PostgresAgendaRepository;
pub use vote_repository::PostgresVoteRepository;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
