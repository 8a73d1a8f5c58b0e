//! Agenda repository port.
//!
//! Persistence contract for agenda aggregates. The store, not the
//! application, is the authority for the two cross-request rules:
//!
//! - agenda ids are unique (`insert` is insert-if-absent)
//! - at most one agenda is `Open` (`open_session` is a conditional write)

use async_trait::async_trait;

use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaId, AgendaStatus, DomainError, Timestamp};

/// Result of an insert-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// The record was written.
    Inserted,
    /// A record with the same key already exists; nothing was written.
    AlreadyExists,
}

/// Result of the atomic `Pending -> Open` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTransition {
    /// The agenda is now the open one.
    Opened,
    /// Another agenda holds the open slot; nothing was written.
    AnotherOpen,
    /// The stored agenda is missing or no longer pending; nothing was written.
    NotPending,
}

/// Repository port for agenda persistence.
#[async_trait]
pub trait AgendaRepository: Send + Sync {
    /// Insert a new agenda unless one with the same id exists.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, agenda: &Agenda) -> Result<SaveResult, DomainError>;

    /// Find an agenda by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &AgendaId) -> Result<Option<Agenda>, DomainError>;

    /// Find one agenda in `status`.
    ///
    /// Used with `AgendaStatus::Open`, for which there is at most one row.
    async fn find_by_status(&self, status: AgendaStatus) -> Result<Option<Agenda>, DomainError>;

    /// All agendas in `status`, ordered by id.
    async fn find_all_by_status(&self, status: AgendaStatus) -> Result<Vec<Agenda>, DomainError>;

    /// All agendas, ordered by id.
    async fn find_all(&self) -> Result<Vec<Agenda>, DomainError>;

    /// Persist an agenda that was just opened in memory.
    ///
    /// Writes status and session window only if the stored agenda is still
    /// `Pending` and no other agenda is `Open`, as one atomic step.
    async fn open_session(&self, agenda: &Agenda) -> Result<OpenTransition, DomainError>;

    /// Close the agenda if it is `Open` and its session end is at or before `now`.
    ///
    /// Returns `true` if this call performed the transition. Closing an agenda
    /// that is already closed, still pending or not yet due returns `false`.
    async fn close_if_expired(&self, id: &AgendaId, now: &Timestamp) -> Result<bool, DomainError>;
}
