//! Vote repository port.
//!
//! Votes are keyed by `(agenda_id, voter)`. Implementations must enforce
//! that key at the store level so that concurrent inserts for the same pair
//! leave exactly one vote, and must check that the session is still open in
//! the same atomic step as the write.

use async_trait::async_trait;

use crate::domain::foundation::{AgendaId, DomainError, VoteChoice};
use crate::domain::voting::{Cpf, Vote};

/// Outcome of [`VoteRepository::insert_if_open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteInsert {
    Inserted,
    /// The voter already voted on this agenda.
    AlreadyExists,
    /// The agenda is not open, or its deadline is at or before the vote's
    /// cast time.
    SessionClosed,
}

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Find the vote of `voter` on `agenda_id`.
    async fn find(&self, agenda_id: &AgendaId, voter: &Cpf) -> Result<Option<Vote>, DomainError>;

    /// Insert a vote unless the voter already voted on the agenda or its
    /// session has ended by `vote.cast_at()`.
    ///
    /// A closure racing with this call either waits for it or makes it
    /// report `SessionClosed`; a vote never lands on a closed agenda.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert_if_open(&self, vote: &Vote) -> Result<VoteInsert, DomainError>;

    /// Number of votes with `choice` on `agenda_id`.
    async fn count_by_choice(
        &self,
        agenda_id: &AgendaId,
        choice: VoteChoice,
    ) -> Result<u64, DomainError>;

    /// Every vote on `agenda_id`, in casting order.
    async fn find_by_agenda(&self, agenda_id: &AgendaId) -> Result<Vec<Vote>, DomainError>;
}
