//! Test doubles shared by the handler tests.

use async_trait::async_trait;

use crate::domain::agenda::Agenda;
use crate::domain::foundation::{
    AgendaId, AgendaStatus, DomainError, ErrorCode, Timestamp, VoteChoice,
};
use crate::domain::voting::{Cpf, Vote};
use crate::ports::{AgendaRepository, OpenTransition, SaveResult, VoteInsert, VoteRepository};

fn simulated(what: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Simulated {} failure", what),
    )
}

/// Agenda store whose every call fails.
pub struct FailingAgendaRepository;

#[async_trait]
impl AgendaRepository for FailingAgendaRepository {
    async fn insert(&self, _agenda: &Agenda) -> Result<SaveResult, DomainError> {
        Err(simulated("insert"))
    }
    async fn find_by_id(&self, _id: &AgendaId) -> Result<Option<Agenda>, DomainError> {
        Err(simulated("find"))
    }
    async fn find_by_status(&self, _status: AgendaStatus) -> Result<Option<Agenda>, DomainError> {
        Err(simulated("find"))
    }
    async fn find_all_by_status(
        &self,
        _status: AgendaStatus,
    ) -> Result<Vec<Agenda>, DomainError> {
        Err(simulated("list"))
    }
    async fn find_all(&self) -> Result<Vec<Agenda>, DomainError> {
        Err(simulated("list"))
    }
    async fn open_session(&self, _agenda: &Agenda) -> Result<OpenTransition, DomainError> {
        Err(simulated("update"))
    }
    async fn close_if_expired(&self, _id: &AgendaId, _now: &Timestamp) -> Result<bool, DomainError> {
        Err(simulated("update"))
    }
}

/// Vote store whose every call fails.
pub struct FailingVoteRepository;

#[async_trait]
impl VoteRepository for FailingVoteRepository {
    async fn find(&self, _agenda_id: &AgendaId, _voter: &Cpf) -> Result<Option<Vote>, DomainError> {
        Err(simulated("find"))
    }
    async fn insert_if_open(&self, _vote: &Vote) -> Result<VoteInsert, DomainError> {
        Err(simulated("insert"))
    }
    async fn count_by_choice(
        &self,
        _agenda_id: &AgendaId,
        _choice: VoteChoice,
    ) -> Result<u64, DomainError> {
        Err(simulated("count"))
    }
    async fn find_by_agenda(&self, _agenda_id: &AgendaId) -> Result<Vec<Vote>, DomainError> {
        Err(simulated("list"))
    }
}

pub fn agenda_id(id: &str) -> AgendaId {
    AgendaId::new(id).unwrap()
}

pub fn at(secs: i64) -> Timestamp {
    Timestamp::from_unix_secs(secs).unwrap()
}
