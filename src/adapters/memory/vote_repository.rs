//! In-memory vote repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InMemoryAgendaRepository;
use crate::domain::foundation::{AgendaId, DomainError, VoteChoice};
use crate::domain::voting::{Cpf, Vote};
use crate::ports::{VoteInsert, VoteRepository};

/// Vote store keeping ballots in casting order.
///
/// Linked to an agenda store with [`InMemoryVoteRepository::linked`], inserts
/// hold the agenda lock while writing, so a closure cannot slip in between
/// the open-session check and the write. A standalone store skips the check.
#[derive(Default)]
pub struct InMemoryVoteRepository {
    votes: RwLock<Vec<Vote>>,
    agendas: Option<Arc<InMemoryAgendaRepository>>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that only accepts votes on agendas open in `agendas`.
    pub fn linked(agendas: Arc<InMemoryAgendaRepository>) -> Self {
        Self {
            votes: RwLock::default(),
            agendas: Some(agendas),
        }
    }

    /// Total number of votes across all agendas.
    pub async fn len(&self) -> usize {
        self.votes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.votes.read().await.is_empty()
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find(&self, agenda_id: &AgendaId, voter: &Cpf) -> Result<Option<Vote>, DomainError> {
        Ok(self
            .votes
            .read()
            .await
            .iter()
            .find(|v| v.agenda_id() == agenda_id && v.voter() == voter)
            .cloned())
    }

    async fn insert_if_open(&self, vote: &Vote) -> Result<VoteInsert, DomainError> {
        // Lock order: agendas, then votes.
        let agendas = match &self.agendas {
            Some(store) => Some(store.snapshot().await),
            None => None,
        };
        if let Some(agendas) = &agendas {
            let open = agendas
                .get(vote.agenda_id())
                .map(|a| a.is_open() && !a.is_expired_at(vote.cast_at()))
                .unwrap_or(false);
            if !open {
                return Ok(VoteInsert::SessionClosed);
            }
        }

        let mut votes = self.votes.write().await;
        let exists = votes
            .iter()
            .any(|v| v.agenda_id() == vote.agenda_id() && v.voter() == vote.voter());
        if exists {
            return Ok(VoteInsert::AlreadyExists);
        }
        votes.push(vote.clone());
        Ok(VoteInsert::Inserted)
    }

    async fn count_by_choice(
        &self,
        agenda_id: &AgendaId,
        choice: VoteChoice,
    ) -> Result<u64, DomainError> {
        let count = self
            .votes
            .read()
            .await
            .iter()
            .filter(|v| v.agenda_id() == agenda_id && v.choice() == choice)
            .count();
        Ok(count as u64)
    }

    async fn find_by_agenda(&self, agenda_id: &AgendaId) -> Result<Vec<Vote>, DomainError> {
        Ok(self
            .votes
            .read()
            .await
            .iter()
            .filter(|v| v.agenda_id() == agenda_id)
            .cloned()
            .collect())
    }
}
