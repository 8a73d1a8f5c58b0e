//! In-memory agenda repository.
//!
//! Every conditional write runs under a single write lock, which gives the
//! same atomicity the PostgreSQL adapter gets from its constraints.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaId, AgendaStatus, DomainError, Timestamp};
use crate::ports::{AgendaRepository, OpenTransition, SaveResult};

/// Agenda store backed by an ordered map; iteration is by ascending id.
#[derive(Default)]
pub struct InMemoryAgendaRepository {
    agendas: RwLock<BTreeMap<AgendaId, Agenda>>,
}

impl InMemoryAgendaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored agendas.
    pub async fn len(&self) -> usize {
        self.agendas.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.agendas.read().await.is_empty()
    }

    /// Shared view of the map; closures wait while it is held.
    pub(super) async fn snapshot(&self) -> RwLockReadGuard<'_, BTreeMap<AgendaId, Agenda>> {
        self.agendas.read().await
    }
}

#[async_trait]
impl AgendaRepository for InMemoryAgendaRepository {
    async fn insert(&self, agenda: &Agenda) -> Result<SaveResult, DomainError> {
        let mut agendas = self.agendas.write().await;
        if agendas.contains_key(agenda.id()) {
            return Ok(SaveResult::AlreadyExists);
        }
        agendas.insert(agenda.id().clone(), agenda.clone());
        Ok(SaveResult::Inserted)
    }

    async fn find_by_id(&self, id: &AgendaId) -> Result<Option<Agenda>, DomainError> {
        Ok(self.agendas.read().await.get(id).cloned())
    }

    async fn find_by_status(&self, status: AgendaStatus) -> Result<Option<Agenda>, DomainError> {
        Ok(self
            .agendas
            .read()
            .await
            .values()
            .find(|a| a.status() == status)
            .cloned())
    }

    async fn find_all_by_status(&self, status: AgendaStatus) -> Result<Vec<Agenda>, DomainError> {
        Ok(self
            .agendas
            .read()
            .await
            .values()
            .filter(|a| a.status() == status)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Agenda>, DomainError> {
        Ok(self.agendas.read().await.values().cloned().collect())
    }

    async fn open_session(&self, agenda: &Agenda) -> Result<OpenTransition, DomainError> {
        let mut agendas = self.agendas.write().await;

        match agendas.get(agenda.id()) {
            Some(stored) if stored.status() == AgendaStatus::Pending => {}
            _ => return Ok(OpenTransition::NotPending),
        }
        if agendas.values().any(Agenda::is_open) {
            return Ok(OpenTransition::AnotherOpen);
        }

        agendas.insert(agenda.id().clone(), agenda.clone());
        Ok(OpenTransition::Opened)
    }

    async fn close_if_expired(&self, id: &AgendaId, now: &Timestamp) -> Result<bool, DomainError> {
        let mut agendas = self.agendas.write().await;
        match agendas.get_mut(id) {
            Some(agenda) if agenda.is_expired_at(now) => {
                agenda.close()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
