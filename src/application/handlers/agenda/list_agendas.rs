//! ListAgendasHandler - Query handler for listing agendas.

use std::sync::Arc;

use crate::domain::agenda::{Agenda, AgendaError};
use crate::domain::foundation::AgendaStatus;
use crate::ports::AgendaRepository;

/// Query for agendas, optionally restricted to one status.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListAgendasQuery {
    pub status: Option<AgendaStatus>,
}

impl ListAgendasQuery {
    pub fn all() -> Self {
        Self { status: None }
    }

    pub fn pending() -> Self {
        Self {
            status: Some(AgendaStatus::Pending),
        }
    }

    pub fn closed() -> Self {
        Self {
            status: Some(AgendaStatus::Closed),
        }
    }
}

/// Handler for listing agendas, ordered by id.
pub struct ListAgendasHandler {
    repository: Arc<dyn AgendaRepository>,
}

impl ListAgendasHandler {
    pub fn new(repository: Arc<dyn AgendaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListAgendasQuery) -> Result<Vec<Agenda>, AgendaError> {
        let agendas = match query.status {
            Some(status) => self.repository.find_all_by_status(status).await,
            None => self.repository.find_all().await,
        };

        agendas.map_err(|e| {
            tracing::error!(operation = "list_agendas", status = ?query.status, error = %e, "Failed to list agendas");
            AgendaError::from(e)
        })
    }
}
