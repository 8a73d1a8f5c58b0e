//! FindOpenAgendaHandler - Query handler for the currently open agenda.

use std::sync::Arc;

use crate::domain::agenda::{Agenda, AgendaError};
use crate::domain::foundation::AgendaStatus;
use crate::ports::AgendaRepository;

/// Handler returning the open agenda, if any.
pub struct FindOpenAgendaHandler {
    repository: Arc<dyn AgendaRepository>,
}

impl FindOpenAgendaHandler {
    pub fn new(repository: Arc<dyn AgendaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Option<Agenda>, AgendaError> {
        self.repository
            .find_by_status(AgendaStatus::Open)
            .await
            .map_err(|e| {
                tracing::error!(operation = "find_open_agenda", error = %e, "Failed to look up open agenda");
                AgendaError::from(e)
            })
    }
}
