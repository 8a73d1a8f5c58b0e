//! CloseExpiredSessionsHandler - the periodic expiry sweep.
//!
//! Closure timers are lost when the process restarts. The sweep reads every
//! open agenda from the store and closes those whose session end has passed,
//! through the same conditional close the timers use.

use std::sync::Arc;

use crate::domain::agenda::AgendaError;
use crate::domain::foundation::{AgendaId, AgendaStatus};
use crate::ports::{AgendaRepository, Clock};

/// Result of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Agendas this sweep closed.
    pub closed: Vec<AgendaId>,
    /// Agendas whose close attempt failed; retried on the next sweep.
    pub failed: Vec<AgendaId>,
}

/// Handler for the expiry sweep.
pub struct CloseExpiredSessionsHandler {
    repository: Arc<dyn AgendaRepository>,
    clock: Arc<dyn Clock>,
}

impl CloseExpiredSessionsHandler {
    pub fn new(repository: Arc<dyn AgendaRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Run one sweep.
    ///
    /// A failure to list open agendas fails the sweep; a failure to close one
    /// agenda is logged and the sweep moves on.
    pub async fn handle(&self) -> Result<SweepResult, AgendaError> {
        let now = self.clock.now();
        let open = self
            .repository
            .find_all_by_status(AgendaStatus::Open)
            .await
            .map_err(|e| {
                tracing::error!(operation = "close_expired_sessions", error = %e, "Failed to list open agendas");
                AgendaError::from(e)
            })?;

        let mut result = SweepResult::default();
        for agenda in open.into_iter().filter(|a| a.is_expired_at(&now)) {
            let id = agenda.id().clone();
            match self.repository.close_if_expired(&id, &now).await {
                Ok(true) => {
                    tracing::info!(agenda_id = %id, trigger = "sweep", "Voting session closed");
                    result.closed.push(id);
                }
                Ok(false) => {
                    tracing::debug!(agenda_id = %id, "Session closed concurrently");
                }
                Err(e) => {
                    tracing::warn!(agenda_id = %id, error = %e, "Failed to close expired session");
                    result.failed.push(id);
                }
            }
        }

        Ok(result)
    }
}
