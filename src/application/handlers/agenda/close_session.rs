//! CloseSessionHandler - idempotent closure of one agenda's session.
//!
//! Target of the one-shot closure timers. Closing only happens once the
//! session end has been reached; an agenda that is already closed (for
//! instance by the expiry sweep) is a no-op.

use std::sync::Arc;

use crate::domain::agenda::AgendaError;
use crate::domain::foundation::{AgendaId, Timestamp};
use crate::ports::{AgendaRepository, Clock};

/// What a close attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// This call closed the session.
    Closed,
    /// The session is open and ends at `deadline`, which is still ahead.
    NotDue { deadline: Timestamp },
    /// Nothing to close: the agenda is unknown, pending or already closed.
    NotOpen,
}

/// Handler closing a single expired session.
pub struct CloseSessionHandler {
    repository: Arc<dyn AgendaRepository>,
    clock: Arc<dyn Clock>,
}

impl CloseSessionHandler {
    pub fn new(repository: Arc<dyn AgendaRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, agenda_id: &AgendaId) -> Result<CloseOutcome, AgendaError> {
        let result = self.execute(agenda_id).await;

        if let Err(err) = &result {
            tracing::error!(
                operation = "close_session",
                agenda_id = %agenda_id,
                error = %err,
                "Failed to close voting session"
            );
        }
        result
    }

    async fn execute(&self, agenda_id: &AgendaId) -> Result<CloseOutcome, AgendaError> {
        let now = self.clock.now();

        if self.repository.close_if_expired(agenda_id, &now).await? {
            tracing::info!(agenda_id = %agenda_id, trigger = "timer", "Voting session closed");
            return Ok(CloseOutcome::Closed);
        }

        let agenda = self.repository.find_by_id(agenda_id).await?;
        match agenda {
            Some(agenda) if agenda.is_open() => match agenda.session_end() {
                Some(end) => Ok(CloseOutcome::NotDue { deadline: *end }),
                None => Ok(CloseOutcome::NotOpen),
            },
            _ => {
                tracing::debug!(agenda_id = %agenda_id, "Session already closed, nothing to do");
                Ok(CloseOutcome::NotOpen)
            }
        }
    }
}
