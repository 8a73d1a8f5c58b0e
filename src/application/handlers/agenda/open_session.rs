//! OpenSessionHandler - Command handler for opening an agenda's voting session.

use std::sync::Arc;

use crate::domain::agenda::{Agenda, AgendaError, SessionDuration};
use crate::domain::foundation::{AgendaId, AgendaStatus, CommandMetadata, ErrorCode};
use crate::ports::{AgendaRepository, Clock, ClosureScheduler, OpenTransition};

/// Command to open the voting session of an agenda.
#[derive(Debug, Clone)]
pub struct OpenSessionCommand {
    pub agenda_id: String,
    /// Session length; the configured default applies when absent.
    pub duration_minutes: Option<u32>,
}

/// Result of a successfully opened session.
#[derive(Debug, Clone)]
pub struct OpenSessionResult {
    pub agenda: Agenda,
}

/// Handler for opening voting sessions.
///
/// Checks are ordered: unknown agenda, any open agenda, closed target. The
/// final write is the store's atomic conditional transition, so of several
/// concurrent opens at most one succeeds.
pub struct OpenSessionHandler {
    repository: Arc<dyn AgendaRepository>,
    scheduler: Arc<dyn ClosureScheduler>,
    clock: Arc<dyn Clock>,
    default_duration: SessionDuration,
}

impl OpenSessionHandler {
    pub fn new(
        repository: Arc<dyn AgendaRepository>,
        scheduler: Arc<dyn ClosureScheduler>,
        clock: Arc<dyn Clock>,
        default_duration: SessionDuration,
    ) -> Self {
        Self {
            repository,
            scheduler,
            clock,
            default_duration,
        }
    }

    pub async fn handle(
        &self,
        cmd: OpenSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<OpenSessionResult, AgendaError> {
        let result = self.execute(&cmd).await;

        if let Err(err) = &result {
            if err.is_infrastructure() {
                tracing::error!(
                    operation = "open_session",
                    agenda_id = %cmd.agenda_id,
                    correlation_id = %metadata.correlation_id(),
                    error = %err,
                    "Failed to open voting session"
                );
            }
        }
        result
    }

    async fn execute(&self, cmd: &OpenSessionCommand) -> Result<OpenSessionResult, AgendaError> {
        let id = AgendaId::new(cmd.agenda_id.as_str())
            .map_err(|e| AgendaError::validation(e.field(), e.to_string()))?;
        let duration = match cmd.duration_minutes {
            Some(minutes) => SessionDuration::from_minutes(minutes)
                .map_err(|e| AgendaError::validation(e.field(), e.to_string()))?,
            None => self.default_duration,
        };

        let mut agenda = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AgendaError::not_found(id.clone()))?;

        if self
            .repository
            .find_by_status(AgendaStatus::Open)
            .await?
            .is_some()
        {
            return Err(AgendaError::AlreadyOpen);
        }
        if agenda.is_closed() {
            return Err(AgendaError::closed(id));
        }

        agenda
            .open_session(self.clock.now(), duration)
            .map_err(|e| match e.code {
                ErrorCode::AgendaClosed => AgendaError::closed(id.clone()),
                _ => AgendaError::from(e),
            })?;

        match self.repository.open_session(&agenda).await? {
            OpenTransition::Opened => {}
            OpenTransition::AnotherOpen => return Err(AgendaError::AlreadyOpen),
            OpenTransition::NotPending => return Err(self.lost_race(id).await?),
        }

        if let Some(end) = agenda.session_end() {
            self.scheduler.schedule_closure(id.clone(), *end);
        }

        tracing::info!(
            agenda_id = %id,
            duration_minutes = duration.minutes(),
            session_end = ?agenda.session_end(),
            "Voting session opened"
        );

        Ok(OpenSessionResult { agenda })
    }

    /// Explains why the conditional transition found the agenda no longer pending.
    async fn lost_race(&self, id: AgendaId) -> Result<AgendaError, AgendaError> {
        let current = self.repository.find_by_id(&id).await?;
        Ok(match current.map(|a| a.status()) {
            None => AgendaError::not_found(id),
            Some(AgendaStatus::Closed) => AgendaError::closed(id),
            Some(_) => AgendaError::AlreadyOpen,
        })
    }
}
