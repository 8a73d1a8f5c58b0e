//! CreateAgendaHandler - Command handler for registering agendas.

use std::sync::Arc;

use crate::domain::agenda::{Agenda, AgendaError};
use crate::domain::foundation::{AgendaId, CommandMetadata};
use crate::ports::{AgendaRepository, SaveResult};

/// Command to register a new agenda.
#[derive(Debug, Clone)]
pub struct CreateAgendaCommand {
    pub agenda_id: String,
}

/// Result of successful agenda creation.
#[derive(Debug, Clone)]
pub struct CreateAgendaResult {
    pub agenda: Agenda,
}

/// Handler for creating agendas.
pub struct CreateAgendaHandler {
    repository: Arc<dyn AgendaRepository>,
}

impl CreateAgendaHandler {
    pub fn new(repository: Arc<dyn AgendaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateAgendaCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateAgendaResult, AgendaError> {
        let result = self.execute(&cmd).await;

        if let Err(err) = &result {
            if err.is_infrastructure() {
                tracing::error!(
                    operation = "create_agenda",
                    agenda_id = %cmd.agenda_id,
                    correlation_id = %metadata.correlation_id(),
                    error = %err,
                    "Failed to create agenda"
                );
            }
        }
        result
    }

    async fn execute(&self, cmd: &CreateAgendaCommand) -> Result<CreateAgendaResult, AgendaError> {
        let id = AgendaId::new(cmd.agenda_id.as_str())
            .map_err(|e| AgendaError::validation(e.field(), e.to_string()))?;
        let agenda = Agenda::new(id.clone());

        match self.repository.insert(&agenda).await? {
            SaveResult::Inserted => {
                tracing::info!(agenda_id = %id, "Agenda created");
                Ok(CreateAgendaResult { agenda })
            }
            SaveResult::AlreadyExists => Err(AgendaError::already_exists(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAgendaRepository;
    use crate::application::handlers::test_support::FailingAgendaRepository;
    use crate::domain::foundation::AgendaStatus;

    fn command(id: &str) -> CreateAgendaCommand {
        CreateAgendaCommand {
            agenda_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_pending_agenda() {
        let repo = Arc::new(InMemoryAgendaRepository::new());
        let handler = CreateAgendaHandler::new(repo.clone());

        let result = handler
            .handle(command("A1"), CommandMetadata::new())
            .await
            .unwrap();

        assert_eq!(result.agenda.status(), AgendaStatus::Pending);
        let stored = repo
            .find_by_id(&AgendaId::new("A1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, result.agenda);
    }

    #[tokio::test]
    async fn duplicate_id_is_already_exists() {
        let handler = CreateAgendaHandler::new(Arc::new(InMemoryAgendaRepository::new()));
        handler
            .handle(command("A1"), CommandMetadata::new())
            .await
            .unwrap();

        let err = handler
            .handle(command("A1"), CommandMetadata::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AgendaError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn blank_id_is_validation_failure() {
        let handler = CreateAgendaHandler::new(Arc::new(InMemoryAgendaRepository::new()));
        let err = handler
            .handle(command("   "), CommandMetadata::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AgendaError::ValidationFailed { ref field, .. } if field == "idPauta"));
    }

    #[tokio::test]
    async fn store_failure_is_infrastructure() {
        let handler = CreateAgendaHandler::new(Arc::new(FailingAgendaRepository));
        let err = handler
            .handle(command("A1"), CommandMetadata::new())
            .await
            .unwrap_err();
        assert!(err.is_infrastructure());
    }
}
