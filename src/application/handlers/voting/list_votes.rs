//! ListVotesHandler - Query handler for the votes cast on an agenda.

use std::sync::Arc;

use crate::domain::foundation::AgendaId;
use crate::domain::voting::{Vote, VotingError};
use crate::ports::{AgendaRepository, VoteRepository};

#[derive(Debug, Clone)]
pub struct ListVotesQuery {
    pub agenda_id: AgendaId,
}

/// Handler listing the votes of one agenda in casting order.
pub struct ListVotesHandler {
    agendas: Arc<dyn AgendaRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl ListVotesHandler {
    pub fn new(agendas: Arc<dyn AgendaRepository>, votes: Arc<dyn VoteRepository>) -> Self {
        Self { agendas, votes }
    }

    pub async fn handle(&self, query: ListVotesQuery) -> Result<Vec<Vote>, VotingError> {
        let result = self.execute(&query).await;

        if let Err(err) = &result {
            if err.is_infrastructure() {
                tracing::error!(
                    operation = "list_votes",
                    agenda_id = %query.agenda_id,
                    error = %err,
                    "Failed to list votes"
                );
            }
        }
        result
    }

    async fn execute(&self, query: &ListVotesQuery) -> Result<Vec<Vote>, VotingError> {
        if self.agendas.find_by_id(&query.agenda_id).await?.is_none() {
            return Err(VotingError::AgendaNotFound(query.agenda_id.clone()));
        }
        Ok(self.votes.find_by_agenda(&query.agenda_id).await?)
    }
}
