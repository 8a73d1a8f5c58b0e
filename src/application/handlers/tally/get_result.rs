//! GetResultHandler - Query handler for the tally of a closed agenda.

use std::sync::Arc;

use crate::domain::foundation::{AgendaId, VoteChoice};
use crate::domain::voting::{Tally, TallyError};
use crate::ports::{AgendaRepository, VoteRepository};

#[derive(Debug, Clone)]
pub struct GetResultQuery {
    pub agenda_id: AgendaId,
}

/// Handler reporting Yes/No counts. Counts are read from the vote store on
/// every call.
pub struct GetResultHandler {
    agendas: Arc<dyn AgendaRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl GetResultHandler {
    pub fn new(agendas: Arc<dyn AgendaRepository>, votes: Arc<dyn VoteRepository>) -> Self {
        Self { agendas, votes }
    }

    pub async fn handle(&self, query: GetResultQuery) -> Result<Tally, TallyError> {
        let result = self.execute(&query).await;

        if let Err(err) = &result {
            if err.is_infrastructure() {
                tracing::error!(
                    operation = "get_result",
                    agenda_id = %query.agenda_id,
                    error = %err,
                    "Failed to compute tally"
                );
            }
        }
        result
    }

    async fn execute(&self, query: &GetResultQuery) -> Result<Tally, TallyError> {
        let id = &query.agenda_id;
        let agenda = self
            .agendas
            .find_by_id(id)
            .await?
            .ok_or_else(|| TallyError::NotFound(id.clone()))?;
        if !agenda.is_closed() {
            return Err(TallyError::NotClosed(id.clone()));
        }

        let yes = self.votes.count_by_choice(id, VoteChoice::Yes).await?;
        let no = self.votes.count_by_choice(id, VoteChoice::No).await?;

        Ok(Tally::new(id.clone(), yes, no))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAgendaRepository, InMemoryVoteRepository};
    use crate::application::handlers::test_support::{agenda_id, at, FailingVoteRepository};
    use crate::domain::agenda::{Agenda, SessionDuration};
    use crate::domain::voting::{Cpf, Vote};

    async fn agenda_in(repo: &InMemoryAgendaRepository, id: &str, close: bool) {
        let mut agenda = Agenda::new(agenda_id(id));
        repo.insert(&agenda).await.unwrap();
        agenda.open_session(at(0), SessionDuration::ONE_MINUTE).unwrap();
        repo.open_session(&agenda).await.unwrap();
        if close {
            repo.close_if_expired(&agenda_id(id), &at(60)).await.unwrap();
        }
    }

    fn query(id: &str) -> GetResultQuery {
        GetResultQuery {
            agenda_id: agenda_id(id),
        }
    }

    #[tokio::test]
    async fn counts_votes_of_closed_agenda() {
        let agendas = Arc::new(InMemoryAgendaRepository::new());
        let votes = Arc::new(InMemoryVoteRepository::new());
        agenda_in(&agendas, "A1", true).await;
        for (cpf, choice) in [
            ("11144477735", VoteChoice::Yes),
            ("22255588846", VoteChoice::Yes),
            ("52998224725", VoteChoice::No),
        ] {
            votes
                .insert_if_open(&Vote::new(agenda_id("A1"), Cpf::parse(cpf).unwrap(), choice, at(1)))
                .await
                .unwrap();
        }
        let handler = GetResultHandler::new(agendas, votes);

        let tally = handler.handle(query("A1")).await.unwrap();
        assert_eq!(tally, Tally::new(agenda_id("A1"), 2, 1));
    }

    #[tokio::test]
    async fn pending_and_open_agendas_are_not_closed() {
        let agendas = Arc::new(InMemoryAgendaRepository::new());
        agendas.insert(&Agenda::new(agenda_id("P"))).await.unwrap();
        agenda_in(&agendas, "O", false).await;
        let handler = GetResultHandler::new(agendas, Arc::new(InMemoryVoteRepository::new()));

        assert_eq!(
            handler.handle(query("P")).await.unwrap_err(),
            TallyError::NotClosed(agenda_id("P"))
        );
        assert_eq!(
            handler.handle(query("O")).await.unwrap_err(),
            TallyError::NotClosed(agenda_id("O"))
        );
    }

    #[tokio::test]
    async fn unknown_agenda_is_not_found() {
        let handler = GetResultHandler::new(
            Arc::new(InMemoryAgendaRepository::new()),
            Arc::new(InMemoryVoteRepository::new()),
        );
        assert_eq!(
            handler.handle(query("ZZZ")).await.unwrap_err(),
            TallyError::NotFound(agenda_id("ZZZ"))
        );
    }

    #[tokio::test]
    async fn vote_store_failure_is_infrastructure() {
        let agendas = Arc::new(InMemoryAgendaRepository::new());
        agenda_in(&agendas, "A1", true).await;
        let handler = GetResultHandler::new(agendas, Arc::new(FailingVoteRepository));

        assert!(handler.handle(query("A1")).await.unwrap_err().is_infrastructure());
    }
}
