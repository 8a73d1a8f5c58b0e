//! CastVoteHandler - Command handler for casting a vote on the open agenda.

use std::sync::Arc;

use crate::domain::foundation::{AgendaStatus, CommandMetadata, VoteChoice};
use crate::domain::voting::{Cpf, Vote, VotingError};
use crate::ports::{
    AgendaRepository, Clock, IdentityValidator, VoteInsert, VoteRepository, VoterEligibility,
};

/// Command to cast a vote.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    /// Raw voter id as received; must be a CPF.
    pub voter_id: String,
    pub choice: VoteChoice,
}

/// Result of a recorded vote.
#[derive(Debug, Clone)]
pub struct CastVoteResult {
    pub vote: Vote,
}

/// Handler for casting votes.
///
/// Steps, each failing fast:
///
/// 1. voter id is a well-formed CPF and the identity service accepts it
/// 2. some agenda is open
/// 3. the voter has not voted on it yet
/// 4. the agenda is still open (re-read)
/// 5. insert guarded by the session state in one store operation; a lost
///    race against the same voter is a duplicate, a lost race against the
///    closure is a closed session
///
/// Nothing is written before step 5.
pub struct CastVoteHandler {
    agendas: Arc<dyn AgendaRepository>,
    votes: Arc<dyn VoteRepository>,
    identity: Arc<dyn IdentityValidator>,
    clock: Arc<dyn Clock>,
}

impl CastVoteHandler {
    pub fn new(
        agendas: Arc<dyn AgendaRepository>,
        votes: Arc<dyn VoteRepository>,
        identity: Arc<dyn IdentityValidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            agendas,
            votes,
            identity,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CastVoteCommand,
        metadata: CommandMetadata,
    ) -> Result<CastVoteResult, VotingError> {
        let result = self.execute(&cmd).await;

        if let Err(err) = &result {
            if err.is_infrastructure() {
                tracing::error!(
                    operation = "cast_vote",
                    voter = %mask(&cmd.voter_id),
                    choice = %cmd.choice,
                    correlation_id = %metadata.correlation_id(),
                    error = %err,
                    "Failed to cast vote"
                );
            }
        }
        result
    }

    async fn execute(&self, cmd: &CastVoteCommand) -> Result<CastVoteResult, VotingError> {
        // 1. Voter
        let voter = Cpf::parse(&cmd.voter_id)
            .map_err(|e| VotingError::invalid_voter(e.to_string()))?;
        match self.identity.check(&voter).await? {
            VoterEligibility::Eligible => {}
            VoterEligibility::Ineligible => return Err(VotingError::IneligibleVoter),
            VoterEligibility::Unknown => {
                return Err(VotingError::invalid_voter(
                    "not recognised by the identity service",
                ))
            }
        }

        // 2. Open agenda
        let open = self
            .agendas
            .find_by_status(AgendaStatus::Open)
            .await?
            .ok_or(VotingError::NoOpenSession)?;
        let agenda_id = open.id().clone();

        // 3. One vote per voter
        if self.votes.find(&agenda_id, &voter).await?.is_some() {
            return Err(VotingError::DuplicateVoter(agenda_id));
        }

        // 4. Still open
        let now = self.clock.now();
        let still_open = self
            .agendas
            .find_by_id(&agenda_id)
            .await?
            .map(|a| a.is_open() && !a.is_expired_at(&now))
            .unwrap_or(false);
        if !still_open {
            return Err(VotingError::SessionClosed(agenda_id));
        }

        // 5. Record
        let vote = Vote::new(agenda_id.clone(), voter, cmd.choice, now);
        match self.votes.insert_if_open(&vote).await? {
            VoteInsert::Inserted => {
                tracing::info!(
                    agenda_id = %agenda_id,
                    voter = %vote.voter().masked(),
                    choice = %vote.choice(),
                    "Vote recorded"
                );
                Ok(CastVoteResult { vote })
            }
            VoteInsert::AlreadyExists => Err(VotingError::DuplicateVoter(agenda_id)),
            VoteInsert::SessionClosed => Err(VotingError::SessionClosed(agenda_id)),
        }
    }
}

/// Masks a raw voter id for logging, keeping only the last two characters.
fn mask(raw: &str) -> String {
    let chars: Vec<char> = raw.trim().chars().collect();
    let keep = chars.len().min(2);
    let hidden = chars.len() - keep;
    "*".repeat(hidden) + &chars[hidden..].iter().collect::<String>()
}
