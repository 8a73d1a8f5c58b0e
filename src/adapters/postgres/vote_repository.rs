//! PostgreSQL implementation of VoteRepository.
//!
//! The primary key `(agenda_id, voter_id)` is the one-vote-per-voter rule;
//! inserts use `ON CONFLICT DO NOTHING` and report the conflict. The insert
//! selects from the agenda row it locks, so the open-session check and the
//! write are one statement.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AgendaId, DomainError, ErrorCode, Timestamp, VoteChoice};
use crate::domain::voting::{Cpf, Vote};
use crate::ports::{VoteInsert, VoteRepository};

/// PostgreSQL implementation of VoteRepository.
#[derive(Clone)]
pub struct PostgresVoteRepository {
    pool: PgPool,
}

impl PostgresVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn find(&self, agenda_id: &AgendaId, voter: &Cpf) -> Result<Option<Vote>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT agenda_id, voter_id, choice, cast_at
            FROM votes
            WHERE agenda_id = $1 AND voter_id = $2
            "#,
        )
        .bind(agenda_id.as_str())
        .bind(voter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch vote: {}", e),
            )
        })?;

        row.map(row_to_vote).transpose()
    }

    async fn insert_if_open(&self, vote: &Vote) -> Result<VoteInsert, DomainError> {
        // FOR SHARE makes a concurrent closing UPDATE wait for this statement.
        let (open, inserted): (i64, i64) = sqlx::query_as(
            r#"
            WITH open_agenda AS (
                SELECT id FROM agendas
                WHERE id = $1 AND status = 'open' AND session_end > $4
                FOR SHARE
            ),
            inserted AS (
                INSERT INTO votes (agenda_id, voter_id, choice, cast_at)
                SELECT $1, $2, $3, $4 FROM open_agenda
                ON CONFLICT (agenda_id, voter_id) DO NOTHING
                RETURNING 1
            )
            SELECT
                (SELECT COUNT(*) FROM open_agenda),
                (SELECT COUNT(*) FROM inserted)
            "#,
        )
        .bind(vote.agenda_id().as_str())
        .bind(vote.voter().as_str())
        .bind(vote.choice().as_str())
        .bind(vote.cast_at().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert vote: {}", e),
            )
        })?;

        Ok(match (open, inserted) {
            (0, _) => VoteInsert::SessionClosed,
            (_, 0) => VoteInsert::AlreadyExists,
            _ => VoteInsert::Inserted,
        })
    }

    async fn count_by_choice(
        &self,
        agenda_id: &AgendaId,
        choice: VoteChoice,
    ) -> Result<u64, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM votes WHERE agenda_id = $1 AND choice = $2")
                .bind(agenda_id.as_str())
                .bind(choice.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to count votes: {}", e),
                    )
                })?;

        Ok(result.0 as u64)
    }

    async fn find_by_agenda(&self, agenda_id: &AgendaId) -> Result<Vec<Vote>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT agenda_id, voter_id, choice, cast_at
            FROM votes
            WHERE agenda_id = $1
            ORDER BY cast_at, voter_id
            "#,
        )
        .bind(agenda_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list votes: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_vote).collect()
    }
}

fn row_to_vote(row: sqlx::postgres::PgRow) -> Result<Vote, DomainError> {
    let column = |name: &str, e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    };

    let agenda_id: String = row.try_get("agenda_id").map_err(|e| column("agenda_id", e))?;
    let voter_id: String = row.try_get("voter_id").map_err(|e| column("voter_id", e))?;
    let choice: String = row.try_get("choice").map_err(|e| column("choice", e))?;
    let cast_at: chrono::DateTime<chrono::Utc> =
        row.try_get("cast_at").map_err(|e| column("cast_at", e))?;

    let corrupt = |what: &str, e: &dyn std::fmt::Display| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} in votes row: {}", what, e),
        )
    };

    Ok(Vote::new(
        AgendaId::new(agenda_id).map_err(|e| corrupt("agenda id", &e))?,
        Cpf::parse(&voter_id).map_err(|e| corrupt("voter id", &e))?,
        choice.parse().map_err(|e| corrupt("choice", &e))?,
        Timestamp::from_datetime(cast_at),
    ))
}
