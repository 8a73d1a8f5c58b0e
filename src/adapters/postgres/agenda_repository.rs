//! PostgreSQL implementation of AgendaRepository.
//!
//! The single-open-agenda rule is the partial unique index
//! `agendas_single_open`; opening is a conditional `UPDATE` whose unique
//! violation means another agenda won the slot.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaId, AgendaStatus, DomainError, ErrorCode, Timestamp};
use crate::ports::{AgendaRepository, OpenTransition, SaveResult};

/// PostgreSQL implementation of AgendaRepository.
#[derive(Clone)]
pub struct PostgresAgendaRepository {
    pool: PgPool,
}

impl PostgresAgendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgendaRepository for PostgresAgendaRepository {
    async fn insert(&self, agenda: &Agenda) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO agendas (id, status, session_start, session_end)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(agenda.id().as_str())
        .bind(agenda.status().as_str())
        .bind(agenda.session_start().map(|t| *t.as_datetime()))
        .bind(agenda.session_end().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert agenda: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            Ok(SaveResult::AlreadyExists)
        } else {
            Ok(SaveResult::Inserted)
        }
    }

    async fn find_by_id(&self, id: &AgendaId) -> Result<Option<Agenda>, DomainError> {
        let row = sqlx::query(
            "SELECT id, status, session_start, session_end FROM agendas WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch agenda: {}", e),
            )
        })?;

        row.map(row_to_agenda).transpose()
    }

    async fn find_by_status(&self, status: AgendaStatus) -> Result<Option<Agenda>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, status, session_start, session_end
            FROM agendas
            WHERE status = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch agenda by status: {}", e),
            )
        })?;

        row.map(row_to_agenda).transpose()
    }

    async fn find_all_by_status(&self, status: AgendaStatus) -> Result<Vec<Agenda>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, status, session_start, session_end
            FROM agendas
            WHERE status = $1
            ORDER BY id
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list agendas by status: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_agenda).collect()
    }

    async fn find_all(&self) -> Result<Vec<Agenda>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, status, session_start, session_end FROM agendas ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list agendas: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_agenda).collect()
    }

    async fn open_session(&self, agenda: &Agenda) -> Result<OpenTransition, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE agendas SET
                status = 'open',
                session_start = $2,
                session_end = $3
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(agenda.id().as_str())
        .bind(agenda.session_start().map(|t| *t.as_datetime()))
        .bind(agenda.session_end().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(OpenTransition::NotPending),
            Ok(_) => Ok(OpenTransition::Opened),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(OpenTransition::AnotherOpen)
            }
            Err(e) => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open agenda session: {}", e),
            )),
        }
    }

    async fn close_if_expired(&self, id: &AgendaId, now: &Timestamp) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE agendas SET status = 'closed'
            WHERE id = $1 AND status = 'open' AND session_end <= $2
            "#,
        )
        .bind(id.as_str())
        .bind(now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to close agenda: {}", e),
            )
        })?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_agenda(row: sqlx::postgres::PgRow) -> Result<Agenda, DomainError> {
    let id: String = row.try_get("id").map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Failed to get id: {}", e))
    })?;

    let status_str: String = row.try_get("status").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get status: {}", e),
        )
    })?;
    let status = str_to_agenda_status(&status_str)?;

    let session_start: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("session_start").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get session_start: {}", e),
            )
        })?;

    let session_end: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("session_end").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get session_end: {}", e),
            )
        })?;

    Ok(Agenda::reconstitute(
        AgendaId::new(id).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid agenda id: {}", e),
            )
        })?,
        status,
        session_start.map(Timestamp::from_datetime),
        session_end.map(Timestamp::from_datetime),
    ))
}

fn str_to_agenda_status(s: &str) -> Result<AgendaStatus, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid agenda status: {}", s),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_roundtrips() {
        for status in [AgendaStatus::Pending, AgendaStatus::Open, AgendaStatus::Closed] {
            assert_eq!(str_to_agenda_status(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_text_is_a_database_error() {
        let err = str_to_agenda_status("archived").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
