//! Agenda aggregate entity.
//!
//! An agenda ("pauta") is a proposal that can be put to a single,
//! time-bounded vote. The aggregate owns the status machine and the session
//! window; the single-open-agenda rule spans all agendas and is therefore
//! enforced by the repository, not here.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AgendaId, AgendaStatus, DomainError, ErrorCode, StateMachine, Timestamp, ValidationError,
};

/// Length of a voting session, in whole minutes (at least one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SessionDuration(u32);

impl SessionDuration {
    /// One minute, the fallback when nothing is configured.
    pub const ONE_MINUTE: SessionDuration = SessionDuration(1);

    /// Creates a validated duration.
    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::out_of_range(
                "duracao",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        Ok(Self(minutes))
    }

    /// Returns the duration in minutes.
    pub fn minutes(&self) -> u32 {
        self.0
    }
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self::ONE_MINUTE
    }
}

impl TryFrom<u32> for SessionDuration {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<SessionDuration> for u32 {
    fn from(duration: SessionDuration) -> Self {
        duration.0
    }
}

/// Agenda aggregate.
///
/// # Invariants
///
/// - `session_start` and `session_end` are both set iff the agenda has been opened
/// - `session_end` is `session_start` plus the requested duration
/// - `Closed` is terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    id: AgendaId,
    status: AgendaStatus,
    session_start: Option<Timestamp>,
    session_end: Option<Timestamp>,
}

impl Agenda {
    /// Create a new pending agenda.
    pub fn new(id: AgendaId) -> Self {
        Self {
            id,
            status: AgendaStatus::Pending,
            session_start: None,
            session_end: None,
        }
    }

    /// Reconstitute an agenda from persistence (no validation).
    pub fn reconstitute(
        id: AgendaId,
        status: AgendaStatus,
        session_start: Option<Timestamp>,
        session_end: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            status,
            session_start,
            session_end,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &AgendaId {
        &self.id
    }

    pub fn status(&self) -> AgendaStatus {
        self.status
    }

    /// When the voting session started, if it was ever opened.
    pub fn session_start(&self) -> Option<&Timestamp> {
        self.session_start.as_ref()
    }

    /// The auto-close deadline, if the agenda was ever opened.
    pub fn session_end(&self) -> Option<&Timestamp> {
        self.session_end.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.status == AgendaStatus::Open
    }

    pub fn is_closed(&self) -> bool {
        self.status == AgendaStatus::Closed
    }

    /// True when the agenda is open and its deadline is at or before `now`.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        match (self.status, self.session_end) {
            (AgendaStatus::Open, Some(end)) => !end.is_after(now),
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Open the voting session at `now` for `duration`.
    ///
    /// # Errors
    ///
    /// - `AgendaClosed` if the agenda already went through a session
    /// - `AgendaAlreadyOpen` if this agenda is the one currently open
    pub fn open_session(
        &mut self,
        now: Timestamp,
        duration: SessionDuration,
    ) -> Result<(), DomainError> {
        match self.status {
            AgendaStatus::Closed => {
                return Err(DomainError::new(
                    ErrorCode::AgendaClosed,
                    format!("Agenda {} is already closed", self.id),
                ))
            }
            AgendaStatus::Open => {
                return Err(DomainError::new(
                    ErrorCode::AgendaAlreadyOpen,
                    format!("Agenda {} is already open", self.id),
                ))
            }
            AgendaStatus::Pending => {}
        }

        self.status = self.status.transition_to(AgendaStatus::Open)?;
        self.session_start = Some(now);
        self.session_end = Some(now.plus_minutes(duration.minutes()));
        Ok(())
    }

    /// Close the voting session.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the agenda is open
    pub fn close(&mut self) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&AgendaStatus::Closed) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Agenda {} cannot be closed from {}", self.id, self.status),
            ));
        }
        self.status = AgendaStatus::Closed;
        Ok(())
    }
}
