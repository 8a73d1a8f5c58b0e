//! Voting and tally error types.

use crate::domain::foundation::{AgendaId, DomainError, ErrorCode};

/// Errors of casting and listing votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VotingError {
    /// The voter id is malformed or unknown to the identity service.
    InvalidVoter(String),
    /// The identity service reports the voter as unable to vote.
    IneligibleVoter,
    /// The identity service could not be consulted.
    ValidationError(String),
    /// No agenda currently accepts votes.
    NoOpenSession,
    /// This voter already voted on the agenda.
    DuplicateVoter(AgendaId),
    /// The agenda closed while the vote was being processed.
    SessionClosed(AgendaId),
    /// No agenda with this identifier.
    AgendaNotFound(AgendaId),
    /// Infrastructure error.
    Infrastructure(String),
}

impl VotingError {
    pub fn invalid_voter(reason: impl Into<String>) -> Self {
        VotingError::InvalidVoter(reason.into())
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        VotingError::ValidationError(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        VotingError::Infrastructure(message.into())
    }

    /// True for failures of the identity service or the stores.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            VotingError::ValidationError(_) | VotingError::Infrastructure(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            VotingError::InvalidVoter(_) => ErrorCode::InvalidVoter,
            VotingError::IneligibleVoter => ErrorCode::IneligibleVoter,
            VotingError::ValidationError(_) => ErrorCode::IdentityServiceError,
            VotingError::NoOpenSession => ErrorCode::NoOpenSession,
            VotingError::DuplicateVoter(_) => ErrorCode::DuplicateVoter,
            VotingError::SessionClosed(_) => ErrorCode::SessionClosed,
            VotingError::AgendaNotFound(_) => ErrorCode::AgendaNotFound,
            VotingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            VotingError::InvalidVoter(reason) => format!("Invalid voter: {}", reason),
            VotingError::IneligibleVoter => "Voter is unable to vote".to_string(),
            VotingError::ValidationError(reason) => {
                format!("Could not validate voter: {}", reason)
            }
            VotingError::NoOpenSession => "No voting session is open".to_string(),
            VotingError::DuplicateVoter(id) => {
                format!("Voter already voted on agenda {}", id)
            }
            VotingError::SessionClosed(id) => {
                format!("Voting session for agenda {} is closed", id)
            }
            VotingError::AgendaNotFound(id) => format!("Agenda not found: {}", id),
            VotingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for VotingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for VotingError {}

impl From<DomainError> for VotingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => VotingError::InvalidVoter(err.message),
            ErrorCode::IdentityServiceError => VotingError::ValidationError(err.message),
            _ => VotingError::Infrastructure(err.to_string()),
        }
    }
}

/// Errors of the tally report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    /// No agenda with this identifier.
    NotFound(AgendaId),
    /// The agenda is pending or still open.
    NotClosed(AgendaId),
    /// Infrastructure error.
    Infrastructure(String),
}

impl TallyError {
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, TallyError::Infrastructure(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TallyError::NotFound(_) => ErrorCode::AgendaNotFound,
            TallyError::NotClosed(_) => ErrorCode::AgendaNotClosed,
            TallyError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TallyError::NotFound(id) => format!("Agenda not found: {}", id),
            TallyError::NotClosed(id) => format!("Agenda {} is not closed yet", id),
            TallyError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TallyError {}

impl From<DomainError> for TallyError {
    fn from(err: DomainError) -> Self {
        TallyError::Infrastructure(err.to_string())
    }
}
