//! Agenda-specific error types.

use crate::domain::foundation::{AgendaId, DomainError, ErrorCode};

/// Errors of the agenda lifecycle operations (create, open, close, list).
///
/// Every variant except `Infrastructure` is an expected business outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    /// An agenda with this identifier already exists.
    AlreadyExists(AgendaId),
    /// No agenda with this identifier.
    NotFound(AgendaId),
    /// Some agenda (possibly another one) is currently open.
    AlreadyOpen,
    /// The agenda already had its voting session.
    Closed(AgendaId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AgendaError {
    pub fn already_exists(id: AgendaId) -> Self {
        AgendaError::AlreadyExists(id)
    }
    pub fn not_found(id: AgendaId) -> Self {
        AgendaError::NotFound(id)
    }
    pub fn closed(id: AgendaId) -> Self {
        AgendaError::Closed(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AgendaError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AgendaError::Infrastructure(message.into())
    }
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AgendaError::Infrastructure(_))
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            AgendaError::AlreadyExists(_) => ErrorCode::AgendaAlreadyExists,
            AgendaError::NotFound(_) => ErrorCode::AgendaNotFound,
            AgendaError::AlreadyOpen => ErrorCode::AgendaAlreadyOpen,
            AgendaError::Closed(_) => ErrorCode::AgendaClosed,
            AgendaError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AgendaError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            AgendaError::AlreadyExists(id) => format!("Agenda already exists: {}", id),
            AgendaError::NotFound(id) => format!("Agenda not found: {}", id),
            AgendaError::AlreadyOpen => "A voting session is already open".to_string(),
            AgendaError::Closed(id) => format!("Agenda is already closed: {}", id),
            AgendaError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AgendaError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AgendaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AgendaError {}

impl From<DomainError> for AgendaError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AgendaAlreadyOpen => AgendaError::AlreadyOpen,
            ErrorCode::ValidationFailed => AgendaError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => AgendaError::Infrastructure(err.to_string()),
        }
    }
}
