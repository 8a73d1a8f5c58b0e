//! AgendaStatus enum for tracking the lifecycle of an agenda item.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StateMachine, ValidationError};

/// Lifecycle status of an agenda item.
///
/// Persisted as snake_case text (`pending`, `open`, `closed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgendaStatus {
    /// Registered, no voting session yet.
    #[default]
    Pending,
    /// Voting session in progress.
    Open,
    /// Voting session finished; results may be read.
    Closed,
}

impl AgendaStatus {
    /// Returns true if votes can be recorded against the agenda.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, AgendaStatus::Open)
    }

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgendaStatus::Pending => "pending",
            AgendaStatus::Open => "open",
            AgendaStatus::Closed => "closed",
        }
    }
}

impl StateMachine for AgendaStatus {
    /// Valid transitions:
    /// - Pending -> Open
    /// - Open -> Closed
    fn can_transition_to(&self, target: &Self) -> bool {
        use AgendaStatus::*;
        matches!((self, target), (Pending, Open) | (Open, Closed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AgendaStatus::*;
        match self {
            Pending => vec![Open],
            Open => vec![Closed],
            Closed => vec![],
        }
    }
}

impl fmt::Display for AgendaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgendaStatus::Pending => "Pending",
            AgendaStatus::Open => "Open",
            AgendaStatus::Closed => "Closed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AgendaStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AgendaStatus::Pending),
            "open" => Ok(AgendaStatus::Open),
            "closed" => Ok(AgendaStatus::Closed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown agenda status '{}'", other),
            )),
        }
    }
}
