//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Maximum length for an agenda identifier.
pub const MAX_AGENDA_ID_LENGTH: usize = 255;

/// Client-supplied identifier of an agenda item ("pauta").
///
/// Surrounding whitespace is trimmed; the remaining text must be non-empty
/// and at most [`MAX_AGENDA_ID_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgendaId(String);

impl AgendaId {
    /// Creates a validated AgendaId.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("idPauta"));
        }
        if trimmed.chars().count() > MAX_AGENDA_ID_LENGTH {
            return Err(ValidationError::invalid_format(
                "idPauta",
                format!("must be {} characters or less", MAX_AGENDA_ID_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgendaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgendaId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AgendaId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgendaId> for String {
    fn from(id: AgendaId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agenda_id_accepts_plain_text() {
        let id = AgendaId::new("A1").unwrap();
        assert_eq!(id.as_str(), "A1");
    }

    #[test]
    fn agenda_id_trims_whitespace() {
        let id = AgendaId::new("  pauta-7 ").unwrap();
        assert_eq!(id.as_str(), "pauta-7");
    }

    #[test]
    fn agenda_id_rejects_empty() {
        assert!(matches!(
            AgendaId::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(AgendaId::new("   ").is_err());
    }

    #[test]
    fn agenda_id_rejects_too_long() {
        let long = "x".repeat(MAX_AGENDA_ID_LENGTH + 1);
        assert!(matches!(
            AgendaId::new(long),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn agenda_id_serializes_as_plain_string() {
        let id = AgendaId::new("A1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"A1\"");
    }

    #[test]
    fn agenda_id_deserialization_validates() {
        let ok: AgendaId = serde_json::from_str("\"A2\"").unwrap();
        assert_eq!(ok.as_str(), "A2");
        assert!(serde_json::from_str::<AgendaId>("\"  \"").is_err());
    }

    #[test]
    fn agenda_ids_order_lexicographically() {
        let a = AgendaId::new("A1").unwrap();
        let b = AgendaId::new("A2").unwrap();
        assert!(a < b);
    }
}
