//! VoteChoice enum - the two answers a voter can give.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A yes/no vote.
///
/// Persisted as `SIM` / `NAO`, the codes the voting client already uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    #[serde(rename = "SIM")]
    Yes,
    #[serde(rename = "NAO")]
    No,
}

impl VoteChoice {
    /// All choices, in tally order.
    pub const ALL: [VoteChoice; 2] = [VoteChoice::Yes, VoteChoice::No];

    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Yes => "SIM",
            VoteChoice::No => "NAO",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VoteChoice {
    type Err = ValidationError;

    /// Accepts the storage codes case-insensitively, plus the path
    /// segments `sim` / `nao` used by the voting routes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SIM" => Ok(VoteChoice::Yes),
            "NAO" | "NÃO" => Ok(VoteChoice::No),
            _ => Err(ValidationError::invalid_format(
                "voto",
                format!("expected SIM or NAO, got '{}'", s),
            )),
        }
    }
}
