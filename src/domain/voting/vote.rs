//! Vote entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AgendaId, Timestamp, VoteChoice};

use super::Cpf;

/// A single ballot. Identified by `(agenda_id, voter)`; immutable once cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    agenda_id: AgendaId,
    voter: Cpf,
    choice: VoteChoice,
    cast_at: Timestamp,
}

impl Vote {
    pub fn new(agenda_id: AgendaId, voter: Cpf, choice: VoteChoice, cast_at: Timestamp) -> Self {
        Self {
            agenda_id,
            voter,
            choice,
            cast_at,
        }
    }

    pub fn agenda_id(&self) -> &AgendaId {
        &self.agenda_id
    }

    pub fn voter(&self) -> &Cpf {
        &self.voter
    }

    pub fn choice(&self) -> VoteChoice {
        self.choice
    }

    pub fn cast_at(&self) -> &Timestamp {
        &self.cast_at
    }
}
