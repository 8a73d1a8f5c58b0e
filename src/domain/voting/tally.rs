//! Tally of a closed agenda.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AgendaId, VoteChoice};

/// Yes/No counts for one agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub agenda_id: AgendaId,
    pub yes: u64,
    pub no: u64,
}

impl Tally {
    pub fn new(agenda_id: AgendaId, yes: u64, no: u64) -> Self {
        Self { agenda_id, yes, no }
    }

    pub fn count(&self, choice: VoteChoice) -> u64 {
        match choice {
            VoteChoice::Yes => self.yes,
            VoteChoice::No => self.no,
        }
    }

    pub fn total(&self) -> u64 {
        self.yes + self.no
    }
}
