//! Closure scheduler that only records what it was asked to do.

use std::sync::Mutex;

use crate::domain::foundation::{AgendaId, Timestamp};
use crate::ports::ClosureScheduler;

/// Records armed closures without ever firing them; the expiry sweep is
/// then the only closing path.
#[derive(Default)]
pub struct RecordingClosureScheduler {
    scheduled: Mutex<Vec<(AgendaId, Timestamp)>>,
}

impl RecordingClosureScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closures armed so far, in order.
    pub fn scheduled(&self) -> Vec<(AgendaId, Timestamp)> {
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl ClosureScheduler for RecordingClosureScheduler {
    fn schedule_closure(&self, agenda_id: AgendaId, at: Timestamp) {
        self.scheduled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((agenda_id, at));
    }
}
