//! ClosureScheduler port - one-shot timers that close a voting session.

use crate::domain::foundation::{AgendaId, Timestamp};

/// Arms a one-shot closure of an agenda at an absolute time.
///
/// Timers live in process memory and are lost on restart; the periodic
/// expiry sweep closes whatever they miss. Firing must go through the same
/// idempotent close operation as the sweep.
pub trait ClosureScheduler: Send + Sync {
    fn schedule_closure(&self, agenda_id: AgendaId, at: Timestamp);
}
