//! One-shot closure timers on the tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use crate::application::{CloseOutcome, CloseSessionHandler};
use crate::domain::foundation::{AgendaId, Timestamp};
use crate::ports::{Clock, ClosureScheduler};

/// Minimum wait before re-checking a session that was not yet due.
const RETRY_FLOOR: Duration = Duration::from_millis(100);

/// Spawns a task per armed closure that sleeps until the deadline and then
/// runs [`CloseSessionHandler`].
///
/// If the session turns out not to be due yet (clock skew between the
/// runtime timer and the clock port) the task sleeps again. Any failure is
/// left to the expiry sweep.
pub struct TokioClosureScheduler {
    closer: Arc<CloseSessionHandler>,
    clock: Arc<dyn Clock>,
}

impl TokioClosureScheduler {
    pub fn new(closer: Arc<CloseSessionHandler>, clock: Arc<dyn Clock>) -> Self {
        Self { closer, clock }
    }
}

impl ClosureScheduler for TokioClosureScheduler {
    fn schedule_closure(&self, agenda_id: AgendaId, at: Timestamp) {
        let closer = Arc::clone(&self.closer);
        let clock = Arc::clone(&self.clock);

        tracing::debug!(agenda_id = %agenda_id, deadline = %at.as_datetime(), "Closure timer armed");
        tokio::spawn(close_at(closer, clock, agenda_id, at));
    }
}

async fn close_at(
    closer: Arc<CloseSessionHandler>,
    clock: Arc<dyn Clock>,
    agenda_id: AgendaId,
    mut deadline: Timestamp,
) {
    let mut wait = delay_until(&clock.now(), &deadline);

    loop {
        tokio::time::sleep(wait).await;

        match closer.handle(&agenda_id).await {
            Ok(CloseOutcome::NotDue { deadline: next }) => {
                deadline = next;
                wait = delay_until(&clock.now(), &deadline).max(RETRY_FLOOR);
            }
            Ok(_) => return,
            // Logged by the handler; the sweep retries.
            Err(_) => return,
        }
    }
}

fn delay_until(now: &Timestamp, deadline: &Timestamp) -> Duration {
    deadline
        .duration_since(now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAgendaRepository, ManualClock};
    use crate::domain::agenda::{Agenda, SessionDuration};
    use crate::ports::AgendaRepository;

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    #[test]
    fn delay_is_zero_for_past_deadlines() {
        assert_eq!(delay_until(&at(100), &at(40)), Duration::ZERO);
        assert_eq!(delay_until(&at(40), &at(100)), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn fires_and_closes_due_session() {
        let repo = Arc::new(InMemoryAgendaRepository::new());
        let clock = Arc::new(ManualClock::new(at(0)));
        let id = AgendaId::new("A1").unwrap();
        let mut agenda = Agenda::new(id.clone());
        repo.insert(&agenda).await.unwrap();
        agenda.open_session(at(0), SessionDuration::ONE_MINUTE).unwrap();
        repo.open_session(&agenda).await.unwrap();

        clock.set(at(60));
        let closer = Arc::new(CloseSessionHandler::new(repo.clone(), clock.clone()));
        let scheduler = TokioClosureScheduler::new(closer, clock);
        scheduler.schedule_closure(id.clone(), at(60));

        for _ in 0..100 {
            if repo.find_by_id(&id).await.unwrap().unwrap().is_closed() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("closure timer did not close the session");
    }
}
