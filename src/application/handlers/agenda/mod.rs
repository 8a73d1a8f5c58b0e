//! Agenda command and query handlers (the session lifecycle).

mod close_expired_sessions;
mod close_session;
mod create_agenda;
mod find_open_agenda;
mod list_agendas;
mod open_session;

pub use close_expired_sessions::{CloseExpiredSessionsHandler, SweepResult};
pub use close_session::{CloseOutcome, CloseSessionHandler};
pub use create_agenda::{CreateAgendaCommand, CreateAgendaHandler, CreateAgendaResult};
pub use find_open_agenda::FindOpenAgendaHandler;
pub use list_agendas::{ListAgendasHandler, ListAgendasQuery};
pub use open_session::{OpenSessionCommand, OpenSessionHandler, OpenSessionResult};
