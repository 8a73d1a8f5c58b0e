//! voting-sessions server binary.
//!
//! Wires the PostgreSQL stores, the HTTP identity validator, closure timers
//! and the expiry sweeper behind the axum router, then serves until Ctrl-C.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use voting_sessions::adapters::http::{api_router, VotingHandlers};
use voting_sessions::adapters::identity::HttpIdentityValidator;
use voting_sessions::adapters::postgres::{
    PostgresAgendaRepository, PostgresVoteRepository, MIGRATOR,
};
use voting_sessions::adapters::scheduler::{
    ExpirySweeper, ExpirySweeperConfig, TokioClosureScheduler,
};
use voting_sessions::application::{
    CastVoteHandler, CloseExpiredSessionsHandler, CloseSessionHandler, CreateAgendaHandler,
    FindOpenAgendaHandler, GetResultHandler, ListAgendasHandler, ListVotesHandler,
    OpenSessionHandler,
};
use voting_sessions::config::{AppConfig, ServerConfig};
use voting_sessions::domain::foundation::AgendaStatus;
use voting_sessions::ports::{
    AgendaRepository, Clock, ClosureScheduler, IdentityValidator, SystemClock, VoteRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        "Starting voting-sessions"
    );

    // === Infrastructure ===
    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let agendas: Arc<dyn AgendaRepository> = Arc::new(PostgresAgendaRepository::new(pool.clone()));
    let votes: Arc<dyn VoteRepository> = Arc::new(PostgresVoteRepository::new(pool));
    let identity: Arc<dyn IdentityValidator> =
        Arc::new(HttpIdentityValidator::new(config.identity.validator_config())?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // === Session closure ===
    let closer = Arc::new(CloseSessionHandler::new(agendas.clone(), clock.clone()));
    let scheduler: Arc<dyn ClosureScheduler> =
        Arc::new(TokioClosureScheduler::new(closer, clock.clone()));
    rearm_open_session(agendas.as_ref(), scheduler.as_ref()).await?;

    let sweeper = ExpirySweeper::with_config(
        Arc::new(CloseExpiredSessionsHandler::new(agendas.clone(), clock.clone())),
        ExpirySweeperConfig::default().with_interval(config.voting.sweep_interval()),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

    // === HTTP ===
    let handlers = VotingHandlers::new(
        Arc::new(CreateAgendaHandler::new(agendas.clone())),
        Arc::new(OpenSessionHandler::new(
            agendas.clone(),
            scheduler,
            clock.clone(),
            config.voting.default_session_duration()?,
        )),
        Arc::new(FindOpenAgendaHandler::new(agendas.clone())),
        Arc::new(ListAgendasHandler::new(agendas.clone())),
        Arc::new(CastVoteHandler::new(
            agendas.clone(),
            votes.clone(),
            identity,
            clock,
        )),
        Arc::new(ListVotesHandler::new(agendas.clone(), votes.clone())),
        Arc::new(GetResultHandler::new(agendas, votes)),
    );
    let app = api_router(handlers, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    sweeper_task.await?;
    tracing::info!("Shut down");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if server.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Arms a closure timer for a session left open by a previous process.
async fn rearm_open_session(
    agendas: &dyn AgendaRepository,
    scheduler: &dyn ClosureScheduler,
) -> Result<(), Box<dyn std::error::Error>> {
    let open = agendas.find_by_status(AgendaStatus::Open).await?;
    if let Some(agenda) = open {
        if let Some(end) = agenda.session_end() {
            tracing::info!(agenda_id = %agenda.id(), "Re-arming closure for open session");
            scheduler.schedule_closure(agenda.id().clone(), *end);
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
