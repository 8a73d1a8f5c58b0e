//! HTTP routes for the voting endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_agenda, find_open_agenda, generate_cpf, get_result, list_agendas,
    list_closed_agendas, list_pending_agendas, list_votes, open_session, vote_no, vote_yes,
    VotingHandlers,
};

/// Creates the voting router; mounted under `/votacao`.
pub fn voting_routes(handlers: VotingHandlers) -> Router {
    Router::new()
        .route("/criarPauta", post(create_agenda))
        .route("/abrirSessao", post(open_session))
        .route("/votar/sim", post(vote_yes))
        .route("/votar/nao", post(vote_no))
        .route("/resultadoPauta", post(get_result))
        .route("/pautaAberta", get(find_open_agenda))
        .route("/pautas", get(list_agendas))
        .route("/pautas/pendentes", get(list_pending_agendas))
        .route("/pautas/fechadas", get(list_closed_agendas))
        .route("/pautas/:id/votos", get(list_votes))
        .route("/cpf", get(generate_cpf))
        .with_state(handlers)
}
