//! HTTP handlers for the voting endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    CastVoteCommand, CastVoteHandler, CreateAgendaCommand, CreateAgendaHandler,
    FindOpenAgendaHandler, GetResultHandler, GetResultQuery, ListAgendasHandler,
    ListAgendasQuery, ListVotesHandler, ListVotesQuery, OpenSessionCommand, OpenSessionHandler,
};
use crate::domain::agenda::AgendaError;
use crate::domain::foundation::{AgendaId, CommandMetadata, ErrorCode, VoteChoice};
use crate::domain::voting::{Cpf, TallyError, VotingError};

use super::dto::{
    AgendaRequest, AgendaResponse, CpfResponse, ErrorResponse, OpenSessionRequest,
    ResultResponse, VoteRequest, VoteResponse, VoteView,
};
use super::extract::ValidJson;

const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct VotingHandlers {
    create_agenda: Arc<CreateAgendaHandler>,
    open_session: Arc<OpenSessionHandler>,
    find_open: Arc<FindOpenAgendaHandler>,
    list_agendas: Arc<ListAgendasHandler>,
    cast_vote: Arc<CastVoteHandler>,
    list_votes: Arc<ListVotesHandler>,
    get_result: Arc<GetResultHandler>,
}

impl VotingHandlers {
    pub fn new(
        create_agenda: Arc<CreateAgendaHandler>,
        open_session: Arc<OpenSessionHandler>,
        find_open: Arc<FindOpenAgendaHandler>,
        list_agendas: Arc<ListAgendasHandler>,
        cast_vote: Arc<CastVoteHandler>,
        list_votes: Arc<ListVotesHandler>,
        get_result: Arc<GetResultHandler>,
    ) -> Self {
        Self {
            create_agenda,
            open_session,
            find_open,
            list_agendas,
            cast_vote,
            list_votes,
            get_result,
        }
    }
}

fn metadata(headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::new().with_source("http");
    match headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some(request_id) => metadata.with_correlation_id(request_id),
        None => metadata,
    }
}

fn parse_agenda_id(raw: &str) -> Result<AgendaId, Response> {
    AgendaId::new(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(ErrorCode::ValidationFailed, e.to_string())),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Agenda lifecycle
// ════════════════════════════════════════════════════════════════════════════

/// POST /votacao/criarPauta - Register an agenda
pub async fn create_agenda(
    State(handlers): State<VotingHandlers>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<AgendaRequest>,
) -> Response {
    let cmd = CreateAgendaCommand {
        agenda_id: req.id_pauta,
    };

    match handlers.create_agenda.handle(cmd, metadata(&headers)).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(AgendaResponse::from(&result.agenda)),
        )
            .into_response(),
        Err(e) => handle_agenda_error(e),
    }
}

/// POST /votacao/abrirSessao - Open the voting session of an agenda
pub async fn open_session(
    State(handlers): State<VotingHandlers>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<OpenSessionRequest>,
) -> Response {
    let cmd = OpenSessionCommand {
        agenda_id: req.id_pauta,
        duration_minutes: req.duracao,
    };

    match handlers.open_session.handle(cmd, metadata(&headers)).await {
        Ok(result) => (StatusCode::OK, Json(AgendaResponse::from(&result.agenda))).into_response(),
        Err(e) => handle_agenda_error(e),
    }
}

/// GET /votacao/pautaAberta - The agenda currently open for voting
pub async fn find_open_agenda(State(handlers): State<VotingHandlers>) -> Response {
    match handlers.find_open.handle().await {
        Ok(Some(agenda)) => (StatusCode::OK, Json(AgendaResponse::from(&agenda))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                ErrorCode::NoOpenSession,
                "Nenhuma pauta aberta para votação",
            )),
        )
            .into_response(),
        Err(e) => handle_agenda_error(e),
    }
}

/// GET /votacao/pautas - Every agenda
pub async fn list_agendas(State(handlers): State<VotingHandlers>) -> Response {
    list(handlers, ListAgendasQuery::all()).await
}

/// GET /votacao/pautas/pendentes - Agendas not yet opened
pub async fn list_pending_agendas(State(handlers): State<VotingHandlers>) -> Response {
    list(handlers, ListAgendasQuery::pending()).await
}

/// GET /votacao/pautas/fechadas - Agendas whose session ended
pub async fn list_closed_agendas(State(handlers): State<VotingHandlers>) -> Response {
    list(handlers, ListAgendasQuery::closed()).await
}

async fn list(handlers: VotingHandlers, query: ListAgendasQuery) -> Response {
    match handlers.list_agendas.handle(query).await {
        Ok(agendas) => {
            let body: Vec<AgendaResponse> = agendas.iter().map(AgendaResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_agenda_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Voting
// ════════════════════════════════════════════════════════════════════════════

/// POST /votacao/votar/sim - Vote yes on the open agenda
pub async fn vote_yes(
    State(handlers): State<VotingHandlers>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<VoteRequest>,
) -> Response {
    cast(handlers, &headers, req, VoteChoice::Yes).await
}

/// POST /votacao/votar/nao - Vote no on the open agenda
pub async fn vote_no(
    State(handlers): State<VotingHandlers>,
    headers: HeaderMap,
    ValidJson(req): ValidJson<VoteRequest>,
) -> Response {
    cast(handlers, &headers, req, VoteChoice::No).await
}

async fn cast(
    handlers: VotingHandlers,
    headers: &HeaderMap,
    req: VoteRequest,
    choice: VoteChoice,
) -> Response {
    let cmd = CastVoteCommand {
        voter_id: req.cod_cpf,
        choice,
    };

    match handlers.cast_vote.handle(cmd, metadata(headers)).await {
        Ok(result) => {
            let response = VoteResponse {
                id_pauta: result.vote.agenda_id().to_string(),
                voto: result.vote.choice(),
                mensagem: "Voto registrado".to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_voting_error(e),
    }
}

/// GET /votacao/pautas/:id/votos - Votes recorded on an agenda
pub async fn list_votes(
    State(handlers): State<VotingHandlers>,
    Path(agenda_id): Path<String>,
) -> Response {
    let agenda_id = match parse_agenda_id(&agenda_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.list_votes.handle(ListVotesQuery { agenda_id }).await {
        Ok(votes) => {
            let body: Vec<VoteView> = votes.iter().map(VoteView::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_voting_error(e),
    }
}

/// GET /votacao/cpf - A random, structurally valid CPF for the demo client
pub async fn generate_cpf() -> Response {
    (StatusCode::OK, Json(CpfResponse::from(Cpf::generate()))).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Tally
// ════════════════════════════════════════════════════════════════════════════

/// POST /votacao/resultadoPauta - Yes/No counts of a closed agenda
pub async fn get_result(
    State(handlers): State<VotingHandlers>,
    ValidJson(req): ValidJson<AgendaRequest>,
) -> Response {
    let agenda_id = match parse_agenda_id(&req.id_pauta) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_result.handle(GetResultQuery { agenda_id }).await {
        Ok(tally) => (StatusCode::OK, Json(ResultResponse::from(tally))).into_response(),
        Err(e) => handle_tally_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn error_response(status: StatusCode, code: ErrorCode, message: String) -> Response {
    if code.is_infrastructure() {
        return (status, Json(ErrorResponse::internal())).into_response();
    }
    (status, Json(ErrorResponse::new(code, message))).into_response()
}

fn handle_agenda_error(error: AgendaError) -> Response {
    let status = match &error {
        AgendaError::AlreadyExists(_) => StatusCode::CONFLICT,
        AgendaError::NotFound(_) => StatusCode::NOT_FOUND,
        AgendaError::AlreadyOpen | AgendaError::Closed(_) => StatusCode::BAD_REQUEST,
        AgendaError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        AgendaError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.code(), error.message())
}

fn handle_voting_error(error: VotingError) -> Response {
    let status = match &error {
        VotingError::InvalidVoter(_) | VotingError::NoOpenSession => StatusCode::NOT_FOUND,
        VotingError::AgendaNotFound(_) => StatusCode::NOT_FOUND,
        VotingError::IneligibleVoter | VotingError::SessionClosed(_) => StatusCode::BAD_REQUEST,
        VotingError::DuplicateVoter(_) => StatusCode::CONFLICT,
        VotingError::ValidationError(_) | VotingError::Infrastructure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, error.code(), error.message())
}

fn handle_tally_error(error: TallyError) -> Response {
    let status = match &error {
        TallyError::NotFound(_) => StatusCode::NOT_FOUND,
        TallyError::NotClosed(_) => StatusCode::BAD_REQUEST,
        TallyError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error.code(), error.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn id() -> AgendaId {
        AgendaId::new("A1").unwrap()
    }

    #[test]
    fn agenda_errors_map_to_statuses() {
        assert_eq!(
            handle_agenda_error(AgendaError::already_exists(id())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_agenda_error(AgendaError::not_found(id())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_agenda_error(AgendaError::AlreadyOpen).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_agenda_error(AgendaError::infrastructure("db down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn voting_errors_map_to_statuses() {
        assert_eq!(
            handle_voting_error(VotingError::invalid_voter("unknown")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_voting_error(VotingError::IneligibleVoter).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_voting_error(VotingError::DuplicateVoter(id())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_voting_error(VotingError::validation("timeout")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn tally_errors_map_to_statuses() {
        assert_eq!(
            handle_tally_error(TallyError::NotFound(id())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_tally_error(TallyError::NotClosed(id())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn request_id_becomes_correlation_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));
        assert_eq!(metadata(&headers).correlation_id(), "req-42");
        assert_eq!(metadata(&headers).source(), "http");
    }
}
