//! Integration tests for the voting HTTP endpoints.
//!
//! Requests go through the full router (middleware included) via
//! `tower::ServiceExt::oneshot`; stores are in memory.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use voting_sessions::adapters::http::{api_router, VotingHandlers};
use voting_sessions::adapters::identity::StaticIdentityValidator;
use voting_sessions::adapters::memory::{
    InMemoryAgendaRepository, InMemoryVoteRepository, ManualClock, RecordingClosureScheduler,
};
use voting_sessions::application::{
    CastVoteHandler, CloseExpiredSessionsHandler, CreateAgendaHandler, FindOpenAgendaHandler,
    GetResultHandler, ListAgendasHandler, ListVotesHandler, OpenSessionHandler,
};
use voting_sessions::domain::agenda::SessionDuration;
use voting_sessions::domain::foundation::Timestamp;
use voting_sessions::domain::voting::Cpf;
use voting_sessions::ports::VoterEligibility;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    clock: Arc<ManualClock>,
    sweep: CloseExpiredSessionsHandler,
}

impl TestApp {
    fn new() -> Self {
        let identity = StaticIdentityValidator::allow_all().with_verdict(
            Cpf::parse("39053344705").unwrap(),
            VoterEligibility::Ineligible,
        );
        let agendas = Arc::new(InMemoryAgendaRepository::new());
        let votes = Arc::new(InMemoryVoteRepository::linked(agendas.clone()));
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_700_000_000).unwrap()));

        let handlers = VotingHandlers::new(
            Arc::new(CreateAgendaHandler::new(agendas.clone())),
            Arc::new(OpenSessionHandler::new(
                agendas.clone(),
                Arc::new(RecordingClosureScheduler::new()),
                clock.clone(),
                SessionDuration::ONE_MINUTE,
            )),
            Arc::new(FindOpenAgendaHandler::new(agendas.clone())),
            Arc::new(ListAgendasHandler::new(agendas.clone())),
            Arc::new(CastVoteHandler::new(
                agendas.clone(),
                votes.clone(),
                Arc::new(identity),
                clock.clone(),
            )),
            Arc::new(ListVotesHandler::new(agendas.clone(), votes.clone())),
            Arc::new(GetResultHandler::new(agendas.clone(), votes)),
        );

        Self {
            router: api_router(handlers, Duration::from_secs(5)),
            sweep: CloseExpiredSessionsHandler::new(agendas, clock.clone()),
            clock,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn expire_sessions(&self) {
        self.clock.advance_minutes(10);
        self.sweep.handle().await.unwrap();
    }
}

// =============================================================================
// Agenda endpoints
// =============================================================================

#[tokio::test]
async fn create_agenda_returns_created() {
    let app = TestApp::new();

    let (status, body) = app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["idPauta"], "A1");
    assert_eq!(body["status"], "pending");
    assert!(body.get("inicioSessao").is_none());
}

#[tokio::test]
async fn duplicate_agenda_is_a_conflict() {
    let app = TestApp::new();
    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;

    let (status, body) = app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "AGENDA_ALREADY_EXISTS");
}

#[tokio::test]
async fn blank_agenda_id_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.post("/votacao/criarPauta", json!({"idPauta": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn open_session_sets_the_window() {
    let app = TestApp::new();
    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;

    let (status, body) = app
        .post("/votacao/abrirSessao", json!({"idPauta": "A1", "duracao": "3"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "open");
    assert!(body["inicioSessao"].is_string());
    assert!(body["fimSessao"].is_string());

    let (status, body) = app.get("/votacao/pautaAberta").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["idPauta"], "A1");
}

#[tokio::test]
async fn open_errors_map_to_statuses() {
    let app = TestApp::new();
    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;
    app.post("/votacao/criarPauta", json!({"idPauta": "A2"})).await;

    let (status, _) = app.post("/votacao/abrirSessao", json!({"idPauta": "ZZZ"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .post("/votacao/abrirSessao", json!({"idPauta": "A1", "duracao": 0}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");

    app.post("/votacao/abrirSessao", json!({"idPauta": "A1"})).await;
    let (status, body) = app.post("/votacao/abrirSessao", json!({"idPauta": "A2"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "AGENDA_ALREADY_OPEN");
}

#[tokio::test]
async fn malformed_duration_is_a_validation_error() {
    let app = TestApp::new();
    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;

    for duracao in [json!("abc"), json!(-1), json!(1.5)] {
        let (status, body) = app
            .post("/votacao/abrirSessao", json!({"idPauta": "A1", "duracao": duracao}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "duracao {}", duracao);
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert!(body["mensagem"].is_string());
    }

    // Nothing was opened by the rejected requests.
    let (status, _) = app.get("/votacao/pautaAberta").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unparseable_body_is_a_validation_error() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/votacao/criarPauta")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"idPauta\":"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn no_open_agenda_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/votacao/pautaAberta").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_OPEN_SESSION");
}

#[tokio::test]
async fn listings_by_status() {
    let app = TestApp::new();
    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;
    app.post("/votacao/criarPauta", json!({"idPauta": "A2"})).await;
    app.post("/votacao/abrirSessao", json!({"idPauta": "A1"})).await;
    app.expire_sessions().await;

    let (_, pending) = app.get("/votacao/pautas/pendentes").await;
    assert_eq!(pending, json!([{"idPauta": "A2", "status": "pending"}]));

    let (_, closed) = app.get("/votacao/pautas/fechadas").await;
    assert_eq!(closed.as_array().unwrap().len(), 1);
    assert_eq!(closed[0]["idPauta"], "A1");
    assert_eq!(closed[0]["status"], "closed");

    let (_, all) = app.get("/votacao/pautas").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

// =============================================================================
// Voting endpoints
// =============================================================================

#[tokio::test]
async fn full_flow_over_http() {
    let app = TestApp::new();
    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;
    app.post("/votacao/abrirSessao", json!({"idPauta": "A1", "duracao": 1}))
        .await;

    let (status, body) = app
        .post("/votacao/votar/sim", json!({"codCpf": "11144477735"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["idPauta"], "A1");
    assert_eq!(body["voto"], "SIM");

    let (status, body) = app
        .post("/votacao/votar/nao", json!({"codCpf": "222.555.888-46"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["voto"], "NAO");

    let (status, body) = app.post("/votacao/resultadoPauta", json!({"idPauta": "A1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "AGENDA_NOT_CLOSED");

    app.expire_sessions().await;

    let (status, body) = app.post("/votacao/resultadoPauta", json!({"idPauta": "A1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"idPauta": "A1", "Sim": 1, "Não": 1}));

    let (status, votes) = app.get("/votacao/pautas/A1/votos").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(votes[0]["codCpf"], "11144477735");
    assert_eq!(votes[1]["codCpf"], "22255588846");
}

#[tokio::test]
async fn vote_errors_map_to_statuses() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/votacao/votar/sim", json!({"codCpf": "11144477735"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_OPEN_SESSION");

    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;
    app.post("/votacao/abrirSessao", json!({"idPauta": "A1"})).await;

    let (status, body) = app
        .post("/votacao/votar/sim", json!({"codCpf": "12345678900"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "INVALID_VOTER");

    let (status, body) = app
        .post("/votacao/votar/sim", json!({"codCpf": "39053344705"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INELIGIBLE_VOTER");

    app.post("/votacao/votar/sim", json!({"codCpf": "11144477735"}))
        .await;
    let (status, body) = app
        .post("/votacao/votar/nao", json!({"codCpf": "11144477735"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_VOTER");
}

#[tokio::test]
async fn vote_without_cpf_is_a_validation_error() {
    let app = TestApp::new();
    app.post("/votacao/criarPauta", json!({"idPauta": "A1"})).await;
    app.post("/votacao/abrirSessao", json!({"idPauta": "A1"})).await;

    for uri in ["/votacao/votar/sim", "/votacao/votar/nao"] {
        let (status, body) = app.post(uri, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }
}

#[tokio::test]
async fn result_of_unknown_agenda_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.post("/votacao/resultadoPauta", json!({"idPauta": "ZZZ"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "AGENDA_NOT_FOUND");
}

#[tokio::test]
async fn generated_cpf_is_valid() {
    let app = TestApp::new();

    let (status, body) = app.get("/votacao/cpf").await;
    assert_eq!(status, StatusCode::OK);
    let cpf = body["codCpf"].as_str().unwrap();
    assert!(Cpf::parse(cpf).is_ok());
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn supplied_request_id_is_echoed() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}
