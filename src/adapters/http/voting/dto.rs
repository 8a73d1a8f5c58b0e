//! HTTP DTOs for the voting endpoints.
//!
//! Field names follow the Portuguese wire format used by the voting client
//! (`idPauta`, `duracao`, `codCpf`, `Sim`, `Não`).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::agenda::Agenda;
use crate::domain::foundation::{AgendaStatus, Timestamp, VoteChoice};
use crate::domain::voting::{Cpf, Tally, Vote};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request naming an agenda (create, result).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaRequest {
    pub id_pauta: String,
}

/// Request to open a voting session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionRequest {
    pub id_pauta: String,
    /// Minutes; a JSON number or a numeric string. Absent, null or blank
    /// means the configured default.
    #[serde(default, deserialize_with = "duration_minutes")]
    pub duracao: Option<u32>,
}

/// Request to cast a vote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub cod_cpf: String,
}

fn duration_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(minutes)) => Ok(Some(minutes)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            D::Error::custom(format!(
                "duracao must be a whole number of minutes, got '{}'",
                text
            ))
        }),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// An agenda and its session window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaResponse {
    pub id_pauta: String,
    pub status: AgendaStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inicio_sessao: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fim_sessao: Option<Timestamp>,
}

impl From<&Agenda> for AgendaResponse {
    fn from(agenda: &Agenda) -> Self {
        Self {
            id_pauta: agenda.id().to_string(),
            status: agenda.status(),
            inicio_sessao: agenda.session_start().copied(),
            fim_sessao: agenda.session_end().copied(),
        }
    }
}

/// Confirmation of a recorded vote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub id_pauta: String,
    pub voto: VoteChoice,
    pub mensagem: String,
}

/// One recorded vote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteView {
    pub cod_cpf: String,
    pub voto: VoteChoice,
    pub data_voto: Timestamp,
}

impl From<&Vote> for VoteView {
    fn from(vote: &Vote) -> Self {
        Self {
            cod_cpf: vote.voter().to_string(),
            voto: vote.choice(),
            data_voto: *vote.cast_at(),
        }
    }
}

/// Tally of a closed agenda.
#[derive(Debug, Clone, Serialize)]
pub struct ResultResponse {
    #[serde(rename = "idPauta")]
    pub id_pauta: String,
    #[serde(rename = "Sim")]
    pub sim: u64,
    #[serde(rename = "Não")]
    pub nao: u64,
}

impl From<Tally> for ResultResponse {
    fn from(tally: Tally) -> Self {
        Self {
            id_pauta: tally.agenda_id.to_string(),
            sim: tally.yes,
            nao: tally.no,
        }
    }
}

/// A synthetic voter id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpfResponse {
    pub cod_cpf: String,
}

impl From<Cpf> for CpfResponse {
    fn from(cpf: Cpf) -> Self {
        Self {
            cod_cpf: cpf.into(),
        }
    }
}

/// Error body: a stable machine code plus a human message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub mensagem: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, mensagem: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            mensagem: mensagem.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "Erro interno")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn open_request(body: serde_json::Value) -> Result<OpenSessionRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn duracao_accepts_number_string_or_nothing() {
        assert_eq!(
            open_request(json!({"idPauta": "A1", "duracao": 5})).unwrap().duracao,
            Some(5)
        );
        assert_eq!(
            open_request(json!({"idPauta": "A1", "duracao": " 7 "})).unwrap().duracao,
            Some(7)
        );
        assert_eq!(
            open_request(json!({"idPauta": "A1", "duracao": ""})).unwrap().duracao,
            None
        );
        assert_eq!(
            open_request(json!({"idPauta": "A1", "duracao": null})).unwrap().duracao,
            None
        );
        assert_eq!(open_request(json!({"idPauta": "A1"})).unwrap().duracao, None);
    }

    #[test]
    fn duracao_rejects_garbage() {
        assert!(open_request(json!({"idPauta": "A1", "duracao": "abc"})).is_err());
        assert!(open_request(json!({"idPauta": "A1", "duracao": -3})).is_err());
    }

    #[test]
    fn result_uses_portuguese_keys() {
        let tally = Tally::new(crate::domain::foundation::AgendaId::new("A1").unwrap(), 1, 2);
        let value = serde_json::to_value(ResultResponse::from(tally)).unwrap();
        assert_eq!(value, json!({"idPauta": "A1", "Sim": 1, "Não": 2}));
    }

    #[test]
    fn pending_agenda_has_no_window_fields() {
        let agenda = Agenda::new(crate::domain::foundation::AgendaId::new("A1").unwrap());
        let value = serde_json::to_value(AgendaResponse::from(&agenda)).unwrap();
        assert_eq!(value, json!({"idPauta": "A1", "status": "pending"}));
    }
}
