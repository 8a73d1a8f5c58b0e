//! HTTP identity validator.
//!
//! Looks a voter up with `GET {base_url}{cpf}`:
//!
//! | Response | Verdict |
//! |----------|---------|
//! | 404 | `Unknown` |
//! | 2xx, `{"status":"UNABLE_TO_VOTE"}` | `Ineligible` |
//! | 2xx, `{"status":"ABLE_TO_VOTE"}`, empty body or no `status` | `Eligible` |
//! | anything else, timeout, connection failure | `IdentityServiceError` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::voting::Cpf;
use crate::ports::{IdentityValidator, VoterEligibility};

/// Configuration for [`HttpIdentityValidator`].
#[derive(Debug, Clone)]
pub struct HttpIdentityValidatorConfig {
    /// URL prefix; the voter's digits are appended to it.
    pub base_url: String,
    /// Upper bound for one lookup, connection included.
    pub timeout: Duration,
}

impl HttpIdentityValidatorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: Option<String>,
}

/// `IdentityValidator` backed by an external HTTP service.
pub struct HttpIdentityValidator {
    config: HttpIdentityValidatorConfig,
    http_client: reqwest::Client,
}

impl HttpIdentityValidator {
    /// Builds the validator and its HTTP client.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the HTTP client cannot be initialised
    pub fn new(config: HttpIdentityValidatorConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn lookup_url(&self, voter: &Cpf) -> String {
        format!("{}{}", self.config.base_url, voter.as_str())
    }

    fn service_error(&self, message: impl Into<String>) -> DomainError {
        DomainError::new(ErrorCode::IdentityServiceError, message)
    }
}

#[async_trait]
impl IdentityValidator for HttpIdentityValidator {
    async fn check(&self, voter: &Cpf) -> Result<VoterEligibility, DomainError> {
        tracing::debug!(voter = %voter.masked(), "Checking voter eligibility");

        let response = self
            .http_client
            .get(self.lookup_url(voter))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    self.service_error(format!(
                        "Identity service timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    self.service_error(format!("Connection failed: {}", e))
                } else {
                    self.service_error(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(VoterEligibility::Unknown);
        }
        if !status.is_success() {
            return Err(self.service_error(format!("Identity service returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.service_error(format!("Failed to read response: {}", e)))?;
        if body.trim().is_empty() {
            return Ok(VoterEligibility::Eligible);
        }

        let parsed: LookupResponse = serde_json::from_str(&body)
            .map_err(|e| self.service_error(format!("Malformed response: {}", e)))?;

        match parsed.status.as_deref() {
            None | Some("ABLE_TO_VOTE") => Ok(VoterEligibility::Eligible),
            Some("UNABLE_TO_VOTE") => Ok(VoterEligibility::Ineligible),
            Some(other) => Err(self.service_error(format!("Unexpected voter status: {}", other))),
        }
    }
}
