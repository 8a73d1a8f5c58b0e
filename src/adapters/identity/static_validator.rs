//! Identity validator with a fixed answer table.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::voting::Cpf;
use crate::ports::{IdentityValidator, VoterEligibility};

/// Answers from a table; voters not in the table get the default verdict.
///
/// `unavailable()` builds a validator whose every call fails, standing in
/// for an unreachable identity service.
pub struct StaticIdentityValidator {
    default: Option<VoterEligibility>,
    overrides: HashMap<Cpf, VoterEligibility>,
}

impl StaticIdentityValidator {
    /// Every voter is eligible.
    pub fn allow_all() -> Self {
        Self {
            default: Some(VoterEligibility::Eligible),
            overrides: HashMap::new(),
        }
    }

    /// Every lookup fails with `IdentityServiceError`.
    pub fn unavailable() -> Self {
        Self {
            default: None,
            overrides: HashMap::new(),
        }
    }

    pub fn with_verdict(mut self, voter: Cpf, verdict: VoterEligibility) -> Self {
        self.overrides.insert(voter, verdict);
        self
    }
}

#[async_trait]
impl IdentityValidator for StaticIdentityValidator {
    async fn check(&self, voter: &Cpf) -> Result<VoterEligibility, DomainError> {
        let verdict = self.default.map(|d| *self.overrides.get(voter).unwrap_or(&d));
        verdict.ok_or_else(|| {
            DomainError::new(ErrorCode::IdentityServiceError, "Identity service unavailable")
        })
    }
}
