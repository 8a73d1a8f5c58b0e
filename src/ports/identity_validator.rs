//! IdentityValidator port - external voter eligibility lookup.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::voting::Cpf;

/// Answer of the identity service for one voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoterEligibility {
    /// The voter may vote.
    Eligible,
    /// The voter is known but unable to vote.
    Ineligible,
    /// The identity service does not know this voter.
    Unknown,
}

/// Port for checking whether a voter may vote.
///
/// A call is bounded by the implementation's timeout; it never writes
/// anything.
#[async_trait]
pub trait IdentityValidator: Send + Sync {
    /// Look up `voter`.
    ///
    /// # Errors
    ///
    /// - `IdentityServiceError` when the service is unreachable, times out or
    ///   answers with something that is not a recognised verdict
    async fn check(&self, voter: &Cpf) -> Result<VoterEligibility, DomainError>;
}
