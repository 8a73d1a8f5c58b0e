//! Identity service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::identity::HttpIdentityValidatorConfig;

/// Where voter eligibility is looked up
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// URL prefix, e.g. `https://user-info.example.com/users/`; the voter id is appended verbatim
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl IdentityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings for [`crate::adapters::identity::HttpIdentityValidator`].
    pub fn validator_config(&self) -> HttpIdentityValidatorConfig {
        HttpIdentityValidatorConfig::new(self.base_url.clone()).with_timeout(self.timeout())
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("VOTING__IDENTITY__BASE_URL"));
        }
        let is_https = self.base_url.starts_with("https://");
        if !is_https && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidIdentityUrl);
        }
        if *environment == Environment::Production && !is_https {
            return Err(ValidationError::IdentityUrlMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidIdentityTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    5
}
