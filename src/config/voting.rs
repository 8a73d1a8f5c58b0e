//! Voting session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::agenda::SessionDuration;

/// Session length and closure sweep settings
#[derive(Debug, Clone, Deserialize)]
pub struct VotingConfig {
    /// Session length used when the open request omits one
    #[serde(default = "default_session_minutes")]
    pub default_session_minutes: u32,

    /// How often the expiry sweep runs
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl VotingConfig {
    pub fn default_session_duration(&self) -> Result<SessionDuration, ValidationError> {
        SessionDuration::from_minutes(self.default_session_minutes)
            .map_err(|_| ValidationError::InvalidSessionDuration)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.default_session_duration()?;
        if self.sweep_interval_secs == 0 || self.sweep_interval_secs > 3600 {
            return Err(ValidationError::InvalidSweepInterval);
        }
        Ok(())
    }
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            default_session_minutes: default_session_minutes(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_session_minutes() -> u32 {
    1
}

fn default_sweep_interval() -> u64 {
    60
}
