use serde::{Deserialize, Serialize};

use crate::core::{ArrivalPolicy, EmptyReadyPolicy, SimError, Ticks};

pub const DEFAULT_HORIZON: Ticks = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks simulated per run, counting tick 0.
    pub horizon: Ticks,
    pub arrivals: ArrivalPolicy,
    pub on_empty_ready: EmptyReadyPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            arrivals: ArrivalPolicy::default(),
            on_empty_ready: EmptyReadyPolicy::default(),
        }
    }
}

impl SimConfig {
    pub fn with_horizon(horizon: Ticks) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.horizon == 0 {
            return Err(SimError::InvalidHorizon);
        }
        Ok(())
    }
}
