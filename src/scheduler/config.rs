//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Tick;

/// Default time slice length in ticks.
pub const DEFAULT_SLICE_LENGTH: Tick = 2;

/// Tunable scheduler policy parameters.
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Ticks a job may hold the CPU before a preemption check.
    pub slice_length: Tick,
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            slice_length: DEFAULT_SLICE_LENGTH,
        }
    }

    /// Sets the slice length.
    pub fn with_slice_length(mut self, slice_length: Tick) -> Self {
        self.slice_length = slice_length;
        self
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slice_length == 0 {
            return Err(ConfigError::ZeroSliceLength);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
