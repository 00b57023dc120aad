//! Error types.
//!
//! [`SchedError`] values are never fatal. The scheduler records them in the
//! trace as rejected events and the tick proceeds with no mutation.
//! [`ConfigError`] is returned before a run starts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::JobNo;

/// Why an external event was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SchedError {
    #[error("no job is currently running")]
    NoRunningJob,

    #[error("job #{job_no} is not waiting")]
    NotWaiting { job_no: JobNo },

    #[error("cannot terminate running job #{job_no}")]
    CannotTerminateRunning { job_no: JobNo },

    #[error("job #{job_no} not found in the system")]
    JobNotFound { job_no: JobNo },

    #[error("unknown command '{code}'")]
    UnknownCommand { code: char },
}

/// Invalid scheduler or workload configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("slice length must be at least one tick")]
    ZeroSliceLength,

    #[error("probability {name} = {value} is outside [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("range {name} is empty")]
    EmptyRange { name: &'static str },

    #[error("every event weight is zero")]
    ZeroWeights,
}
