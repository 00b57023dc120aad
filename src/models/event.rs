//! External event model.
//!
//! External events are the scripted stimuli that drive a simulation run:
//! job arrivals, I/O transitions, completion and termination requests.

use serde::{Deserialize, Serialize};

use super::{JobNo, Tick};

/// What an external event asks the scheduler to do.
///
/// `WaitForIo` and `Complete` act on whatever job is running.
/// `ReadyFromIo` and `Terminate` name their target job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EventKind {
    /// Spawn a new job into the ready queue.
    Create {
        /// Scheduling priority (lower = more important).
        priority: i32,
        /// Declared work units.
        time_estimate: Tick,
    },
    /// The running job starts I/O and blocks.
    WaitForIo,
    /// A blocked job finished I/O and becomes ready.
    ReadyFromIo {
        /// Target job.
        job_no: JobNo,
    },
    /// The running job completes.
    Complete,
    /// Remove a non-running job from the system.
    Terminate {
        /// Target job.
        job_no: JobNo,
    },
    /// Command code an adapter could not map. Reported, never applied.
    Unknown {
        /// The unrecognised command code.
        code: char,
    },
}

/// An event scheduled at a specific tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEvent {
    /// Tick at which the event fires.
    pub time: Tick,
    /// Event payload.
    pub kind: EventKind,
}

impl ExternalEvent {
    /// Creates an event of the given kind.
    pub fn new(time: Tick, kind: EventKind) -> Self {
        Self { time, kind }
    }

    /// Job creation.
    pub fn create(time: Tick, priority: i32, time_estimate: Tick) -> Self {
        Self::new(
            time,
            EventKind::Create {
                priority,
                time_estimate,
            },
        )
    }

    /// Running job blocks on I/O.
    pub fn wait_for_io(time: Tick) -> Self {
        Self::new(time, EventKind::WaitForIo)
    }

    /// Waiting job becomes ready.
    pub fn ready_from_io(time: Tick, job_no: JobNo) -> Self {
        Self::new(time, EventKind::ReadyFromIo { job_no })
    }

    /// Running job completes.
    pub fn complete(time: Tick) -> Self {
        Self::new(time, EventKind::Complete)
    }

    /// Termination request for a job.
    pub fn terminate(time: Tick, job_no: JobNo) -> Self {
        Self::new(time, EventKind::Terminate { job_no })
    }

    /// Unrecognised command.
    pub fn unknown(time: Tick, code: char) -> Self {
        Self::new(time, EventKind::Unknown { code })
    }

    /// The job this event names, if it names one.
    pub fn target(&self) -> Option<JobNo> {
        match self.kind {
            EventKind::ReadyFromIo { job_no } | EventKind::Terminate { job_no } => Some(job_no),
            _ => None,
        }
    }
}
