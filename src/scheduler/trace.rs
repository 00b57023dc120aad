//! Trace recording for simulation runs.
//!
//! Every decision the scheduler makes in a tick (events applied, jobs
//! dispatched or preempted, slice checks, execution) is recorded as a
//! [`TraceEntry`] with the simulated time and the phase that produced it.
//! Entries reach a [`TraceSink`] strictly in tick and phase order.

use serde::{Deserialize, Serialize};

use super::stats::{JobReport, SimulationStats};
use crate::error::SchedError;
use crate::models::{JobNo, Tick};

/// The tick phase that produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// External events scheduled for the tick.
    External,
    /// Dispatch, exhaustion, and slice policy.
    Internal,
    /// One unit of CPU work and ready-queue aging.
    Execution,
    /// Forced termination of waiting jobs after the last tick.
    Shutdown,
}

/// Why a running job lost the CPU to a higher-priority job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreemptCause {
    /// A higher-priority job was just created.
    Arrival,
    /// The slice expired with a higher-priority job ready.
    SliceExpired,
}

/// A single scheduling decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// No external event fired this tick.
    NoEvents,
    /// A new job entered the ready queue.
    Spawned {
        job_no: JobNo,
        priority: i32,
        time_remaining: Tick,
    },
    /// The running job was moved back to the ready queue.
    Preempted {
        job_no: JobNo,
        by: JobNo,
        cause: PreemptCause,
    },
    /// The running job blocked on I/O.
    MovedToWaiting { job_no: JobNo },
    /// A waiting job finished I/O.
    MovedToReady { job_no: JobNo },
    /// A job left the system.
    Exited(JobReport),
    /// An external event could not be applied.
    Rejected { error: SchedError },
    /// A job was given the CPU.
    Dispatched { job_no: JobNo },
    /// The CPU needed work and none was ready.
    NothingReady,
    /// The running job's slice is still within bounds.
    SliceStillGood,
    /// The slice expired and no strictly higher-priority job was ready.
    KeptCpu { job_no: JobNo },
    /// The running job executed one unit.
    Executed { job_no: JobNo, time_remaining: Tick },
    /// Nothing ran this tick.
    CpuIdle,
}

/// A trace event stamped with its tick and phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Simulated time.
    pub time: Tick,
    /// Producing phase.
    pub phase: Phase,
    /// The decision.
    pub event: TraceEvent,
}

/// Destination for trace entries.
///
/// Implemented by [`Trace`] (buffers everything) and by any
/// `FnMut(TraceEntry)` closure (streams entries as they are produced).
pub trait TraceSink {
    /// Accepts the next entry.
    fn record(&mut self, entry: TraceEntry);
}

impl<F: FnMut(TraceEntry)> TraceSink for F {
    fn record(&mut self, entry: TraceEntry) {
        self(entry)
    }
}

/// The full result of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Every decision, in tick and phase order.
    pub entries: Vec<TraceEntry>,
    /// Exit reports, in exit order.
    pub jobs: Vec<JobReport>,
    /// Final statistics.
    pub stats: SimulationStats,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries recorded at `time`.
    pub fn entries_at(&self, time: Tick) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(move |e| e.time == time)
    }

    /// Entries produced by `phase`.
    pub fn phase_entries(&self, phase: Phase) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter().filter(move |e| e.phase == phase)
    }

    /// Every rejected event, with its tick.
    pub fn rejections(&self) -> impl Iterator<Item = (Tick, SchedError)> + '_ {
        self.entries.iter().filter_map(|e| match e.event {
            TraceEvent::Rejected { error } => Some((e.time, error)),
            _ => None,
        })
    }

    /// Exit report for a job.
    pub fn job(&self, job_no: JobNo) -> Option<&JobReport> {
        self.jobs.iter().find(|r| r.job_no == job_no)
    }

    /// Number of ticks simulated.
    pub fn ticks(&self) -> Tick {
        self.entries
            .iter()
            .filter(|e| e.phase != Phase::Shutdown)
            .map(|e| e.time.saturating_add(1))
            .max()
            .unwrap_or(0)
    }
}

impl TraceSink for Trace {
    fn record(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }
}
