//! Job model.
//!
//! A job is one schedulable unit of work. It carries its declared work
//! estimate and the accounting the scheduler accumulates while the job
//! moves between the ready queue, the waiting queue, and the CPU.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 3.1 (Process Control Block)

use serde::{Deserialize, Serialize};

/// Job number. Assigned sequentially from 1 in arrival order.
pub type JobNo = u32;

/// Discrete simulation time unit.
pub type Tick = u64;

/// How a job left the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitType {
    /// Finished by an explicit completion event while running.
    Completed,
    /// Ran out of declared work (`time_remaining` reached zero).
    TimedOut,
    /// Removed by a termination request, or still waiting at shutdown.
    Terminated,
}

/// A schedulable job.
///
/// # Time Representation
/// All times are ticks relative to the start of the simulation (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job number.
    pub job_no: JobNo,
    /// Scheduling priority (lower = more important).
    pub priority: i32,
    /// Tick at which the job entered the system.
    pub entry_time: Tick,
    /// Work units left.
    pub time_remaining: Tick,
    /// Ticks spent in the ready queue.
    pub idle_time: Tick,
    /// Ticks spent executing on the CPU.
    pub running_time: Tick,
    /// Number of times the job was given the CPU.
    pub cpu_entry_count: u32,
    /// Exit classification. `None` while the job is live.
    pub exit: Option<ExitType>,
}

impl Job {
    /// Creates a live job with no accumulated accounting.
    pub fn new(job_no: JobNo, priority: i32, entry_time: Tick, time_estimate: Tick) -> Self {
        Self {
            job_no,
            priority,
            entry_time,
            time_remaining: time_estimate,
            idle_time: 0,
            running_time: 0,
            cpu_entry_count: 0,
            exit: None,
        }
    }

    /// Whether the job has no declared work left.
    pub fn is_exhausted(&self) -> bool {
        self.time_remaining == 0
    }

    /// Whether the job has exited.
    pub fn has_exited(&self) -> bool {
        self.exit.is_some()
    }

    /// Whether this job outranks `other` (strictly lower priority number).
    pub fn outranks(&self, other: &Job) -> bool {
        self.priority < other.priority
    }

    /// Ticks since entry, measured at `now`.
    pub fn turnaround(&self, now: Tick) -> Tick {
        now.saturating_sub(self.entry_time)
    }

    /// Advances the job by one unit of work.
    pub fn execute(&mut self) {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.running_time += 1;
    }

    /// Accrues one tick of ready-queue idle time.
    pub fn wait_one_tick(&mut self) {
        self.idle_time += 1;
    }

    /// Records a CPU assignment.
    pub fn enter_cpu(&mut self) {
        self.cpu_entry_count += 1;
    }

    /// Sets the exit classification. A job exits exactly once.
    pub fn finalize(&mut self, exit: ExitType) {
        debug_assert!(
            self.exit.is_none(),
            "job #{} already exited as {:?}",
            self.job_no,
            self.exit
        );
        self.exit = Some(exit);
    }
}
