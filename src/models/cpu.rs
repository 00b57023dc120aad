//! Single CPU slot.

use serde::{Deserialize, Serialize};

use super::Job;

/// The simulated processor. Holds at most one running job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cpu {
    running: Option<Job>,
}

impl Cpu {
    /// Creates an idle CPU.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no job is running.
    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    /// The running job, if any.
    pub fn running(&self) -> Option<&Job> {
        self.running.as_ref()
    }

    /// Installs `job` as the running job, returning the previous one.
    pub fn set_running(&mut self, job: Job) -> Option<Job> {
        self.running.replace(job)
    }

    /// Vacates the CPU.
    pub fn take(&mut self) -> Option<Job> {
        self.running.take()
    }

    /// Runs the current job for one unit. No-op when idle.
    ///
    /// Returns the job that ran.
    pub fn execute(&mut self) -> Option<&Job> {
        let job = self.running.as_mut()?;
        job.execute();
        Some(job)
    }
}
