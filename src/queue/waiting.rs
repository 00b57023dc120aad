//! Waiting queue for jobs blocked on simulated I/O.

use std::collections::BTreeMap;

use crate::models::{Job, JobNo};

/// Jobs blocked on I/O, keyed by job number.
///
/// Has no scheduling order. Enumeration is by ascending job number.
#[derive(Debug, Clone, Default)]
pub struct WaitingQueue {
    jobs: BTreeMap<JobNo, Job>,
}

impl WaitingQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a job.
    pub fn add(&mut self, job: Job) {
        let job_no = job.job_no;
        let previous = self.jobs.insert(job_no, job);
        debug_assert!(previous.is_none(), "job #{job_no} already waiting");
    }

    /// Removes a waiting job. `None` if the job is not waiting.
    pub fn remove(&mut self, job_no: JobNo) -> Option<Job> {
        self.jobs.remove(&job_no)
    }

    /// Looks up a waiting job.
    pub fn get(&self, job_no: JobNo) -> Option<&Job> {
        self.jobs.get(&job_no)
    }

    /// Whether the job is waiting.
    pub fn contains(&self, job_no: JobNo) -> bool {
        self.jobs.contains_key(&job_no)
    }

    /// Numbers of all waiting jobs.
    pub fn job_nos(&self) -> Vec<JobNo> {
        self.jobs.keys().copied().collect()
    }

    /// Waiting jobs by ascending job number.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of waiting jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}
