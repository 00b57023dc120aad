//! Ready queue.
//!
//! Runnable jobs ordered by priority (ascending number = higher priority),
//! ties broken by arrival order. Job numbers are assigned on arrival, so a
//! preempted job keeps its place ahead of equal-priority jobs that arrived
//! after it. Removal by job number is supported so
//! termination requests can pull a job out of the middle of the queue.
//!
//! # Complexity
//! O(log n) enqueue, dequeue, and remove. O(n) idle-time sweep.

use std::collections::{BTreeMap, HashMap};

use crate::models::{Job, JobNo};

/// Ordering key: priority first, then job number.
type ReadyKey = (i32, JobNo);

/// Priority-ordered holding area for runnable jobs.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    jobs: BTreeMap<ReadyKey, Job>,
    index: HashMap<JobNo, ReadyKey>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job, ordered among equal priorities by job number.
    pub fn enqueue(&mut self, job: Job) {
        debug_assert!(
            !self.index.contains_key(&job.job_no),
            "job #{} already in ready queue",
            job.job_no
        );
        debug_assert!(!job.has_exited(), "exited job #{} re-enqueued", job.job_no);

        let key = (job.priority, job.job_no);
        self.index.insert(job.job_no, key);
        self.jobs.insert(key, job);
    }

    /// Removes and returns the highest-priority job.
    pub fn dequeue(&mut self) -> Option<Job> {
        let (_, job) = self.jobs.pop_first()?;
        self.index.remove(&job.job_no);
        Some(job)
    }

    /// Returns the highest-priority job without removing it.
    pub fn peek(&self) -> Option<&Job> {
        self.jobs.values().next()
    }

    /// Removes the job with the given number.
    pub fn remove(&mut self, job_no: JobNo) -> Option<Job> {
        let key = self.index.remove(&job_no)?;
        self.jobs.remove(&key)
    }

    /// Looks up a queued job.
    pub fn get(&self, job_no: JobNo) -> Option<&Job> {
        self.index.get(&job_no).and_then(|key| self.jobs.get(key))
    }

    /// Whether the job is queued.
    pub fn contains(&self, job_no: JobNo) -> bool {
        self.index.contains_key(&job_no)
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of queued jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Queued jobs in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// Adds one tick of idle time to every queued job.
    pub fn update_idle_times(&mut self) {
        for job in self.jobs.values_mut() {
            job.wait_one_tick();
        }
    }
}
