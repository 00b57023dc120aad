//! Run statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Jobs admitted | Jobs created by the script |
//! | Completed / Timed out / Terminated | Jobs by exit type |
//! | Avg idle time | Mean ready-queue ticks, completed jobs only |
//! | Avg turnaround | Mean (exit - entry), completed jobs only |
//!
//! Averages over zero completed jobs are defined as `0.0`.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2 (Scheduling Criteria)

use serde::{Deserialize, Serialize};

use crate::models::{ExitType, Job, JobNo, Tick};

/// A job's accounting at the moment it exited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub job_no: JobNo,
    pub priority: i32,
    pub exit: ExitType,
    /// Tick at which the job exited.
    pub exit_time: Tick,
    pub time_remaining: Tick,
    pub running_time: Tick,
    pub idle_time: Tick,
    /// `exit_time - entry_time`.
    pub turnaround: Tick,
    pub cpu_entry_count: u32,
}

impl JobReport {
    /// Snapshots a job leaving the system at `now`.
    pub fn new(job: &Job, exit: ExitType, now: Tick) -> Self {
        Self {
            job_no: job.job_no,
            priority: job.priority,
            exit,
            exit_time: now,
            time_remaining: job.time_remaining,
            running_time: job.running_time,
            idle_time: job.idle_time,
            turnaround: job.turnaround(now),
            cpu_entry_count: job.cpu_entry_count,
        }
    }
}

/// Final statistics of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Jobs that entered the system.
    pub jobs_admitted: u32,
    /// Jobs finished by a completion event.
    pub completed: u32,
    /// Jobs that exhausted their declared work.
    pub timed_out: u32,
    /// Jobs terminated by request or at shutdown.
    pub terminated: u32,
    /// Sum of idle time over completed jobs.
    pub total_idle_time_completed: Tick,
    /// Sum of turnaround over completed jobs.
    pub total_turnaround_completed: Tick,
}

impl SimulationStats {
    /// Counts one admitted job.
    pub fn record_admission(&mut self) {
        self.jobs_admitted += 1;
    }

    /// Folds an exit report into the totals.
    pub fn record_exit(&mut self, report: &JobReport) {
        match report.exit {
            ExitType::Completed => {
                self.completed += 1;
                self.total_idle_time_completed += report.idle_time;
                self.total_turnaround_completed += report.turnaround;
            }
            ExitType::TimedOut => self.timed_out += 1,
            ExitType::Terminated => self.terminated += 1,
        }
    }

    /// Jobs that have exited by any path.
    pub fn exited(&self) -> u32 {
        self.completed + self.timed_out + self.terminated
    }

    /// Mean idle time of completed jobs. `0.0` when none completed.
    pub fn average_idle_time(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.total_idle_time_completed as f64 / self.completed as f64
        }
    }

    /// Mean turnaround of completed jobs. `0.0` when none completed.
    pub fn average_turnaround(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.total_turnaround_completed as f64 / self.completed as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(job_no: JobNo, exit: ExitType, idle: Tick, turnaround: Tick) -> JobReport {
        JobReport {
            job_no,
            priority: 0,
            exit,
            exit_time: turnaround,
            time_remaining: 0,
            running_time: 0,
            idle_time: idle,
            turnaround,
            cpu_entry_count: 1,
        }
    }

    #[test]
    fn test_averages_completed_only() {
        let mut stats = SimulationStats::default();
        stats.record_exit(&report(1, ExitType::Completed, 2, 6));
        stats.record_exit(&report(2, ExitType::Completed, 4, 10));
        stats.record_exit(&report(3, ExitType::TimedOut, 100, 100));
        stats.record_exit(&report(4, ExitType::Terminated, 50, 50));

        assert_eq!(stats.completed, 2);
        assert_eq!(stats.timed_out, 1);
        assert_eq!(stats.terminated, 1);
        assert_eq!(stats.exited(), 4);
        assert!((stats.average_idle_time() - 3.0).abs() < 1e-10);
        assert!((stats.average_turnaround() - 8.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_completed_defined() {
        let mut stats = SimulationStats::default();
        stats.record_exit(&report(1, ExitType::TimedOut, 3, 3));
        assert!((stats.average_idle_time() - 0.0).abs() < 1e-10);
        assert!((stats.average_turnaround() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_snapshot() {
        let mut job = Job::new(7, 3, 2, 4);
        job.wait_one_tick();
        job.execute();
        job.enter_cpu();

        let r = JobReport::new(&job, ExitType::Completed, 9);
        assert_eq!(r.job_no, 7);
        assert_eq!(r.exit, ExitType::Completed);
        assert_eq!(r.turnaround, 7);
        assert_eq!(r.idle_time, 1);
        assert_eq!(r.running_time, 1);
        assert_eq!(r.time_remaining, 3);
        assert_eq!(r.cpu_entry_count, 1);
    }
}
