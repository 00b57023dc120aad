//! Priority-preemptive, time-sliced single-CPU scheduler.
//!
//! # Algorithm
//!
//! Each tick runs three phases, then advances the clock:
//!
//! 1. **External**: apply every event the source schedules at this tick.
//!    A new job that outranks the running job preempts it immediately.
//! 2. **Internal**: if the CPU is idle or its job has no work left, retire
//!    the exhausted job as timed out and dispatch the next live job. If the
//!    slice has expired, preempt only for a strictly higher-priority job;
//!    otherwise the incumbent keeps the CPU and its slice restarts.
//! 3. **Execution**: run the CPU for one unit and age every ready job.
//!
//! The loop ends once the source has no events left, the CPU is idle, and
//! the ready queue is empty. Jobs still waiting on I/O are then terminated.
//!
//! Equal-priority jobs do not rotate on slice expiry.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3 (Priority and Round-Robin Scheduling)

use tracing::{debug, info, warn};

use super::config::SchedulerConfig;
use super::stats::{JobReport, SimulationStats};
use super::trace::{Phase, PreemptCause, Trace, TraceEntry, TraceEvent, TraceSink};
use crate::error::{ConfigError, SchedError};
use crate::models::{Cpu, EventKind, ExitType, Job, JobNo, Tick};
use crate::queue::{ReadyQueue, WaitingQueue};
use crate::source::EventSource;

/// Where a job currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobLocation {
    Ready,
    Waiting,
    Running,
    Exited(ExitType),
}

/// What the internal phase must do about the CPU.
enum CpuCheck {
    Idle,
    Exhausted,
    SliceExpired,
    SliceValid,
}

/// Single-CPU job scheduler simulation.
///
/// All simulation state lives in this value, so independent runs can
/// coexist. A scheduler simulates one run; create a new one per source.
///
/// # Example
///
/// ```
/// use u_schedsim::{EventScript, ExitType, ExternalEvent, Scheduler};
///
/// let script = EventScript::new(vec![
///     ExternalEvent::create(0, 5, 3),
///     ExternalEvent::create(1, 1, 1),
/// ]);
///
/// let trace = Scheduler::default().run(&script);
/// assert_eq!(trace.stats.jobs_admitted, 2);
/// assert_eq!(trace.stats.timed_out, 2);
/// // The higher-priority arrival finishes first.
/// assert_eq!(trace.jobs[0].job_no, 2);
/// assert_eq!(trace.jobs[0].exit, ExitType::TimedOut);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    ready: ReadyQueue,
    waiting: WaitingQueue,
    cpu: Cpu,
    time: Tick,
    slice_ticks: Tick,
    last_job_no: JobNo,
    stats: SimulationStats,
    exited: Vec<JobReport>,
    /// Set once a tick at `Tick::MAX` has been simulated.
    clock_exhausted: bool,
}

impl Scheduler {
    /// Creates a scheduler at t=0.
    pub fn new(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            ready: ReadyQueue::new(),
            waiting: WaitingQueue::new(),
            cpu: Cpu::new(),
            time: 0,
            slice_ticks: 0,
            last_job_no: 0,
            stats: SimulationStats::default(),
            exited: Vec::new(),
            clock_exhausted: false,
        }
    }

    /// Runs to completion, buffering the whole trace.
    pub fn run<S: EventSource + ?Sized>(&mut self, source: &S) -> Trace {
        let mut trace = Trace::new();
        let stats = self.run_with(source, &mut trace);
        trace.stats = stats;
        trace.jobs = self.exited.clone();
        trace
    }

    /// Runs to completion, streaming entries into `sink`.
    ///
    /// Returns the final statistics.
    pub fn run_with<S: EventSource + ?Sized>(
        &mut self,
        source: &S,
        sink: &mut dyn TraceSink,
    ) -> SimulationStats {
        while !self.is_done(source) {
            self.step(source, sink);
        }
        self.shutdown(sink);

        info!(
            ticks = self.time,
            admitted = self.stats.jobs_admitted,
            completed = self.stats.completed,
            timed_out = self.stats.timed_out,
            terminated = self.stats.terminated,
            "simulation ended"
        );
        self.stats.clone()
    }

    /// Whether the tick loop has nothing left to do.
    ///
    /// Always true once the clock has run out of ticks.
    pub fn is_done<S: EventSource + ?Sized>(&self, source: &S) -> bool {
        if self.clock_exhausted {
            return true;
        }
        let events_pending = source
            .max_event_time()
            .is_some_and(|last| self.time <= last);
        !events_pending && self.cpu.is_idle() && self.ready.is_empty()
    }

    /// Simulates exactly one tick. No-op once the clock has run out.
    pub fn step<S: EventSource + ?Sized>(&mut self, source: &S, sink: &mut dyn TraceSink) {
        if self.clock_exhausted {
            return;
        }
        debug!(time = self.time, "tick");
        self.process_external_events(source, sink);
        self.process_internal_events(sink);
        self.execute(sink);
        match self.time.checked_add(1) {
            Some(next) => self.time = next,
            None => {
                warn!(time = self.time, "clock exhausted, stopping run");
                self.clock_exhausted = true;
            }
        }
    }

    /// Terminates every job still waiting on I/O.
    ///
    /// Called by [`run_with`](Self::run_with) after the last tick.
    pub fn shutdown(&mut self, sink: &mut dyn TraceSink) {
        for job_no in self.waiting.job_nos() {
            if let Some(job) = self.waiting.remove(job_no) {
                self.retire(job, ExitType::Terminated, Phase::Shutdown, sink);
            }
        }
    }

    /// Current simulated time.
    pub fn time(&self) -> Tick {
        self.time
    }

    /// Ticks the running job has held the CPU in its current slice.
    pub fn slice_ticks(&self) -> Tick {
        self.slice_ticks
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The running job, if any.
    pub fn running(&self) -> Option<&Job> {
        self.cpu.running()
    }

    /// Runnable jobs.
    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }

    /// Jobs blocked on I/O.
    pub fn waiting_queue(&self) -> &WaitingQueue {
        &self.waiting
    }

    /// Exit reports so far, in exit order.
    pub fn exited_jobs(&self) -> &[JobReport] {
        &self.exited
    }

    /// Statistics so far.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Looks up a live job wherever it resides.
    pub fn job(&self, job_no: JobNo) -> Option<&Job> {
        self.cpu
            .running()
            .filter(|j| j.job_no == job_no)
            .or_else(|| self.ready.get(job_no))
            .or_else(|| self.waiting.get(job_no))
    }

    /// Where a job is. `None` for a job number never admitted.
    pub fn locate(&self, job_no: JobNo) -> Option<JobLocation> {
        if self.cpu.running().is_some_and(|j| j.job_no == job_no) {
            Some(JobLocation::Running)
        } else if self.ready.contains(job_no) {
            Some(JobLocation::Ready)
        } else if self.waiting.contains(job_no) {
            Some(JobLocation::Waiting)
        } else {
            self.exited
                .iter()
                .find(|r| r.job_no == job_no)
                .map(|r| JobLocation::Exited(r.exit))
        }
    }

    // ======================== External phase ========================

    fn process_external_events<S: EventSource + ?Sized>(
        &mut self,
        source: &S,
        sink: &mut dyn TraceSink,
    ) {
        let events = source.events_at(self.time);
        if events.is_empty() {
            self.emit(sink, Phase::External, TraceEvent::NoEvents);
            return;
        }

        for event in events {
            let result = match event.kind {
                EventKind::Create {
                    priority,
                    time_estimate,
                } => {
                    self.spawn_job(priority, time_estimate, sink);
                    Ok(())
                }
                EventKind::WaitForIo => self.block_running_job(sink),
                EventKind::ReadyFromIo { job_no } => self.wake_job(job_no, sink),
                EventKind::Complete => self.complete_running_job(sink),
                EventKind::Terminate { job_no } => self.terminate_job(job_no, sink),
                EventKind::Unknown { code } => Err(SchedError::UnknownCommand { code }),
            };

            if let Err(error) = result {
                warn!(time = self.time, %error, "external event rejected");
                self.emit(sink, Phase::External, TraceEvent::Rejected { error });
            }
        }
    }

    fn spawn_job(&mut self, priority: i32, time_estimate: Tick, sink: &mut dyn TraceSink) {
        self.last_job_no += 1;
        let job = Job::new(self.last_job_no, priority, self.time, time_estimate);
        self.stats.record_admission();
        self.emit(
            sink,
            Phase::External,
            TraceEvent::Spawned {
                job_no: job.job_no,
                priority,
                time_remaining: time_estimate,
            },
        );

        let preempts = self.cpu.running().is_some_and(|running| job.outranks(running));
        if preempts {
            self.preempt(job, PreemptCause::Arrival, Phase::External, sink);
        } else {
            self.ready.enqueue(job);
        }
    }

    fn block_running_job(&mut self, sink: &mut dyn TraceSink) -> Result<(), SchedError> {
        let job = self.cpu.take().ok_or(SchedError::NoRunningJob)?;
        self.emit(
            sink,
            Phase::External,
            TraceEvent::MovedToWaiting { job_no: job.job_no },
        );
        self.waiting.add(job);
        Ok(())
    }

    fn wake_job(&mut self, job_no: JobNo, sink: &mut dyn TraceSink) -> Result<(), SchedError> {
        let job = self
            .waiting
            .remove(job_no)
            .ok_or(SchedError::NotWaiting { job_no })?;
        self.emit(sink, Phase::External, TraceEvent::MovedToReady { job_no });
        self.ready.enqueue(job);
        Ok(())
    }

    fn complete_running_job(&mut self, sink: &mut dyn TraceSink) -> Result<(), SchedError> {
        let job = self.cpu.take().ok_or(SchedError::NoRunningJob)?;
        self.retire(job, ExitType::Completed, Phase::External, sink);
        Ok(())
    }

    fn terminate_job(&mut self, job_no: JobNo, sink: &mut dyn TraceSink) -> Result<(), SchedError> {
        if self.cpu.running().is_some_and(|j| j.job_no == job_no) {
            return Err(SchedError::CannotTerminateRunning { job_no });
        }

        let job = self
            .ready
            .remove(job_no)
            .or_else(|| self.waiting.remove(job_no))
            .ok_or(SchedError::JobNotFound { job_no })?;
        self.retire(job, ExitType::Terminated, Phase::External, sink);
        Ok(())
    }

    // ======================== Internal phase ========================

    fn process_internal_events(&mut self, sink: &mut dyn TraceSink) {
        match self.check_cpu() {
            CpuCheck::Idle => self.dispatch_next(sink),
            CpuCheck::Exhausted => {
                if let Some(job) = self.cpu.take() {
                    self.retire(job, ExitType::TimedOut, Phase::Internal, sink);
                }
                self.dispatch_next(sink);
            }
            CpuCheck::SliceExpired => self.expire_slice(sink),
            CpuCheck::SliceValid => self.emit(sink, Phase::Internal, TraceEvent::SliceStillGood),
        }

        // Covers a CPU vacated earlier in the tick by I/O wait or completion.
        if self.cpu.is_idle() && !self.ready.is_empty() {
            self.dispatch_next(sink);
        }
    }

    fn check_cpu(&self) -> CpuCheck {
        match self.cpu.running() {
            None => CpuCheck::Idle,
            Some(job) if job.is_exhausted() => CpuCheck::Exhausted,
            Some(_) if self.slice_ticks >= self.config.slice_length => CpuCheck::SliceExpired,
            Some(_) => CpuCheck::SliceValid,
        }
    }

    /// Dispatches the highest-priority live job, retiring exhausted jobs
    /// found ahead of it. Each pass removes one job from the queue.
    fn dispatch_next(&mut self, sink: &mut dyn TraceSink) {
        for _ in 0..self.ready.len() {
            let Some(job) = self.ready.dequeue() else {
                break;
            };
            if job.is_exhausted() {
                self.retire(job, ExitType::TimedOut, Phase::Internal, sink);
                continue;
            }
            self.assign_cpu(job, Phase::Internal, sink);
            return;
        }
        self.emit(sink, Phase::Internal, TraceEvent::NothingReady);
    }

    fn expire_slice(&mut self, sink: &mut dyn TraceSink) {
        let Some(current) = self.cpu.running() else {
            return;
        };
        let current_no = current.job_no;
        let contender = self
            .ready
            .peek()
            .filter(|next| next.outranks(current))
            .map(|next| next.job_no);

        match contender.and_then(|job_no| self.ready.remove(job_no)) {
            Some(next) => self.preempt(next, PreemptCause::SliceExpired, Phase::Internal, sink),
            None => {
                self.slice_ticks = 0;
                self.emit(
                    sink,
                    Phase::Internal,
                    TraceEvent::KeptCpu { job_no: current_no },
                );
            }
        }
    }

    // ======================== Execution phase ========================

    fn execute(&mut self, sink: &mut dyn TraceSink) {
        let ran = self.cpu.execute().map(|j| (j.job_no, j.time_remaining));
        match ran {
            Some((job_no, time_remaining)) => {
                self.slice_ticks += 1;
                self.emit(
                    sink,
                    Phase::Execution,
                    TraceEvent::Executed {
                        job_no,
                        time_remaining,
                    },
                );
            }
            None => {
                self.slice_ticks = 0;
                self.emit(sink, Phase::Execution, TraceEvent::CpuIdle);
            }
        }
        self.ready.update_idle_times();
    }

    // ======================== Transitions ========================

    /// Moves the running job (if any) back to the ready queue and gives
    /// the CPU to `next`.
    fn preempt(&mut self, next: Job, cause: PreemptCause, phase: Phase, sink: &mut dyn TraceSink) {
        if let Some(current) = self.cpu.take() {
            self.emit(
                sink,
                phase,
                TraceEvent::Preempted {
                    job_no: current.job_no,
                    by: next.job_no,
                    cause,
                },
            );
            self.ready.enqueue(current);
        }
        self.assign_cpu(next, phase, sink);
    }

    fn assign_cpu(&mut self, mut job: Job, phase: Phase, sink: &mut dyn TraceSink) {
        job.enter_cpu();
        let job_no = job.job_no;
        let previous = self.cpu.set_running(job);
        debug_assert!(previous.is_none(), "dispatch onto a busy CPU");
        self.slice_ticks = 0;
        self.emit(sink, phase, TraceEvent::Dispatched { job_no });
    }

    fn retire(&mut self, mut job: Job, exit: ExitType, phase: Phase, sink: &mut dyn TraceSink) {
        job.finalize(exit);
        let report = JobReport::new(&job, exit, self.time);
        self.stats.record_exit(&report);
        info!(
            time = self.time,
            job_no = report.job_no,
            exit = ?exit,
            running_time = report.running_time,
            idle_time = report.idle_time,
            turnaround = report.turnaround,
            "job exited"
        );
        self.emit(sink, phase, TraceEvent::Exited(report.clone()));
        self.exited.push(report);
    }

    fn emit(&self, sink: &mut dyn TraceSink, phase: Phase, event: TraceEvent) {
        debug!(time = self.time, ?phase, ?event, "trace");
        sink.record(TraceEntry {
            time: self.time,
            phase,
            event,
        });
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::from_config(SchedulerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExternalEvent;
    use crate::source::EventScript;

    fn script(events: Vec<ExternalEvent>) -> EventScript {
        EventScript::new(events)
    }

    /// Steps the scheduler through `ticks` ticks, discarding the trace.
    fn advance(sched: &mut Scheduler, source: &EventScript, ticks: usize) -> Trace {
        let mut trace = Trace::new();
        for _ in 0..ticks {
            sched.step(source, &mut trace);
        }
        trace
    }

    #[test]
    fn test_zero_slice_rejected() {
        let config = SchedulerConfig::new().with_slice_length(0);
        assert_eq!(Scheduler::new(config).err(), Some(ConfigError::ZeroSliceLength));
    }

    #[test]
    fn test_empty_source_runs_no_ticks() {
        let trace = Scheduler::default().run(&EventScript::default());
        assert!(trace.entries.is_empty());
        assert_eq!(trace.stats, SimulationStats::default());
    }

    #[test]
    fn test_create_dispatches_same_tick() {
        let s = script(vec![ExternalEvent::create(0, 3, 4)]);
        let mut sched = Scheduler::default();
        advance(&mut sched, &s, 1);

        let running = sched.running().unwrap();
        assert_eq!(running.job_no, 1);
        assert_eq!(running.cpu_entry_count, 1);
        assert_eq!(running.time_remaining, 3);
        assert_eq!(sched.slice_ticks(), 1);
        assert_eq!(sched.time(), 1);
    }

    #[test]
    fn test_arrival_preemption() {
        let s = script(vec![
            ExternalEvent::create(0, 5, 10),
            ExternalEvent::create(1, 1, 3),
        ]);
        let mut sched = Scheduler::default();
        let trace = advance(&mut sched, &s, 2);

        assert_eq!(sched.running().map(|j| j.job_no), Some(2));
        assert_eq!(sched.locate(1), Some(JobLocation::Ready));
        assert!(trace.entries.iter().any(|e| e.event
            == TraceEvent::Preempted {
                job_no: 1,
                by: 2,
                cause: PreemptCause::Arrival
            }));
    }

    #[test]
    fn test_equal_priority_arrival_does_not_preempt() {
        let s = script(vec![
            ExternalEvent::create(0, 2, 10),
            ExternalEvent::create(1, 2, 3),
        ]);
        let mut sched = Scheduler::default();
        advance(&mut sched, &s, 2);
        assert_eq!(sched.running().map(|j| j.job_no), Some(1));
        assert_eq!(sched.locate(2), Some(JobLocation::Ready));
    }

    #[test]
    fn test_slice_expiry_keeps_equal_priority() {
        // Job 1 blocks, job 2 takes the CPU, job 1 returns at equal priority.
        let s = script(vec![
            ExternalEvent::create(0, 5, 10),
            ExternalEvent::wait_for_io(1),
            ExternalEvent::create(2, 5, 10),
            ExternalEvent::ready_from_io(3, 1),
        ]);
        let mut sched = Scheduler::new(SchedulerConfig::new().with_slice_length(2)).unwrap();
        advance(&mut sched, &s, 4);
        // Job 2 holds the CPU; job 1 is back in the ready queue at equal priority.
        assert_eq!(sched.running().map(|j| j.job_no), Some(2));
        assert_eq!(sched.locate(1), Some(JobLocation::Ready));

        // Slice expires at tick 4 with only an equal-priority contender.
        let trace = advance(&mut sched, &s, 1);
        assert_eq!(sched.running().map(|j| j.job_no), Some(2));
        assert!(trace
            .entries
            .iter()
            .any(|e| e.event == TraceEvent::KeptCpu { job_no: 2 }));
    }

    #[test]
    fn test_slice_expiry_with_higher_priority_ready() {
        // Job 1 outranks job 2 but is blocked when job 2 arrives, so it
        // re-enters through the ready queue and wins at slice expiry.
        let s = script(vec![
            ExternalEvent::create(0, 1, 10),
            ExternalEvent::wait_for_io(1),
            ExternalEvent::create(1, 5, 10),
            ExternalEvent::ready_from_io(3, 1),
        ]);
        let mut sched = Scheduler::default();
        // t0: job 1 runs. t1: job 1 blocks, job 2 created and dispatched.
        // t2: job 2 slice 1. t3: job 1 ready; job 2 slice expired -> preempted.
        let trace = advance(&mut sched, &s, 4);
        assert_eq!(sched.running().map(|j| j.job_no), Some(1));
        assert_eq!(sched.locate(2), Some(JobLocation::Ready));
        assert!(trace.entries.iter().any(|e| e.event
            == TraceEvent::Preempted {
                job_no: 2,
                by: 1,
                cause: PreemptCause::SliceExpired
            }));
        assert_eq!(sched.slice_ticks(), 1);
    }

    #[test]
    fn test_wait_and_ready_rejections() {
        let s = script(vec![
            ExternalEvent::wait_for_io(0),
            ExternalEvent::ready_from_io(1, 9),
            ExternalEvent::complete(2),
            ExternalEvent::terminate(3, 4),
            ExternalEvent::unknown(4, 'Q'),
        ]);
        let trace = Scheduler::default().run(&s);
        let rejections: Vec<_> = trace.rejections().collect();
        assert_eq!(
            rejections,
            vec![
                (0, SchedError::NoRunningJob),
                (1, SchedError::NotWaiting { job_no: 9 }),
                (2, SchedError::NoRunningJob),
                (3, SchedError::JobNotFound { job_no: 4 }),
                (4, SchedError::UnknownCommand { code: 'Q' }),
            ]
        );
        assert_eq!(trace.stats.jobs_admitted, 0);
        assert_eq!(trace.ticks(), 5);
    }

    #[test]
    fn test_terminate_running_rejected() {
        let s = script(vec![
            ExternalEvent::create(0, 1, 5),
            ExternalEvent::terminate(1, 1),
        ]);
        let mut sched = Scheduler::default();
        let trace = advance(&mut sched, &s, 2);
        assert_eq!(
            trace.rejections().collect::<Vec<_>>(),
            vec![(1, SchedError::CannotTerminateRunning { job_no: 1 })]
        );
        assert_eq!(sched.locate(1), Some(JobLocation::Running));
    }

    #[test]
    fn test_terminate_ready_and_waiting() {
        let s = script(vec![
            ExternalEvent::create(0, 1, 10),
            ExternalEvent::create(1, 5, 10),
            ExternalEvent::terminate(2, 2),
            ExternalEvent::wait_for_io(3),
            ExternalEvent::terminate(4, 1),
        ]);
        let trace = Scheduler::default().run(&s);

        assert_eq!(trace.stats.terminated, 2);
        assert_eq!(trace.job(2).map(|r| r.exit), Some(ExitType::Terminated));
        assert_eq!(trace.job(2).map(|r| r.exit_time), Some(2));
        assert_eq!(trace.job(1).map(|r| r.exit), Some(ExitType::Terminated));
        assert_eq!(trace.job(1).map(|r| r.running_time), Some(3));
        assert_eq!(trace.rejections().count(), 0);
    }

    #[test]
    fn test_complete_accumulates_stats() {
        // Job 1 runs t0..t1, job 2 waits in the ready queue from t1.
        let s = script(vec![
            ExternalEvent::create(0, 1, 10),
            ExternalEvent::create(1, 2, 10),
            ExternalEvent::complete(3),
            ExternalEvent::complete(5),
        ]);
        let trace = Scheduler::default().run(&s);

        let first = trace.job(1).unwrap();
        assert_eq!(first.exit, ExitType::Completed);
        assert_eq!(first.turnaround, 3);
        assert_eq!(first.idle_time, 0);
        assert_eq!(first.running_time, 3);

        // Job 2 idles t1, t2; dispatched at t3, completed at t5.
        let second = trace.job(2).unwrap();
        assert_eq!(second.exit, ExitType::Completed);
        assert_eq!(second.idle_time, 2);
        assert_eq!(second.turnaround, 4);

        assert_eq!(trace.stats.completed, 2);
        assert!((trace.stats.average_idle_time() - 1.0).abs() < 1e-10);
        assert!((trace.stats.average_turnaround() - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_exhausted_jobs_skipped_in_ready_queue() {
        // Job 2 (estimate 0) queues behind running job 1 and is retired
        // without ever reaching the CPU.
        let s = script(vec![
            ExternalEvent::create(0, 1, 1),
            ExternalEvent::create(0, 2, 0),
            ExternalEvent::create(0, 3, 2),
        ]);
        let trace = Scheduler::default().run(&s);

        let zero = trace.job(2).unwrap();
        assert_eq!(zero.exit, ExitType::TimedOut);
        assert_eq!(zero.cpu_entry_count, 0);
        assert_eq!(trace.stats.timed_out, 3);
        assert_eq!(trace.job(3).map(|r| r.running_time), Some(2));
    }

    #[test]
    fn test_exhausted_contender_still_preempts_at_slice_expiry() {
        // Job 1 uses its only unit at t0, then blocks and returns with no
        // work left while the lower-priority job 2 holds the CPU.
        let s = script(vec![
            ExternalEvent::create(0, 1, 1),
            ExternalEvent::wait_for_io(1),
            ExternalEvent::create(1, 3, 10),
            ExternalEvent::ready_from_io(2, 1),
        ]);
        let mut sched = Scheduler::default();
        let trace = advance(&mut sched, &s, 4);

        // t3: the slice expires and job 1 outranks job 2.
        assert_eq!(sched.running().map(|j| j.job_no), Some(1));
        assert!(trace.entries_at(3).any(|e| e.event
            == TraceEvent::Preempted {
                job_no: 2,
                by: 1,
                cause: PreemptCause::SliceExpired
            }));

        // t4: retired by the exhaustion check, job 2 resumes.
        advance(&mut sched, &s, 1);
        assert_eq!(sched.running().map(|j| j.job_no), Some(2));
        assert_eq!(sched.locate(1), Some(JobLocation::Exited(ExitType::TimedOut)));
        assert_eq!(sched.exited_jobs()[0].exit_time, 4);
        assert_eq!(sched.exited_jobs()[0].cpu_entry_count, 2);
    }

    #[test]
    fn test_last_representable_tick_ends_run() {
        let s = script(vec![ExternalEvent::create(Tick::MAX, 1, 5)]);
        let mut sched = Scheduler::default();
        sched.time = Tick::MAX - 1;

        let trace = sched.run(&s);
        assert!(sched.is_done(&s));
        assert_eq!(sched.time(), Tick::MAX);
        assert_eq!(trace.stats.jobs_admitted, 1);
        assert_eq!(sched.running().map(|j| j.running_time), Some(1));
        assert_eq!(trace.ticks(), Tick::MAX);

        // Further steps record nothing.
        let mut extra = Trace::new();
        sched.step(&s, &mut extra);
        assert!(extra.entries.is_empty());
    }

    #[test]
    fn test_shutdown_terminates_waiting_jobs() {
        let s = script(vec![
            ExternalEvent::create(0, 1, 10),
            ExternalEvent::wait_for_io(1),
        ]);
        let trace = Scheduler::default().run(&s);

        let shutdown: Vec<_> = trace.phase_entries(Phase::Shutdown).collect();
        assert_eq!(shutdown.len(), 1);
        assert_eq!(shutdown[0].time, 2);
        assert_eq!(trace.job(1).map(|r| r.exit), Some(ExitType::Terminated));
        assert_eq!(trace.stats.terminated, 1);
    }

    #[test]
    fn test_streaming_sink_matches_buffered() {
        let s = script(vec![
            ExternalEvent::create(0, 2, 3),
            ExternalEvent::create(1, 1, 2),
            ExternalEvent::wait_for_io(3),
            ExternalEvent::ready_from_io(5, 2),
        ]);
        let buffered = Scheduler::default().run(&s);

        let mut streamed = Vec::new();
        let stats = Scheduler::default().run_with(&s, &mut |e: TraceEntry| streamed.push(e));

        assert_eq!(streamed, buffered.entries);
        assert_eq!(stats, buffered.stats);
    }

    #[test]
    fn test_job_lookup() {
        let s = script(vec![
            ExternalEvent::create(0, 1, 10),
            ExternalEvent::create(0, 2, 10),
        ]);
        let mut sched = Scheduler::default();
        advance(&mut sched, &s, 1);
        assert_eq!(sched.job(1).map(|j| j.running_time), Some(1));
        assert_eq!(sched.job(2).map(|j| j.idle_time), Some(1));
        assert!(sched.job(3).is_none());
        assert!(sched.locate(3).is_none());
    }
}
