//! Scheduler simulation and run reporting.
//!
//! Provides the tick-driven single-CPU scheduler, its configuration, the
//! typed trace it emits, and end-of-run statistics.
//!
//! # Algorithm
//!
//! `Scheduler` applies scripted external events, then its internal
//! dispatch/preemption policy, then executes one CPU tick. Priority is
//! preemptive on arrival and re-checked at every slice expiry.
//!
//! # Statistics
//!
//! `SimulationStats` counts jobs by exit type and averages idle and
//! turnaround time over completed jobs.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod config;
mod engine;
mod stats;
mod trace;

pub use config::{DEFAULT_SLICE_LENGTH, SchedulerConfig};
pub use engine::{JobLocation, Scheduler};
pub use stats::{JobReport, SimulationStats};
pub use trace::{Phase, PreemptCause, Trace, TraceEntry, TraceEvent, TraceSink};
