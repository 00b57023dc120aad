//! Single-CPU job scheduler simulation for the U-Engine ecosystem.
//!
//! Simulates a priority-preemptive, time-sliced scheduler driven by a
//! scripted sequence of external events (job spawn, I/O block, I/O
//! completion, job completion, termination request), and reports a
//! tick-by-tick trace with idle and turnaround statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `Cpu`, `ExternalEvent`
//! - **`queue`**: `ReadyQueue` (priority order) and `WaitingQueue` (I/O)
//! - **`source`**: `EventSource` trait and the `EventScript` implementation
//! - **`scheduler`**: The tick loop, configuration, trace, and statistics
//! - **`validation`**: Advisory event-script lint
//! - **`workload`**: Seeded random event-script generation
//!
//! # Time Model
//!
//! Time advances in discrete ticks from t=0. Each tick applies external
//! events, then the internal dispatch and preemption policy, then one unit
//! of CPU execution. Lower priority numbers are more important.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 3 and 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod error;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod source;
pub mod validation;
pub mod workload;

pub use error::{ConfigError, SchedError};
pub use models::{Cpu, EventKind, ExitType, ExternalEvent, Job, JobNo, Tick};
pub use queue::{ReadyQueue, WaitingQueue};
pub use scheduler::{
    JobLocation, JobReport, Phase, PreemptCause, Scheduler, SchedulerConfig, SimulationStats,
    Trace, TraceEntry, TraceEvent, TraceSink,
};
pub use source::{EventScript, EventSource};
