//! Simulation domain models.
//!
//! Provides the core data types for a single-CPU scheduling simulation:
//! jobs, the CPU slot, and the external events that drive a run.
//!
//! # Domain Mappings
//!
//! | u-schedsim | Operating System | Batch Queue |
//! |------------|------------------|-------------|
//! | Job | Process (PCB) | Batch job |
//! | Cpu | Processor core | Execution slot |
//! | ExternalEvent | Syscall / interrupt | Operator command |

mod cpu;
mod event;
mod job;

pub use cpu::Cpu;
pub use event::{EventKind, ExternalEvent};
pub use job::{ExitType, Job, JobNo, Tick};
