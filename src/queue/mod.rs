//! Job holding areas.
//!
//! - [`ReadyQueue`]: runnable jobs, dispatched highest priority first.
//! - [`WaitingQueue`]: jobs blocked on I/O, looked up by job number.
//!
//! Both queues own their jobs. Moving a job between queues, the CPU, and
//! the exit ledger is a move of the `Job` value, so a job can never be
//! resident in two places at once.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 3.2 (Scheduling Queues)

mod ready;
mod waiting;

pub use ready::ReadyQueue;
pub use waiting::WaitingQueue;
