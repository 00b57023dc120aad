//! Event script validation.
//!
//! Advisory pre-flight checks over an [`EventScript`]. The scheduler never
//! requires a clean script (every problem found here is reported at run
//! time as a rejected event instead), but linting up front catches
//! authoring mistakes before a long trace has to be read. Detects:
//! - More than one event in a single tick
//! - Jobs created with no declared work
//! - References to job numbers not yet created at that tick
//! - Unrecognised command codes

use std::collections::BTreeMap;

use crate::models::{EventKind, JobNo, Tick};
use crate::source::EventScript;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Tick of the offending event.
    pub time: Tick,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Several events share one tick.
    CrowdedTick,
    /// A job is created with a zero time estimate.
    ZeroTimeEstimate,
    /// An event names a job number not yet created.
    UnknownJobReference,
    /// An event carries an unrecognised command code.
    UnknownCommand,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, time: Tick, message: impl Into<String>) -> Self {
        Self {
            kind,
            time,
            message: message.into(),
        }
    }
}

/// Validates an event script.
///
/// Checks:
/// 1. At most one event per tick
/// 2. Every created job declares at least one unit of work
/// 3. `ReadyFromIo` / `Terminate` name a job created earlier in the script
/// 4. No unrecognised commands
///
/// Job numbers are predicted the way the scheduler assigns them: the n-th
/// `Create` in time order becomes job #n.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_script(script: &EventScript) -> ValidationResult {
    let mut errors = Vec::new();

    let mut per_tick: BTreeMap<Tick, usize> = BTreeMap::new();
    for event in script.events() {
        *per_tick.entry(event.time).or_default() += 1;
    }
    for (&time, &count) in &per_tick {
        if count > 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::CrowdedTick,
                time,
                format!("{count} events scheduled at tick {time}"),
            ));
        }
    }

    let mut created: JobNo = 0;
    for event in script.events() {
        match event.kind {
            EventKind::Create { time_estimate, .. } => {
                created += 1;
                if time_estimate == 0 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ZeroTimeEstimate,
                        event.time,
                        format!("Job #{created} is created with no work"),
                    ));
                }
            }
            EventKind::Unknown { code } => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCommand,
                    event.time,
                    format!("Unknown command '{code}'"),
                ));
            }
            _ => {}
        }

        if let Some(job_no) = event.target().filter(|&n| n == 0 || n > created) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownJobReference,
                event.time,
                format!("Job #{job_no} does not exist at tick {}", event.time),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
