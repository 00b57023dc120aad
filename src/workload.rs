//! Seeded random workloads.
//!
//! Generates event scripts tick by tick: with probability `p_event` a tick
//! carries one event, whose command is drawn from the configured weights.
//! Targets of `ReadyFromIo` and `Terminate` are drawn uniformly from the
//! jobs created so far, so a generated script also exercises the
//! scheduler's rejection paths. Same seed, same script.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{EventKind, ExternalEvent, JobNo, Tick};
use crate::source::EventScript;

/// Relative frequency of each command in a generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventWeights {
    pub create: u32,
    pub wait_for_io: u32,
    pub ready_from_io: u32,
    pub complete: u32,
    pub terminate: u32,
}

impl EventWeights {
    fn total(&self) -> u32 {
        self.create + self.wait_for_io + self.ready_from_io + self.complete + self.terminate
    }
}

impl Default for EventWeights {
    fn default() -> Self {
        Self {
            create: 4,
            wait_for_io: 2,
            ready_from_io: 2,
            complete: 1,
            terminate: 1,
        }
    }
}

/// Shape of a generated workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Ticks covered by the script.
    pub ticks: Tick,
    /// Probability that a tick carries an event.
    pub p_event: f64,
    /// Command mix.
    pub weights: EventWeights,
    /// Inclusive priority bounds for created jobs.
    pub priority_range: (i32, i32),
    /// Inclusive time-estimate bounds for created jobs.
    pub estimate_range: (Tick, Tick),
}

impl WorkloadConfig {
    /// Creates the default workload: 50 ticks, mostly arrivals.
    pub fn new() -> Self {
        Self {
            ticks: 50,
            p_event: 0.5,
            weights: EventWeights::default(),
            priority_range: (1, 5),
            estimate_range: (1, 8),
        }
    }

    /// Sets the script length.
    pub fn with_ticks(mut self, ticks: Tick) -> Self {
        self.ticks = ticks;
        self
    }

    /// Sets the per-tick event probability.
    pub fn with_event_probability(mut self, p_event: f64) -> Self {
        self.p_event = p_event;
        self
    }

    /// Sets the command mix.
    pub fn with_weights(mut self, weights: EventWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the inclusive priority bounds.
    pub fn with_priority_range(mut self, low: i32, high: i32) -> Self {
        self.priority_range = (low, high);
        self
    }

    /// Sets the inclusive time-estimate bounds.
    pub fn with_estimate_range(mut self, low: Tick, high: Tick) -> Self {
        self.estimate_range = (low, high);
        self
    }

    /// Checks that the configuration can be sampled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.p_event) {
            return Err(ConfigError::InvalidProbability {
                name: "p_event",
                value: self.p_event,
            });
        }
        if self.priority_range.0 > self.priority_range.1 {
            return Err(ConfigError::EmptyRange {
                name: "priority_range",
            });
        }
        if self.estimate_range.0 > self.estimate_range.1 {
            return Err(ConfigError::EmptyRange {
                name: "estimate_range",
            });
        }
        if self.weights.total() == 0 {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(())
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Random event-script generator.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
    rng: StdRng,
}

impl WorkloadGenerator {
    /// Creates a generator seeded with `seed`.
    pub fn new(config: WorkloadConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Draws the next script.
    pub fn generate(&mut self) -> EventScript {
        let mut events = Vec::new();
        let mut created: JobNo = 0;

        for time in 0..self.config.ticks {
            if !self.rng.random_bool(self.config.p_event) {
                continue;
            }
            let kind = self.next_kind(created);
            if matches!(kind, EventKind::Create { .. }) {
                created += 1;
            }
            events.push(ExternalEvent::new(time, kind));
        }

        EventScript::new(events)
    }

    fn next_kind(&mut self, created: JobNo) -> EventKind {
        let w = &self.config.weights;
        let mut pick = self.rng.random_range(0..w.total());

        let mut take = |weight: u32| {
            if pick < weight {
                true
            } else {
                pick -= weight;
                false
            }
        };

        if take(w.create) || created == 0 {
            return self.create();
        }
        if take(w.wait_for_io) {
            return EventKind::WaitForIo;
        }
        if take(w.ready_from_io) {
            let job_no = self.rng.random_range(1..=created);
            return EventKind::ReadyFromIo { job_no };
        }
        if take(w.complete) {
            return EventKind::Complete;
        }
        let job_no = self.rng.random_range(1..=created);
        EventKind::Terminate { job_no }
    }

    fn create(&mut self) -> EventKind {
        let (p_lo, p_hi) = self.config.priority_range;
        let (e_lo, e_hi) = self.config.estimate_range;
        EventKind::Create {
            priority: self.rng.random_range(p_lo..=p_hi),
            time_estimate: self.rng.random_range(e_lo..=e_hi),
        }
    }
}

/// Generates one script from `config` with the given seed.
pub fn random_script(config: &WorkloadConfig, seed: u64) -> Result<EventScript, ConfigError> {
    Ok(WorkloadGenerator::new(config.clone(), seed)?.generate())
}
