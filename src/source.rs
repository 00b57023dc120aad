//! Event sources.
//!
//! An [`EventSource`] tells the scheduler which external events fire at
//! each tick and when the last one fires. [`EventScript`] is the in-memory
//! implementation: a time-sorted list of typed events that external
//! adapters can build directly or deserialize with serde.

use serde::{Deserialize, Serialize};

use crate::models::{ExternalEvent, Tick};

/// Supplier of scheduled external events.
pub trait EventSource {
    /// Time of the last scheduled event. `None` when nothing is scheduled.
    fn max_event_time(&self) -> Option<Tick>;

    /// All events scheduled exactly at `time`, in script order.
    fn events_at(&self, time: Tick) -> &[ExternalEvent];

    /// The first event scheduled exactly at `time`.
    fn event_at(&self, time: Tick) -> Option<&ExternalEvent> {
        self.events_at(time).first()
    }
}

/// A time-ordered event script.
///
/// Events are stably sorted by time on construction, so events sharing a
/// tick keep their relative order.
///
/// # Example
///
/// ```
/// use u_schedsim::{EventScript, EventSource, ExternalEvent};
///
/// let script = EventScript::new(vec![
///     ExternalEvent::complete(4),
///     ExternalEvent::create(0, 1, 5),
/// ]);
/// assert_eq!(script.max_event_time(), Some(4));
/// assert!(script.event_at(0).is_some());
/// assert!(script.event_at(2).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ExternalEvent>", into = "Vec<ExternalEvent>")]
pub struct EventScript {
    events: Vec<ExternalEvent>,
}

impl EventScript {
    /// Creates a script from events in any order.
    pub fn new(mut events: Vec<ExternalEvent>) -> Self {
        events.sort_by_key(|e| e.time);
        Self { events }
    }

    /// Appends an event, keeping time order.
    pub fn with_event(mut self, event: ExternalEvent) -> Self {
        let at = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(at, event);
        self
    }

    /// All events in time order.
    pub fn events(&self) -> &[ExternalEvent] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the script has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for EventScript {
    fn max_event_time(&self) -> Option<Tick> {
        self.events.last().map(|e| e.time)
    }

    fn events_at(&self, time: Tick) -> &[ExternalEvent] {
        let start = self.events.partition_point(|e| e.time < time);
        let end = self.events.partition_point(|e| e.time <= time);
        &self.events[start..end]
    }
}

impl From<Vec<ExternalEvent>> for EventScript {
    fn from(events: Vec<ExternalEvent>) -> Self {
        Self::new(events)
    }
}

impl From<EventScript> for Vec<ExternalEvent> {
    fn from(script: EventScript) -> Self {
        script.events
    }
}

impl FromIterator<ExternalEvent> for EventScript {
    fn from_iter<I: IntoIterator<Item = ExternalEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
