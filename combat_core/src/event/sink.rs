//! Event sinks - append-only fan-out of battle events

use super::BattleEvent;
use crate::error::SinkError;

/// Receives battle events in emission order
///
/// Publishing never fails from the engine's point of view; sinks deal with
/// their own delivery problems.
pub trait EventSink {
    fn publish(&mut self, event: &BattleEvent);
}

/// Collects events in memory
impl EventSink for Vec<BattleEvent> {
    fn publish(&mut self, event: &BattleEvent) {
        self.push(event.clone());
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: &BattleEvent) {}
}

/// One place battle events are written to
pub trait Destination: Send {
    /// Short label used when reporting failures
    fn name(&self) -> &str;

    /// Take one event. An error means only this event was lost for this destination.
    fn accept(&mut self, event: &BattleEvent) -> Result<(), SinkError>;

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Fans every event out to all destinations
///
/// A destination that rejects an event is reported through `tracing` once per
/// rejection and counted; the remaining destinations still receive it.
#[derive(Default)]
pub struct Broadcast {
    destinations: Vec<Box<dyn Destination>>,
    failures: usize,
}

impl Broadcast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destination(mut self, destination: impl Destination + 'static) -> Self {
        self.add(destination);
        self
    }

    pub fn add(&mut self, destination: impl Destination + 'static) {
        self.destinations.push(Box::new(destination));
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Number of rejected deliveries so far
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Flush every destination, reporting failures the same way as publishing
    pub fn flush(&mut self) {
        for destination in &mut self.destinations {
            if let Err(error) = destination.flush() {
                self.failures += 1;
                tracing::warn!(destination = destination.name(), %error, "flush failed");
            }
        }
    }
}

impl EventSink for Broadcast {
    fn publish(&mut self, event: &BattleEvent) {
        for destination in &mut self.destinations {
            if let Err(error) = destination.accept(event) {
                self.failures += 1;
                tracing::warn!(
                    destination = destination.name(),
                    %error,
                    "battle event not delivered"
                );
            }
        }
    }
}

impl std::fmt::Debug for Broadcast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.destinations.iter().map(|d| d.name()).collect();
        f.debug_struct("Broadcast")
            .field("destinations", &names)
            .field("failures", &self.failures)
            .finish()
    }
}
