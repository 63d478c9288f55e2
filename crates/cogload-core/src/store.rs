//! In-memory event repository.
//!
//! Owns the live event collection for a session. Access follows a
//! single-writer discipline: the store has no internal locking, so the
//! owning service must serialize readers and writers around it, holding
//! exclusivity for the whole of an optimize-then-apply sequence. The
//! optimizer itself only ever sees a snapshot or an externally-exclusive
//! mutable borrow.

use crate::cost;
use crate::event::Event;

/// Mutable event collection with explicit access operations.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing collection.
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Borrow the full collection.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Exclusive borrow of the full collection, for an
    /// optimize-then-apply sequence.
    pub fn events_mut(&mut self) -> &mut [Event] {
        &mut self.events
    }

    /// Owned copy of the collection, for simulation.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.clone()
    }

    /// Replace the whole collection.
    pub fn replace(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// Append one event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Remove an event by id, returning it when present.
    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Re-run the canonical proximity cost pass over the collection.
    pub fn recompute_costs(&mut self) {
        cost::apply_proximity(&mut self.events);
    }
}
