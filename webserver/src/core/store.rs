//! In-memory pitch store
//!
//! Pure business logic with no I/O dependencies. The store keeps pitches in
//! insertion order and publishes a [`StoreEvent`] for every content change.
//! It does no locking of its own; the owner serializes access.

use shared::{Pitch, PitchId, StoreEvent, StoreSnapshot};
use tokio::sync::broadcast;

/// Buffered change events per subscriber before slow readers start lagging
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Ordered collection of scored pitches, alive for the lifetime of the process
#[derive(Debug)]
pub struct PitchStore {
    pitches: Vec<Pitch>,
    revision: u64,
    events: broadcast::Sender<StoreEvent>,
}

impl PitchStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            pitches: Vec::new(),
            revision: 0,
            events,
        }
    }

    /// Receive every change made after this call
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Append a pitch. Ids are not checked for uniqueness.
    pub fn add(&mut self, pitch: Pitch) {
        self.pitches.push(pitch.clone());
        let revision = self.bump();
        self.publish(StoreEvent::Added { revision, pitch });
    }

    /// Replace the fields of the entry with `id`, keeping its position and id.
    ///
    /// Returns false (and changes nothing) if no entry matches.
    pub fn update(&mut self, id: &PitchId, pitch: Pitch) -> bool {
        let Some(existing) = self.pitches.iter_mut().find(|p| &p.id == id) else {
            return false;
        };

        *existing = Pitch { id: existing.id.clone(), ..pitch };
        let updated = existing.clone();
        let revision = self.bump();
        self.publish(StoreEvent::Updated { revision, pitch: updated });
        true
    }

    /// Remove the first entry with `id`. Returns false if none matched.
    pub fn remove(&mut self, id: &PitchId) -> bool {
        let Some(index) = self.pitches.iter().position(|p| &p.id == id) else {
            return false;
        };

        self.pitches.remove(index);
        let revision = self.bump();
        self.publish(StoreEvent::Removed { revision, id: id.clone() });
        true
    }

    /// Drop every pitch
    pub fn clear(&mut self) {
        self.pitches.clear();
        let revision = self.bump();
        self.publish(StoreEvent::Cleared { revision });
    }

    /// Snapshot of the current contents in insertion order
    pub fn list(&self) -> Vec<Pitch> {
        self.pitches.clone()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            revision: self.revision,
            pitches: self.list(),
        }
    }

    pub fn get(&self, id: &PitchId) -> Option<&Pitch> {
        self.pitches.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PitchId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Number of content changes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

impl Default for PitchStore {
    fn default() -> Self {
        Self::new()
    }
}
