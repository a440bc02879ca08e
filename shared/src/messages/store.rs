//! Pitch store change notifications

use serde::{Deserialize, Serialize};

use crate::types::{Pitch, PitchId};

/// One content change of the pitch store, tagged with the store revision it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    Added { revision: u64, pitch: Pitch },
    Updated { revision: u64, pitch: Pitch },
    Removed { revision: u64, id: PitchId },
    Cleared { revision: u64 },
}

impl StoreEvent {
    pub fn revision(&self) -> u64 {
        match self {
            StoreEvent::Added { revision, .. }
            | StoreEvent::Updated { revision, .. }
            | StoreEvent::Removed { revision, .. }
            | StoreEvent::Cleared { revision } => *revision,
        }
    }
}

/// Full ordered store contents, sent to display clients when they connect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub revision: u64,
    pub pitches: Vec<Pitch>,
}
