//! WebServer-specific types
//!
//! Browser ↔ WebServer messages stay here; pitch types live in `shared`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{StoreEvent, StoreSnapshot};

/// Connected display client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bookkeeping for one WebSocket display client
#[derive(Debug, Clone)]
pub struct ClientConnection {
    pub id: ClientId,
    pub connected_at: DateTime<Utc>,
    pub user_agent: Option<String>,
}

impl ClientConnection {
    pub fn new(id: ClientId, user_agent: Option<String>) -> Self {
        Self {
            id,
            connected_at: Utc::now(),
            user_agent,
        }
    }
}

/// Messages pushed to display clients over the WebSocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Full list, sent on connect and after a client fell behind
    Snapshot(StoreSnapshot),
    /// One store change
    Change(StoreEvent),
}

/// Body of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub server_status: String,
    pub version: String,
    pub pitch_count: usize,
    pub store_revision: u64,
    pub connected_clients: usize,
    pub scoring_endpoint: String,
    pub uptime_seconds: u64,
}
