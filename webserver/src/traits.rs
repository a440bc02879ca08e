//! Service trait definitions for dependency injection

use async_trait::async_trait;

use crate::types::{ClientConnection, ClientId};

/// Tracks display clients connected over WebSocket
#[mockall::automock]
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Register a newly connected client
    async fn add_client(&self, connection: ClientConnection);

    /// Forget a client; unknown ids are ignored
    async fn remove_client(&self, client_id: &ClientId);

    /// Number of connected clients
    async fn connection_count(&self) -> usize;

    /// Ids of connected clients
    async fn active_clients(&self) -> Vec<ClientId>;
}
