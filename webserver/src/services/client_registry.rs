//! Client registry service implementation
//!
//! Maintains the set of display clients connected over WebSocket.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared::{ServiceId, service_debug};
use tokio::sync::RwLock;

use crate::traits::ClientRegistry;
use crate::types::{ClientConnection, ClientId};

/// Real client registry implementation
#[derive(Clone, Default)]
pub struct RealClientRegistry {
    connections: Arc<RwLock<HashMap<ClientId, ClientConnection>>>,
}

impl RealClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRegistry for RealClientRegistry {
    async fn add_client(&self, connection: ClientConnection) {
        let mut connections = self.connections.write().await;
        let client_id = connection.id.clone();
        connections.insert(client_id.clone(), connection);
        service_debug!(
            ServiceId::current(),
            "📝 Client {} registered, {} connected",
            client_id,
            connections.len()
        );
    }

    async fn remove_client(&self, client_id: &ClientId) {
        let mut connections = self.connections.write().await;
        if connections.remove(client_id).is_some() {
            service_debug!(
                ServiceId::current(),
                "📝 Client {} removed, {} connected",
                client_id,
                connections.len()
            );
        }
    }

    async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    async fn active_clients(&self) -> Vec<ClientId> {
        self.connections.read().await.keys().cloned().collect()
    }
}
