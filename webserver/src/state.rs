//! Webserver state shared by every request handler
//!
//! This is the composition root's view of the world: one pitch store, one
//! resolver and one id generator for the lifetime of the process.

use std::sync::Arc;
use std::time::Instant;

use resolver::{ScoringClient, StuffPlusResolver};
use shared::PitchIdGenerator;
use tokio::sync::RwLock;

use crate::core::PitchStore;
use crate::traits::ClientRegistry;

/// Handler state. Cloning shares the same store, resolver and registry.
pub struct AppState<C: ScoringClient, R: ClientRegistry> {
    pub store: Arc<RwLock<PitchStore>>,
    pub resolver: Arc<StuffPlusResolver<C>>,
    pub ids: Arc<PitchIdGenerator>,
    pub clients: Arc<R>,
    pub started_at: Instant,
}

impl<C: ScoringClient, R: ClientRegistry> AppState<C, R> {
    pub fn new(resolver: StuffPlusResolver<C>, clients: R) -> Self {
        Self::with_store(PitchStore::new(), resolver, clients)
    }

    pub fn with_store(store: PitchStore, resolver: StuffPlusResolver<C>, clients: R) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            resolver: Arc::new(resolver),
            ids: Arc::new(PitchIdGenerator::new()),
            clients: Arc::new(clients),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

// Manual impl: a derive would demand C: Clone and R: Clone
impl<C: ScoringClient, R: ClientRegistry> Clone for AppState<C, R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resolver: Arc::clone(&self.resolver),
            ids: Arc::clone(&self.ids),
            clients: Arc::clone(&self.clients),
            started_at: self.started_at,
        }
    }
}
