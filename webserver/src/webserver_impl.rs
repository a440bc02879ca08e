//! Main webserver implementation
//!
//! Owns the application state and wires the routes, using dependency injection
//! for the scoring client and the client registry.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use resolver::{ScoringClient, StuffPlusResolver};
use shared::{ServiceId, logging, service_info};

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::traits::ClientRegistry;
use crate::web::handlers::api::{
    add_samples, clear_pitches, create_pitch, delete_pitch, get_pitch, get_pitch_form, get_status, health_check,
    list_pitches, update_pitch, upload_screenshot,
};
use crate::web::handlers::websocket::websocket_handler;

/// Main webserver struct with dependency injection
pub struct WebServer<C: ScoringClient, R: ClientRegistry> {
    bind_address: SocketAddr,
    state: AppState<C, R>,
}

impl<C, R> WebServer<C, R>
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    /// Create a new webserver with an empty pitch store
    pub fn new(bind_address: SocketAddr, resolver: StuffPlusResolver<C>, client_registry: R) -> Self {
        Self {
            bind_address,
            state: AppState::new(resolver, client_registry),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartupFailed {
                address: self.bind_address.to_string(),
                message: e.to_string(),
            })?;

        service_info!(
            ServiceId::current(),
            "🌐 Web server listening on http://{} (scoring via {})",
            self.bind_address,
            self.state.resolver.describe()
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    /// Get server state for external access
    pub fn state(&self) -> &AppState<C, R> {
        &self.state
    }
}

/// Routes over an existing state
pub fn build_router<C, R>(state: AppState<C, R>) -> Router
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    Router::new()
        // Pitch list
        .route(
            "/api/pitches",
            get(list_pitches::<C, R>)
                .post(create_pitch::<C, R>)
                .delete(clear_pitches::<C, R>),
        )
        .route(
            "/api/pitches/:id",
            get(get_pitch::<C, R>)
                .put(update_pitch::<C, R>)
                .delete(delete_pitch::<C, R>),
        )
        .route("/api/pitches/:id/form", get(get_pitch_form::<C, R>))
        .route("/api/samples", post(add_samples::<C, R>))
        .route("/api/screenshots", post(upload_screenshot::<C, R>))
        .route("/api/status", get(get_status::<C, R>))
        // Live list updates
        .route("/ws", get(websocket_handler::<C, R>))
        // Health check
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .into_inner(),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ServiceId::current(), "Received Ctrl+C signal"),
        Err(err) => logging::log_error(ServiceId::current(), "Signal handling", &err),
    }
}
