//! Webserver library for the Stuff+ pitch tracker
//!
//! Hosts the in-memory pitch store behind a REST API and pushes every store
//! change to display clients over WebSocket.

pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use crate::core::PitchStore;
pub use error::{WebServerError, WebServerResult};
pub use state::AppState;
pub use types::*;
pub use webserver_impl::{WebServer, build_router};

// Re-export trait definitions
pub use traits::{ClientRegistry, MockClientRegistry};

// Re-export service implementations
pub use services::RealClientRegistry;
