//! Shared types for the Stuff+ pitch scoring system
//!
//! Holds the pitch data model, the local scoring formula, form normalization
//! and the logging setup used by both the resolver and the webserver.

pub mod config;
pub mod errors;
pub mod form;
pub mod logging;
pub mod messages;
pub mod scoring;
pub mod types;

pub use config::ScoringEndpoint;
pub use errors::*;
pub use form::PitchForm;
pub use types::*;

pub use messages::{PredictResponse, ScreenshotResponse, ScreenshotScore, StoreEvent, StoreSnapshot};
