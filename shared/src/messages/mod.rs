//! Message types exchanged across process boundaries
//!
//! - `scoring`: bodies returned by the remote Stuff+ API
//! - `store`: pitch store change notifications pushed to display clients

pub mod scoring;
pub mod store;

pub use scoring::{PredictResponse, ScreenshotResponse, ScreenshotScore};
pub use store::{StoreEvent, StoreSnapshot};
