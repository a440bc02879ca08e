//! Stuff+ resolver library
//!
//! Scores pitches against the remote Stuff+ model and falls back to the local
//! linear formula whenever the remote call fails for any reason.

pub mod error;
pub mod resolver_impl;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{ResolverError, ResolverResult};
pub use resolver_impl::{StuffPlusResolver, merge_remote};
pub use services::*;
pub use traits::*;
pub use types::*;
