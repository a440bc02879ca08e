//! Resolver service implementations

pub mod scoring_client;

#[cfg(test)]
pub mod tests;

pub use scoring_client::*;
