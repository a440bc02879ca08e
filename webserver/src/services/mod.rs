//! Service implementations

pub mod client_registry;

#[cfg(test)]
mod tests;

pub use client_registry::RealClientRegistry;
