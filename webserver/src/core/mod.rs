//! Core business logic, free of I/O

pub mod store;

#[cfg(test)]
mod tests;

pub use store::PitchStore;
