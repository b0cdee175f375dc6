pub mod capability;
pub mod catalog;
pub mod config;
pub mod error;
pub mod workspace;

// Re-export common error type
pub use error::BazaarError;

/// Maximum number of entries any selection list presents to an actor.
pub const SELECTION_LIMIT: usize = 25;
