//! Authoring session state.
//!
//! Sessions live only for the lifetime of the process and are never persisted.

mod registry;

pub use registry::SessionRegistry;
