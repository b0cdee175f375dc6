//! Persisted record layouts.
//!
//! Records carry no version field. Missing optional fields fall back to the
//! domain defaults when a file written by an older build is loaded.

pub mod catalog;
pub mod workspace_config;

pub use catalog::{BundleOptionRecord, BundleRecord, ProductRecord};
pub use workspace_config::WorkspaceConfigRecord;
