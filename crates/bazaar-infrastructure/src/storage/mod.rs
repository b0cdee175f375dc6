//! File storage primitives shared by the JSON repositories.

pub mod atomic_json;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};

use bazaar_core::error::{BazaarError, Result};

/// Runs a blocking storage closure on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BazaarError::internal(format!("Failed to join storage task: {}", e)))?
}
