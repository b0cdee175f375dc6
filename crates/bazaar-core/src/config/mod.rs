//! Durable per-workspace storefront configuration.

mod model;
mod repository;

pub use model::{DEFAULT_PAYMENT_INFO, PAYMENT_INFO_MAX_LEN, WorkspaceConfig};
pub use repository::WorkspaceConfigRepository;
