pub mod dto;
pub mod json_catalog_repository;
pub mod json_config_repository;
pub mod memory_gateway;
pub mod paths;
pub mod settings;
pub mod storage;

pub use crate::json_catalog_repository::JsonCatalogRepository;
pub use crate::json_config_repository::JsonWorkspaceConfigRepository;
pub use crate::memory_gateway::InMemoryWorkspaceGateway;
pub use crate::paths::BazaarPaths;
pub use crate::settings::RuntimeSettings;
