//! Workspace configuration repository trait.

use async_trait::async_trait;

use super::model::WorkspaceConfig;
use crate::error::Result;

/// Repository for the single workspace configuration record.
#[async_trait]
pub trait WorkspaceConfigRepository: Send + Sync {
    /// Loads the configuration. Returns the default config if none exists.
    async fn load(&self) -> Result<WorkspaceConfig>;

    /// Replaces the stored configuration.
    async fn save(&self, config: &WorkspaceConfig) -> Result<()>;
}
