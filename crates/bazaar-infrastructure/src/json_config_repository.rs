//! JSON-file backed workspace configuration repository.
//!
//! File location: `{data_dir}/config.json`

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use bazaar_core::config::{WorkspaceConfig, WorkspaceConfigRepository};
use bazaar_core::error::{BazaarError, Result};

use crate::dto::WorkspaceConfigRecord;
use crate::paths::BazaarPaths;
use crate::storage::{AtomicJsonFile, run_blocking};

pub struct JsonWorkspaceConfigRepository {
    file: Arc<AtomicJsonFile<WorkspaceConfigRecord>>,
}

impl JsonWorkspaceConfigRepository {
    pub fn new(paths: &BazaarPaths) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(paths.config_file())),
        }
    }

    /// Uses `{data_dir}/config.json` (for testing).
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(data_dir.join(BazaarPaths::CONFIG_FILE))),
        }
    }
}

#[async_trait]
impl WorkspaceConfigRepository for JsonWorkspaceConfigRepository {
    async fn load(&self) -> Result<WorkspaceConfig> {
        let file = self.file.clone();
        let record = run_blocking(move || Ok(file.load()?)).await?;

        match record {
            Some(record) => Ok(record.into()),
            None => {
                tracing::debug!("[Config] No config file at {:?}, using defaults", self.file.path());
                Ok(WorkspaceConfig::default())
            }
        }
    }

    async fn save(&self, config: &WorkspaceConfig) -> Result<()> {
        let record = WorkspaceConfigRecord::from(config);
        let file = self.file.clone();
        run_blocking(move || Ok(file.save(&record)?))
            .await
            .map_err(|e| BazaarError::data_access(format!("Failed to save config: {}", e)))
    }
}
