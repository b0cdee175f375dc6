//! Runtime settings loaded from `bazaar.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use bazaar_core::error::{BazaarError, Result};
use bazaar_core::workspace::{ActorId, ContainerId, ContainerRef, WorkspaceId, WorkspaceInfo};

use crate::paths::BazaarPaths;

/// Process settings. Every key is optional.
///
/// ```toml
/// data_dir = "/var/lib/bazaar"
/// close_grace_secs = 5
/// session_ttl_secs = 900
/// log_filter = "info,bazaar_application=debug"
///
/// [workspace]
/// id = 1
/// owner_id = 100
/// service_actor_id = 999
/// administrators = [101]
///
/// [[workspace.containers]]
/// id = 10
/// name = "Carts"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub data_dir: Option<PathBuf>,
    pub close_grace_secs: u64,
    pub session_ttl_secs: u64,
    pub log_filter: String,
    pub workspace: LocalWorkspaceSettings,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            close_grace_secs: 5,
            session_ttl_secs: 900,
            log_filter: "info".to_string(),
            workspace: LocalWorkspaceSettings::default(),
        }
    }
}

/// Description of the workspace the operator binary acts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalWorkspaceSettings {
    pub id: u64,
    pub owner_id: u64,
    pub service_actor_id: u64,
    pub administrators: Vec<u64>,
    pub containers: Vec<ContainerSetting>,
}

impl Default for LocalWorkspaceSettings {
    fn default() -> Self {
        Self {
            id: 1,
            owner_id: 1,
            service_actor_id: 0,
            administrators: Vec::new(),
            containers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSetting {
    pub id: u64,
    pub name: String,
}

impl LocalWorkspaceSettings {
    pub fn info(&self) -> WorkspaceInfo {
        WorkspaceInfo {
            id: WorkspaceId(self.id),
            owner_id: ActorId(self.owner_id),
        }
    }

    pub fn container_refs(&self) -> Vec<ContainerRef> {
        self.containers
            .iter()
            .map(|c| ContainerRef {
                id: ContainerId(c.id),
                name: c.name.clone(),
            })
            .collect()
    }
}

impl RuntimeSettings {
    /// Loads settings from `path`, or from the default settings file.
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => BazaarPaths::default_settings_file()?,
        };

        if !path.exists() {
            tracing::debug!("[Settings] No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| BazaarError::io(format!("Failed to read {:?}: {}", path, e)))?;
        let settings: RuntimeSettings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn paths(&self) -> Result<BazaarPaths> {
        BazaarPaths::new(self.data_dir.as_deref())
    }

    pub fn close_grace(&self) -> Duration {
        Duration::from_secs(self.close_grace_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}
