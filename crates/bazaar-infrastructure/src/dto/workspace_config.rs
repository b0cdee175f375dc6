//! Workspace configuration record stored in `config.json`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use bazaar_core::config::{DEFAULT_PAYMENT_INFO, WorkspaceConfig};
use bazaar_core::workspace::ContainerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfigRecord {
    #[serde(default)]
    pub container_id: Option<u64>,
    #[serde(default = "default_payment_info")]
    pub payment_info: String,
    #[serde(default)]
    pub purchase_counters: BTreeMap<String, u64>,
}

fn default_payment_info() -> String {
    DEFAULT_PAYMENT_INFO.to_string()
}

impl From<WorkspaceConfigRecord> for WorkspaceConfig {
    fn from(record: WorkspaceConfigRecord) -> Self {
        WorkspaceConfig {
            container_id: record.container_id.map(ContainerId),
            payment_info: record.payment_info,
            purchase_counters: record.purchase_counters,
        }
    }
}

impl From<&WorkspaceConfig> for WorkspaceConfigRecord {
    fn from(config: &WorkspaceConfig) -> Self {
        WorkspaceConfigRecord {
            container_id: config.container_id.map(|c| c.0),
            payment_info: config.payment_info.clone(),
            purchase_counters: config.purchase_counters.clone(),
        }
    }
}
