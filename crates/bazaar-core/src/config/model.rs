//! Workspace configuration model.

use std::collections::BTreeMap;

use crate::workspace::{ContainerId, WorkspaceId};

/// Payment text shown until an administrator configures it.
pub const DEFAULT_PAYMENT_INFO: &str = "Payment details are not configured yet. Ask an administrator to set them up.";

/// Longest payment text an administrator may configure.
pub const PAYMENT_INFO_MAX_LEN: usize = 500;

/// Process-wide storefront settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Container new transaction channels are created under.
    pub container_id: Option<ContainerId>,
    /// Free text shown to buyers as payment instructions.
    pub payment_info: String,
    /// Purchase counters keyed by workspace id rendered as text.
    pub purchase_counters: BTreeMap<String, u64>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            container_id: None,
            payment_info: DEFAULT_PAYMENT_INFO.to_string(),
            purchase_counters: BTreeMap::new(),
        }
    }
}

impl WorkspaceConfig {
    /// Current counter value for a workspace (0 if never used).
    pub fn counter(&self, workspace: WorkspaceId) -> u64 {
        self.purchase_counters
            .get(&workspace.to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Returns the current counter value and advances it by one.
    pub fn take_sequence(&mut self, workspace: WorkspaceId) -> u64 {
        let counter = self
            .purchase_counters
            .entry(workspace.to_string())
            .or_insert(0);
        let current = *counter;
        *counter += 1;
        current
    }

    /// Whether the payment text differs from the placeholder.
    pub fn payment_configured(&self) -> bool {
        self.payment_info != DEFAULT_PAYMENT_INFO
    }
}
