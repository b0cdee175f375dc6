//! Workspace configuration use cases and the purchase counter.

use bazaar_core::SELECTION_LIMIT;
use bazaar_core::capability::{CapabilityGuard, Caller};
use bazaar_core::config::{PAYMENT_INFO_MAX_LEN, WorkspaceConfig, WorkspaceConfigRepository};
use bazaar_core::error::{BazaarError, Result};
use bazaar_core::workspace::{ContainerId, ContainerRef, WorkspaceGateway, WorkspaceId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Owns the process-wide [`WorkspaceConfig`].
///
/// The configuration is loaded once and cached. Every mutation runs as
/// clone, modify, save, swap under one mutex: a failed save leaves the cached
/// value untouched, and no other mutation can interleave between the read and
/// the persisted write.
pub struct WorkspaceSettingsService {
    repository: Arc<dyn WorkspaceConfigRepository>,
    gateway: Arc<dyn WorkspaceGateway>,
    guard: Arc<dyn CapabilityGuard>,
    config: Mutex<WorkspaceConfig>,
}

impl WorkspaceSettingsService {
    /// Loads the configuration from `repository`.
    pub async fn load(
        repository: Arc<dyn WorkspaceConfigRepository>,
        gateway: Arc<dyn WorkspaceGateway>,
        guard: Arc<dyn CapabilityGuard>,
    ) -> Result<Self> {
        let config = repository.load().await?;
        tracing::debug!(
            container = ?config.container_id,
            counters = config.purchase_counters.len(),
            "[WorkspaceSettings] Loaded workspace config"
        );

        Ok(Self {
            repository,
            gateway,
            guard,
            config: Mutex::new(config),
        })
    }

    /// A copy of the current configuration.
    pub async fn snapshot(&self) -> WorkspaceConfig {
        self.config.lock().await.clone()
    }

    pub async fn payment_info(&self) -> String {
        self.config.lock().await.payment_info.clone()
    }

    /// Current purchase counter of `workspace`.
    pub async fn counter(&self, workspace: WorkspaceId) -> u64 {
        self.config.lock().await.counter(workspace)
    }

    /// Lists the containers a transaction channel may be created under.
    pub async fn available_containers(&self, caller: &Caller) -> Result<Vec<ContainerRef>> {
        self.guard.require(caller, "list containers")?;
        let mut containers = self.gateway.list_containers(caller.workspace.id).await?;
        containers.truncate(SELECTION_LIMIT);
        Ok(containers)
    }

    /// Sets the container new transaction channels are created under.
    ///
    /// The container must be one the workspace currently lists.
    pub async fn configure_container(
        &self,
        caller: &Caller,
        container_id: ContainerId,
    ) -> Result<ContainerRef> {
        self.guard.require(caller, "configure container")?;

        let container = self
            .gateway
            .list_containers(caller.workspace.id)
            .await?
            .into_iter()
            .find(|c| c.id == container_id)
            .ok_or_else(|| BazaarError::category_not_found(container_id))?;

        self.update(|config| config.container_id = Some(container.id))
            .await?;

        tracing::info!(
            actor = %caller.actor.id,
            container = %container.id,
            "[WorkspaceSettings] Container set to '{}'",
            container.name
        );
        Ok(container)
    }

    /// Replaces the payment instructions shown to buyers.
    pub async fn configure_payment_info(&self, caller: &Caller, text: &str) -> Result<()> {
        self.guard.require(caller, "configure payment info")?;

        let length = text.chars().count();
        if length > PAYMENT_INFO_MAX_LEN {
            return Err(BazaarError::config(format!(
                "Payment info is {} characters long, the limit is {}",
                length, PAYMENT_INFO_MAX_LEN
            )));
        }

        let text = text.to_string();
        self.update(move |config| config.payment_info = text).await?;

        tracing::info!(actor = %caller.actor.id, "[WorkspaceSettings] Payment info updated");
        Ok(())
    }

    /// Resolves the configured container in `workspace`.
    ///
    /// Fails with `CategoryUnset` when none is configured and with
    /// `CategoryNotFound` when the workspace no longer lists it.
    pub async fn resolve_container(&self, workspace: WorkspaceId) -> Result<ContainerRef> {
        let container_id = self
            .config
            .lock()
            .await
            .container_id
            .ok_or(BazaarError::CategoryUnset)?;

        self.gateway
            .list_containers(workspace)
            .await?
            .into_iter()
            .find(|c| c.id == container_id)
            .ok_or_else(|| BazaarError::category_not_found(container_id))
    }

    /// Returns the purchase counter of `workspace` and persists its increment.
    ///
    /// Read, increment and save happen under the config mutex, so two
    /// purchases can never obtain the same value.
    pub async fn next_sequence(&self, workspace: WorkspaceId) -> Result<u64> {
        let mut config = self.config.lock().await;
        let mut next = config.clone();
        let sequence = next.take_sequence(workspace);
        self.repository.save(&next).await?;
        *config = next;

        tracing::debug!(workspace = %workspace, sequence, "[WorkspaceSettings] Allocated sequence");
        Ok(sequence)
    }

    async fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut WorkspaceConfig),
    {
        let mut config = self.config.lock().await;
        let mut next = config.clone();
        mutate(&mut next);
        self.repository.save(&next).await?;
        *config = next;
        Ok(())
    }
}
