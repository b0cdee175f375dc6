//! Wires the application services against the local data directory.

use anyhow::{Context, Result};
use std::sync::Arc;

use bazaar_application::{BundleBuilder, CartProvisioner, CatalogService, WorkspaceSettingsService};
use bazaar_core::capability::{Caller, OwnerOrAdministrator};
use bazaar_core::workspace::{Actor, ActorId};
use bazaar_infrastructure::{
    InMemoryWorkspaceGateway, JsonCatalogRepository, JsonWorkspaceConfigRepository,
    RuntimeSettings,
};

pub struct App {
    /// Every command runs as the workspace owner.
    pub caller: Caller,
    pub settings: Arc<WorkspaceSettingsService>,
    pub catalog: CatalogService,
    pub builder: BundleBuilder,
    pub provisioner: CartProvisioner,
}

impl App {
    pub async fn init(runtime: RuntimeSettings) -> Result<Self> {
        let paths = runtime.paths().context("Failed to resolve data directory")?;
        let workspace = runtime.workspace.info();

        let gateway = Arc::new(
            InMemoryWorkspaceGateway::new()
                .with_containers(workspace.id, runtime.workspace.container_refs())
                .with_administrators(
                    workspace.id,
                    runtime
                        .workspace
                        .administrators
                        .iter()
                        .copied()
                        .map(ActorId)
                        .collect(),
                ),
        );
        let guard = Arc::new(OwnerOrAdministrator);

        let catalog_repo = Arc::new(
            JsonCatalogRepository::open(&paths)
                .await
                .with_context(|| format!("Failed to open catalog in {:?}", paths.data_dir()))?,
        );
        let config_repo = Arc::new(JsonWorkspaceConfigRepository::new(&paths));

        let settings = Arc::new(
            WorkspaceSettingsService::load(config_repo, gateway.clone(), guard.clone())
                .await
                .context("Failed to load workspace config")?,
        );
        let catalog = CatalogService::new(catalog_repo.clone(), settings.clone(), guard.clone());
        let builder = BundleBuilder::new(catalog_repo, guard.clone())
            .with_session_ttl(runtime.session_ttl());
        let provisioner = CartProvisioner::new(
            settings.clone(),
            gateway,
            guard,
            ActorId(runtime.workspace.service_actor_id),
        )
        .with_close_grace(runtime.close_grace());

        tracing::debug!(workspace = %workspace.id, "[App] Initialized");

        Ok(Self {
            caller: Caller::new(Actor::new(workspace.owner_id, "owner"), workspace),
            settings,
            catalog,
            builder,
            provisioner,
        })
    }
}
