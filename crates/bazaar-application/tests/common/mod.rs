//! Shared fixtures for the application scenario tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Notify;

use bazaar_application::{
    BundleBuilder, CartProvisioner, CatalogService, WorkspaceSettingsService,
};
use bazaar_core::BazaarError;
use bazaar_core::capability::{Caller, OwnerOrAdministrator};
use bazaar_core::catalog::{
    Bundle, BundleDraft, CatalogRepository, ImageDisplay, Product, ProductFields,
};
use bazaar_core::config::{WorkspaceConfig, WorkspaceConfigRepository};
use bazaar_core::error::Result;
use bazaar_core::workspace::{
    AccessList, Actor, ActorId, ChannelPost, ChannelRef, ContainerId, ContainerRef,
    WorkspaceGateway, WorkspaceId, WorkspaceInfo,
};
use bazaar_infrastructure::{
    InMemoryWorkspaceGateway, JsonCatalogRepository, JsonWorkspaceConfigRepository,
};

pub const WS: WorkspaceId = WorkspaceId(1);
pub const OWNER: ActorId = ActorId(100);
pub const ADMIN: ActorId = ActorId(101);
pub const MEMBER: ActorId = ActorId(102);
pub const BUYER: ActorId = ActorId(200);
pub const SERVICE: ActorId = ActorId(999);
pub const CONTAINER: ContainerId = ContainerId(10);

pub fn workspace() -> WorkspaceInfo {
    WorkspaceInfo {
        id: WS,
        owner_id: OWNER,
    }
}

pub fn container() -> ContainerRef {
    ContainerRef {
        id: CONTAINER,
        name: "Carts".to_string(),
    }
}

pub fn owner() -> Caller {
    Caller::new(Actor::new(OWNER, "owner"), workspace())
}

pub fn admin() -> Caller {
    Caller::new(Actor::administrator(ADMIN, "admin"), workspace())
}

/// A workspace member without the administrator capability.
pub fn member() -> Caller {
    Caller::new(Actor::new(MEMBER, "member"), workspace())
}

pub fn buyer() -> Actor {
    Actor::new(BUYER, "alice")
}

pub fn product_fields(title: &str, price: &str) -> ProductFields {
    ProductFields {
        title: title.to_string(),
        description: format!("{} description", title),
        price: price.to_string(),
        image_url: None,
        image_display: ImageDisplay::AboveText,
    }
}

/// Catalog that can be told to fail bundle inserts.
pub struct FlakyCatalog {
    inner: JsonCatalogRepository,
    fail_inserts: AtomicBool,
}

impl FlakyCatalog {
    pub fn new(inner: JsonCatalogRepository) -> Self {
        Self {
            inner,
            fail_inserts: AtomicBool::new(false),
        }
    }

    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogRepository for FlakyCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.inner.list_products().await
    }

    async fn find_product(&self, id: &str) -> Result<Option<Product>> {
        self.inner.find_product(id).await
    }

    async fn insert_product(&self, fields: ProductFields) -> Result<Product> {
        self.inner.insert_product(fields).await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.inner.update_product(product).await
    }

    async fn list_bundles(&self) -> Result<Vec<Bundle>> {
        self.inner.list_bundles().await
    }

    async fn find_bundle(&self, id: &str) -> Result<Option<Bundle>> {
        self.inner.find_bundle(id).await
    }

    async fn insert_bundle(&self, draft: BundleDraft) -> Result<Bundle> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(BazaarError::io("disk full"));
        }
        self.inner.insert_bundle(draft).await
    }

    async fn update_bundle(&self, bundle: &Bundle) -> Result<()> {
        self.inner.update_bundle(bundle).await
    }
}

/// Config repository that can be told to fail saves.
pub struct FlakyConfig {
    inner: JsonWorkspaceConfigRepository,
    fail_saves: AtomicBool,
}

impl FlakyConfig {
    pub fn new(inner: JsonWorkspaceConfigRepository) -> Self {
        Self {
            inner,
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl WorkspaceConfigRepository for FlakyConfig {
    async fn load(&self) -> Result<WorkspaceConfig> {
        self.inner.load().await
    }

    async fn save(&self, config: &WorkspaceConfig) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BazaarError::data_access("disk full"));
        }
        self.inner.save(config).await
    }
}

/// Gateway whose first channel creation suspends until released.
pub struct SuspendingGateway {
    pub inner: Arc<InMemoryWorkspaceGateway>,
    pub entered: Notify,
    pub release: Notify,
    suspended: AtomicBool,
}

impl SuspendingGateway {
    pub fn new(inner: Arc<InMemoryWorkspaceGateway>) -> Self {
        Self {
            inner,
            entered: Notify::new(),
            release: Notify::new(),
            suspended: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl WorkspaceGateway for SuspendingGateway {
    async fn list_containers(&self, workspace: WorkspaceId) -> Result<Vec<ContainerRef>> {
        self.inner.list_containers(workspace).await
    }

    async fn create_private_channel(
        &self,
        workspace: WorkspaceId,
        container: &ContainerRef,
        name: &str,
        access: &AccessList,
    ) -> Result<ChannelRef> {
        if !self.suspended.swap(true, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner
            .create_private_channel(workspace, container, name, access)
            .await
    }

    async fn delete_channel(&self, channel: &ChannelRef) -> Result<()> {
        self.inner.delete_channel(channel).await
    }

    async fn post(&self, channel: &ChannelRef, post: ChannelPost) -> Result<()> {
        self.inner.post(channel, post).await
    }

    async fn list_administrators(&self, workspace: WorkspaceId) -> Result<Vec<ActorId>> {
        self.inner.list_administrators(workspace).await
    }
}

pub fn local_gateway() -> InMemoryWorkspaceGateway {
    InMemoryWorkspaceGateway::new()
        .with_containers(WS, vec![container()])
        .with_administrators(WS, vec![ADMIN, ActorId(103), ActorId(104), ActorId(105)])
}

/// The whole application wired against a temporary data directory.
pub struct Fixture {
    pub temp_dir: TempDir,
    /// Backing in-process workspace, for inspecting channels.
    pub local: Arc<InMemoryWorkspaceGateway>,
    pub gateway: Arc<dyn WorkspaceGateway>,
    pub catalog: Arc<FlakyCatalog>,
    pub config_repo: Arc<FlakyConfig>,
    pub settings: Arc<WorkspaceSettingsService>,
    pub builder: BundleBuilder,
    pub catalog_service: CatalogService,
    pub provisioner: CartProvisioner,
}

impl Fixture {
    pub async fn new() -> Self {
        let local = Arc::new(local_gateway());
        Self::build(WorkspaceConfig::default(), local.clone(), local).await
    }

    /// A fixture with `container()` configured and the counter of `WS` at `counter`.
    pub async fn configured(counter: u64) -> Self {
        let local = Arc::new(local_gateway());
        Self::build(configured_config(counter), local.clone(), local).await
    }

    pub async fn build(
        config: WorkspaceConfig,
        local: Arc<InMemoryWorkspaceGateway>,
        gateway: Arc<dyn WorkspaceGateway>,
    ) -> Self {
        let temp_dir = TempDir::new().unwrap();

        let config_repo = Arc::new(FlakyConfig::new(JsonWorkspaceConfigRepository::in_dir(
            temp_dir.path(),
        )));
        config_repo.save(&config).await.unwrap();

        let catalog = Arc::new(FlakyCatalog::new(
            JsonCatalogRepository::open_in(temp_dir.path()).await.unwrap(),
        ));
        let guard = Arc::new(OwnerOrAdministrator);

        let settings = Arc::new(
            WorkspaceSettingsService::load(config_repo.clone(), gateway.clone(), guard.clone())
                .await
                .unwrap(),
        );
        let builder = BundleBuilder::new(catalog.clone(), guard.clone());
        let catalog_service = CatalogService::new(catalog.clone(), settings.clone(), guard.clone());
        let provisioner = CartProvisioner::new(settings.clone(), gateway.clone(), guard, SERVICE)
            .with_close_grace(Duration::from_millis(20));

        Self {
            temp_dir,
            local,
            gateway,
            catalog,
            config_repo,
            settings,
            builder,
            catalog_service,
            provisioner,
        }
    }

    /// Reads the persisted config back from disk.
    pub async fn persisted_config(&self) -> WorkspaceConfig {
        JsonWorkspaceConfigRepository::in_dir(self.temp_dir.path())
            .load()
            .await
            .unwrap()
    }
}

pub fn configured_config(counter: u64) -> WorkspaceConfig {
    let mut config = WorkspaceConfig::default();
    config.container_id = Some(CONTAINER);
    config
        .purchase_counters
        .insert(WS.to_string(), counter);
    config
}
