//! Catalog use cases: single products, listings and purchase resolution.

use bazaar_core::SELECTION_LIMIT;
use bazaar_core::capability::{CapabilityGuard, Caller};
use bazaar_core::catalog::{Bundle, CatalogRepository, Product, ProductFields, PurchaseItem};
use bazaar_core::error::{BazaarError, Result};
use bazaar_core::workspace::ContainerId;
use std::sync::Arc;

use crate::settings_service::WorkspaceSettingsService;

/// What the setup panel shows an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOverview {
    pub container: Option<ContainerId>,
    /// Whether the payment text differs from the placeholder.
    pub payment_configured: bool,
    pub products: usize,
    pub bundles: usize,
}

pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
    settings: Arc<WorkspaceSettingsService>,
    guard: Arc<dyn CapabilityGuard>,
}

impl CatalogService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        settings: Arc<WorkspaceSettingsService>,
        guard: Arc<dyn CapabilityGuard>,
    ) -> Self {
        Self {
            catalog,
            settings,
            guard,
        }
    }

    pub async fn create_product(&self, caller: &Caller, fields: ProductFields) -> Result<Product> {
        self.guard.require(caller, "create product")?;

        let product = self.catalog.insert_product(fields).await?;
        tracing::info!(
            actor = %caller.actor.id,
            product_id = %product.id,
            "[Catalog] Created product '{}'",
            product.title
        );
        Ok(product)
    }

    /// Replaces every editable field of a product and stamps `edited_at`.
    pub async fn edit_product(
        &self,
        caller: &Caller,
        id: &str,
        fields: ProductFields,
    ) -> Result<Product> {
        self.guard.require(caller, "edit product")?;

        let mut product = self
            .catalog
            .find_product(id)
            .await?
            .ok_or_else(|| BazaarError::not_found("product", id))?;
        product.apply(fields, chrono::Utc::now().to_rfc3339());
        self.catalog.update_product(&product).await?;

        tracing::info!(actor = %caller.actor.id, product_id = %id, "[Catalog] Edited product");
        Ok(product)
    }

    /// Products in id order, capped at the selection limit.
    pub async fn list_products(&self, caller: &Caller) -> Result<Vec<Product>> {
        self.guard.require(caller, "list products")?;
        let mut products = self.catalog.list_products().await?;
        products.truncate(SELECTION_LIMIT);
        Ok(products)
    }

    /// Bundles in id order, capped at the selection limit.
    pub async fn list_bundles(&self, caller: &Caller) -> Result<Vec<Bundle>> {
        self.guard.require(caller, "list bundles")?;
        let mut bundles = self.catalog.list_bundles().await?;
        bundles.truncate(SELECTION_LIMIT);
        Ok(bundles)
    }

    pub async fn setup_overview(&self, caller: &Caller) -> Result<SetupOverview> {
        self.guard.require(caller, "open setup panel")?;

        let config = self.settings.snapshot().await;
        Ok(SetupOverview {
            container: config.container_id,
            payment_configured: config.payment_configured(),
            products: self.catalog.list_products().await?.len(),
            bundles: self.catalog.list_bundles().await?.len(),
        })
    }

    /// Resolves a buyer's choice of option `index` in a bundle.
    pub async fn bundle_selection(&self, bundle_id: &str, index: usize) -> Result<PurchaseItem> {
        let bundle = self
            .catalog
            .find_bundle(bundle_id)
            .await?
            .ok_or_else(|| BazaarError::not_found("bundle", bundle_id))?;
        bundle.selection(index)
    }

    pub async fn product_item(&self, product_id: &str) -> Result<PurchaseItem> {
        let product = self
            .catalog
            .find_product(product_id)
            .await?
            .ok_or_else(|| BazaarError::not_found("product", product_id))?;
        Ok(PurchaseItem::from(&product))
    }
}
