//! JSON-file backed catalog repository.
//!
//! File layout: `products.json` and `bundles.json`, each a flat object
//! mapping generated id to record. Both are loaded once at startup and kept
//! in memory; every mutation is written through before it is acknowledged.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use bazaar_core::catalog::{
    Bundle, BundleDraft, CatalogRepository, Product, ProductFields, new_bundle_id, new_product_id,
};
use bazaar_core::error::{BazaarError, Result};

use crate::dto::{BundleRecord, ProductRecord};
use crate::paths::BazaarPaths;
use crate::storage::{AtomicJsonFile, run_blocking};

type ProductFile = AtomicJsonFile<BTreeMap<String, ProductRecord>>;
type BundleFile = AtomicJsonFile<BTreeMap<String, BundleRecord>>;

#[derive(Default)]
struct CatalogState {
    products: BTreeMap<String, Product>,
    bundles: BTreeMap<String, Bundle>,
}

/// Catalog repository storing products and bundles as JSON files.
pub struct JsonCatalogRepository {
    state: RwLock<CatalogState>,
    products_file: Arc<ProductFile>,
    bundles_file: Arc<BundleFile>,
}

impl JsonCatalogRepository {
    /// Opens the catalog in the data directory described by `paths`.
    pub async fn open(paths: &BazaarPaths) -> Result<Self> {
        let products_file = Arc::new(ProductFile::new(paths.products_file()));
        let bundles_file = Arc::new(BundleFile::new(paths.bundles_file()));

        let products = {
            let file = products_file.clone();
            run_blocking(move || Ok(file.load()?.unwrap_or_default())).await?
        };
        let bundles = {
            let file = bundles_file.clone();
            run_blocking(move || Ok(file.load()?.unwrap_or_default())).await?
        };

        let state = CatalogState {
            products: products
                .into_iter()
                .map(|(id, record)| (id.clone(), record.into_domain(id)))
                .collect(),
            bundles: bundles
                .into_iter()
                .map(|(id, record)| (id.clone(), record.into_domain(id)))
                .collect(),
        };

        tracing::info!(
            products = state.products.len(),
            bundles = state.bundles.len(),
            "[Catalog] Loaded catalog from {:?}",
            paths.data_dir()
        );

        Ok(Self {
            state: RwLock::new(state),
            products_file,
            bundles_file,
        })
    }

    /// Opens the catalog stored under `data_dir` (for testing).
    pub async fn open_in(data_dir: &Path) -> Result<Self> {
        Self::open(&BazaarPaths::new(Some(data_dir))?).await
    }

    async fn persist_products(&self, products: &BTreeMap<String, Product>) -> Result<()> {
        let records: BTreeMap<String, ProductRecord> = products
            .iter()
            .map(|(id, p)| (id.clone(), ProductRecord::from(p)))
            .collect();
        let file = self.products_file.clone();
        run_blocking(move || Ok(file.save(&records)?))
            .await
            .map_err(|e| BazaarError::data_access(format!("Failed to save products: {}", e)))
    }

    async fn persist_bundles(&self, bundles: &BTreeMap<String, Bundle>) -> Result<()> {
        let records: BTreeMap<String, BundleRecord> = bundles
            .iter()
            .map(|(id, b)| (id.clone(), BundleRecord::from(b)))
            .collect();
        let file = self.bundles_file.clone();
        run_blocking(move || Ok(file.save(&records)?))
            .await
            .map_err(|e| BazaarError::data_access(format!("Failed to save bundles: {}", e)))
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogRepository {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.state.read().await.products.values().cloned().collect())
    }

    async fn find_product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.get(id).cloned())
    }

    async fn insert_product(&self, fields: ProductFields) -> Result<Product> {
        let product = fields.into_product(new_product_id(), chrono::Utc::now().to_rfc3339());

        // The write lock is held across the save so writers are serialized.
        let mut state = self.state.write().await;
        state.products.insert(product.id.clone(), product.clone());
        if let Err(e) = self.persist_products(&state.products).await {
            state.products.remove(&product.id);
            return Err(e);
        }

        tracing::debug!(product_id = %product.id, "[Catalog] Product inserted");
        Ok(product)
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut state = self.state.write().await;
        let Some(previous) = state.products.get(&product.id).cloned() else {
            return Err(BazaarError::not_found("product", product.id.clone()));
        };

        state.products.insert(product.id.clone(), product.clone());
        if let Err(e) = self.persist_products(&state.products).await {
            state.products.insert(product.id.clone(), previous);
            return Err(e);
        }
        Ok(())
    }

    async fn list_bundles(&self) -> Result<Vec<Bundle>> {
        Ok(self.state.read().await.bundles.values().cloned().collect())
    }

    async fn find_bundle(&self, id: &str) -> Result<Option<Bundle>> {
        Ok(self.state.read().await.bundles.get(id).cloned())
    }

    async fn insert_bundle(&self, draft: BundleDraft) -> Result<Bundle> {
        let bundle = draft.into_bundle(new_bundle_id(), chrono::Utc::now().to_rfc3339());

        let mut state = self.state.write().await;
        state.bundles.insert(bundle.id.clone(), bundle.clone());
        if let Err(e) = self.persist_bundles(&state.bundles).await {
            state.bundles.remove(&bundle.id);
            return Err(e);
        }

        tracing::debug!(bundle_id = %bundle.id, "[Catalog] Bundle inserted");
        Ok(bundle)
    }

    async fn update_bundle(&self, bundle: &Bundle) -> Result<()> {
        let mut state = self.state.write().await;
        let Some(previous) = state.bundles.get(&bundle.id).cloned() else {
            return Err(BazaarError::not_found("bundle", bundle.id.clone()));
        };

        state.bundles.insert(bundle.id.clone(), bundle.clone());
        if let Err(e) = self.persist_bundles(&state.bundles).await {
            state.bundles.insert(bundle.id.clone(), previous);
            return Err(e);
        }
        Ok(())
    }
}
