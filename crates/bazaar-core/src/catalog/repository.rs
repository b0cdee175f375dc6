//! Catalog repository trait.

use async_trait::async_trait;

use super::draft::BundleDraft;
use super::model::{Bundle, Product, ProductFields};
use crate::error::Result;

/// Durable keyed store of products and bundles.
///
/// The store generates identifiers for new records. Listings are ordered by
/// identifier so that positional selection lists are stable.
///
/// # Implementation Notes
///
/// - `insert_*` must either persist the record or return an error without
///   leaving a half-written record behind.
/// - `update_*` fails with `NotFound` if the id does not exist.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn find_product(&self, id: &str) -> Result<Option<Product>>;

    /// Creates a product with a freshly generated id.
    async fn insert_product(&self, fields: ProductFields) -> Result<Product>;

    async fn update_product(&self, product: &Product) -> Result<()>;

    async fn list_bundles(&self) -> Result<Vec<Bundle>>;

    async fn find_bundle(&self, id: &str) -> Result<Option<Bundle>>;

    /// Commits a finished draft as a bundle with a freshly generated id.
    async fn insert_bundle(&self, draft: BundleDraft) -> Result<Bundle>;

    async fn update_bundle(&self, bundle: &Bundle) -> Result<()>;
}
