//! Catalog domain models and repository trait.
//!
//! The catalog holds single products and multi-option bundles. Records are
//! never deleted; edits replace scalar fields in place.

mod draft;
mod model;
mod repository;

pub use draft::{AuthoringSession, BundleDraft, SessionKey};
pub use model::{
    Bundle, BundleOption, DEFAULT_OPTION_EMOJI, DEFAULT_PANEL_ICON, ImageDisplay, OptionFields,
    PanelFields, Product, ProductFields, PurchaseItem, PurchaseSource, new_bundle_id,
    new_product_id,
};
pub use repository::CatalogRepository;
