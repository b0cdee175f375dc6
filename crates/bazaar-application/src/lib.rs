//! Application layer for the storefront.
//!
//! Use cases that coordinate the domain models in `bazaar-core` with the
//! repositories and the workspace collaborator.

pub mod bundle_builder;
pub mod cart_provisioner;
pub mod catalog_service;
pub mod session;
pub mod settings_service;

pub use bundle_builder::BundleBuilder;
pub use cart_provisioner::{
    Cart, CartProvisioner, CloseOutcome, PaymentInstructions, cart_channel_name,
};
pub use catalog_service::{CatalogService, SetupOverview};
pub use session::SessionRegistry;
pub use settings_service::WorkspaceSettingsService;
