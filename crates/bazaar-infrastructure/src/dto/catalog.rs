//! Catalog records, keyed by id in `products.json` and `bundles.json`.

use serde::{Deserialize, Serialize};

use bazaar_core::catalog::{
    Bundle, BundleOption, DEFAULT_OPTION_EMOJI, DEFAULT_PANEL_ICON, ImageDisplay, Product,
};

/// Stored form of a [`Product`]. The id is the map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_display: ImageDisplay,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
}

impl ProductRecord {
    pub fn into_domain(self, id: String) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            image_display: self.image_display,
            created_at: self.created_at,
            edited_at: self.edited_at,
        }
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image_url: product.image_url.clone(),
            image_display: product.image_display,
            created_at: product.created_at.clone(),
            edited_at: product.edited_at.clone(),
        }
    }
}

/// Stored form of a [`BundleOption`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleOptionRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: String,
    #[serde(default = "default_option_emoji")]
    pub emoji: String,
}

impl From<BundleOptionRecord> for BundleOption {
    fn from(record: BundleOptionRecord) -> Self {
        let description = record
            .description
            .unwrap_or_else(|| BundleOption::default_description(&record.price));
        BundleOption {
            name: record.name,
            description,
            price: record.price,
            emoji: record.emoji,
        }
    }
}

impl From<&BundleOption> for BundleOptionRecord {
    fn from(option: &BundleOption) -> Self {
        BundleOptionRecord {
            name: option.name.clone(),
            description: Some(option.description.clone()),
            price: option.price.clone(),
            emoji: option.emoji.clone(),
        }
    }
}

/// Stored form of a [`Bundle`]. The id is the map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleRecord {
    pub title: String,
    pub description: String,
    #[serde(default = "default_panel_icon")]
    pub icon: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_display: ImageDisplay,
    #[serde(default)]
    pub options: Vec<BundleOptionRecord>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
}

impl BundleRecord {
    pub fn into_domain(self, id: String) -> Bundle {
        Bundle {
            id,
            title: self.title,
            description: self.description,
            icon: self.icon,
            image_url: self.image_url,
            image_display: self.image_display,
            options: self.options.into_iter().map(Into::into).collect(),
            created_at: self.created_at,
            edited_at: self.edited_at,
        }
    }
}

impl From<&Bundle> for BundleRecord {
    fn from(bundle: &Bundle) -> Self {
        BundleRecord {
            title: bundle.title.clone(),
            description: bundle.description.clone(),
            icon: bundle.icon.clone(),
            image_url: bundle.image_url.clone(),
            image_display: bundle.image_display,
            options: bundle.options.iter().map(Into::into).collect(),
            created_at: bundle.created_at.clone(),
            edited_at: bundle.edited_at.clone(),
        }
    }
}

fn default_panel_icon() -> String {
    DEFAULT_PANEL_ICON.to_string()
}

fn default_option_emoji() -> String {
    DEFAULT_OPTION_EMOJI.to_string()
}
