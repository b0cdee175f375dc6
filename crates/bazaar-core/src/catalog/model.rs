//! Catalog domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SELECTION_LIMIT;
use crate::error::{BazaarError, Result};

/// Icon used for a bundle panel when the author leaves it blank.
pub const DEFAULT_PANEL_ICON: &str = "📦";

/// Emoji used for a bundle option when the author leaves it blank.
pub const DEFAULT_OPTION_EMOJI: &str = "💎";

const PRODUCT_ID_PREFIX: &str = "prod_";
const BUNDLE_ID_PREFIX: &str = "drop_";

/// Generates a fresh product identifier.
pub fn new_product_id() -> String {
    format!("{}{}", PRODUCT_ID_PREFIX, Uuid::new_v4().simple())
}

/// Generates a fresh bundle identifier.
pub fn new_bundle_id() -> String {
    format!("{}{}", BUNDLE_ID_PREFIX, Uuid::new_v4().simple())
}

/// Where an image is displayed relative to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageDisplay {
    #[default]
    AboveText,
    BelowText,
}

/// A single sellable product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Decimal price as entered by the author. Not validated.
    pub price: String,
    pub image_url: Option<String>,
    pub image_display: ImageDisplay,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last edit timestamp (RFC 3339).
    pub edited_at: Option<String>,
}

impl Product {
    /// Replaces every editable field and stamps the edit time.
    pub fn apply(&mut self, fields: ProductFields, now: String) {
        let fields = fields.normalized();
        self.title = fields.title;
        self.description = fields.description;
        self.price = fields.price;
        self.image_url = fields.image_url;
        self.image_display = fields.image_display;
        self.edited_at = Some(now);
    }
}

/// Author input for creating or editing a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
    pub image_display: ImageDisplay,
}

impl ProductFields {
    /// Treats a blank image url as absent.
    pub fn normalized(mut self) -> Self {
        self.image_url = non_blank(self.image_url);
        self
    }

    pub fn into_product(self, id: String, now: String) -> Product {
        let fields = self.normalized();
        Product {
            id,
            title: fields.title,
            description: fields.description,
            price: fields.price,
            image_url: fields.image_url,
            image_display: fields.image_display,
            created_at: now,
            edited_at: None,
        }
    }
}

/// One mutually exclusive choice inside a bundle. Position is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOption {
    pub name: String,
    pub description: String,
    pub price: String,
    pub emoji: String,
}

impl BundleOption {
    /// Description shown when the author does not provide one.
    pub fn default_description(price: &str) -> String {
        format!("Price: {}", price)
    }
}

/// Author input for one bundle option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionFields {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub emoji: Option<String>,
}

impl OptionFields {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            ..Self::default()
        }
    }

    /// Applies defaults for the optional inputs.
    pub fn into_option(self) -> BundleOption {
        let description = non_blank(self.description)
            .unwrap_or_else(|| BundleOption::default_description(&self.price));
        BundleOption {
            name: self.name,
            description,
            price: self.price,
            emoji: non_blank(self.emoji).unwrap_or_else(|| DEFAULT_OPTION_EMOJI.to_string()),
        }
    }
}

/// Author input for the scalar panel fields of a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelFields {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub image_display: ImageDisplay,
}

impl PanelFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub(crate) fn icon_or_default(&self) -> String {
        non_blank(self.icon.clone()).unwrap_or_else(|| DEFAULT_PANEL_ICON.to_string())
    }
}

/// A sellable panel of priced options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub image_url: Option<String>,
    pub image_display: ImageDisplay,
    pub options: Vec<BundleOption>,
    pub created_at: String,
    pub edited_at: Option<String>,
}

impl Bundle {
    /// Replaces the scalar panel fields. Options are left untouched.
    pub fn apply_panel(&mut self, fields: PanelFields, now: String) {
        self.icon = fields.icon_or_default();
        self.title = fields.title;
        self.description = fields.description;
        self.image_url = non_blank(fields.image_url);
        self.image_display = fields.image_display;
        self.edited_at = Some(now);
    }

    /// Options a buyer can pick from, in order.
    pub fn selectable_options(&self) -> &[BundleOption] {
        &self.options[..self.options.len().min(SELECTION_LIMIT)]
    }

    /// Resolves a buyer's positional choice into a purchasable item.
    pub fn selection(&self, index: usize) -> Result<PurchaseItem> {
        let option = self.selectable_options().get(index).ok_or_else(|| {
            BazaarError::InvalidSelection(format!(
                "bundle '{}' has no option at position {}",
                self.id, index
            ))
        })?;

        Ok(PurchaseItem {
            source: PurchaseSource::BundleOption {
                bundle_id: self.id.clone(),
                index,
            },
            title: format!("{} - {}", self.title, option.name),
            description: format!("{}\n\nSelected option: {}", self.description, option.name),
            price: option.price.clone(),
            image_url: self.image_url.clone(),
            image_display: self.image_display,
        })
    }
}

/// What a purchase refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseSource {
    Product(String),
    BundleOption { bundle_id: String, index: usize },
}

/// A concrete item a buyer is purchasing, resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseItem {
    pub source: PurchaseSource,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
    pub image_display: ImageDisplay,
}

impl From<&Product> for PurchaseItem {
    fn from(product: &Product) -> Self {
        PurchaseItem {
            source: PurchaseSource::Product(product.id.clone()),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image_url: product.image_url.clone(),
            image_display: product.image_display,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle_with_options(count: usize) -> Bundle {
        Bundle {
            id: "drop_test".to_string(),
            title: "Rooms".to_string(),
            description: "Pick a pack".to_string(),
            icon: DEFAULT_PANEL_ICON.to_string(),
            image_url: Some("https://img.example/rooms.gif".to_string()),
            image_display: ImageDisplay::BelowText,
            options: (0..count)
                .map(|i| OptionFields::new(format!("{} Rooms", i + 1), "2.90").into_option())
                .collect(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            edited_at: None,
        }
    }

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = new_product_id();
        let b = new_product_id();
        assert!(a.starts_with("prod_"));
        assert!(new_bundle_id().starts_with("drop_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_option_defaults() {
        let option = OptionFields {
            name: "5 Rooms".to_string(),
            description: Some("   ".to_string()),
            price: "2.90".to_string(),
            emoji: None,
        }
        .into_option();

        assert_eq!(option.description, "Price: 2.90");
        assert_eq!(option.emoji, DEFAULT_OPTION_EMOJI);
    }

    #[test]
    fn test_blank_image_url_is_absent() {
        let fields = ProductFields {
            title: "VIP".to_string(),
            image_url: Some(String::new()),
            ..ProductFields::default()
        };
        let product = fields.into_product("prod_1".to_string(), "now".to_string());
        assert_eq!(product.image_url, None);
        assert_eq!(product.image_display, ImageDisplay::AboveText);
    }

    #[test]
    fn test_selection_builds_item_from_option() {
        let bundle = bundle_with_options(3);
        let item = bundle.selection(1).unwrap();

        assert_eq!(item.title, "Rooms - 2 Rooms");
        assert_eq!(item.price, "2.90");
        assert!(item.description.ends_with("Selected option: 2 Rooms"));
        assert_eq!(item.image_display, ImageDisplay::BelowText);
        assert_eq!(
            item.source,
            PurchaseSource::BundleOption {
                bundle_id: "drop_test".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_selection_beyond_visible_options_is_rejected() {
        let bundle = bundle_with_options(30);
        assert_eq!(bundle.selectable_options().len(), SELECTION_LIMIT);
        assert!(bundle.selection(24).is_ok());
        assert!(matches!(
            bundle.selection(25),
            Err(BazaarError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_apply_panel_keeps_options() {
        let mut bundle = bundle_with_options(2);
        bundle.apply_panel(PanelFields::new("New", "Desc"), "later".to_string());

        assert_eq!(bundle.title, "New");
        assert_eq!(bundle.icon, DEFAULT_PANEL_ICON);
        assert_eq!(bundle.image_url, None);
        assert_eq!(bundle.options.len(), 2);
        assert_eq!(bundle.edited_at.as_deref(), Some("later"));
    }
}
