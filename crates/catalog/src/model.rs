//! Product and variant records as served by the storefront API.
//!
//! These are read-only snapshots. Every field the backend may omit has a
//! neutral default so a sparse payload still deserializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use caufi_core::{Entity, ProductId, ValueObject, VariantId, parse_decimal_or_zero};

/// One purchasable color/size combination of a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default)]
    pub id: VariantId,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub hex: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "price_string")]
    pub regular_price: String,
    #[serde(default, deserialize_with = "optional_price_string")]
    pub discount_price: Option<String>,
    #[serde(default)]
    pub sku: String,
}

impl Variant {
    /// Lower-cased color, if the variant has a non-empty one.
    pub fn color_key(&self) -> Option<String> {
        self.color
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase)
    }

    /// Trimmed size, if the variant has a non-blank one.
    pub fn size_key(&self) -> Option<&str> {
        self.size.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Case-insensitive color identity.
    pub fn matches_color(&self, color: &str) -> bool {
        self.color
            .as_deref()
            .is_some_and(|c| c.to_lowercase() == color.to_lowercase())
    }

    /// Whitespace-insensitive size identity.
    pub fn matches_size(&self, size: &str) -> bool {
        self.size.as_deref().is_some_and(|s| s.trim() == size.trim())
    }

    /// Stock is known and positive.
    pub fn in_stock(&self) -> bool {
        self.stock.is_some_and(|s| s > 0)
    }

    /// Regular price as a number; unreadable prices count as `0`.
    pub fn regular_price_value(&self) -> f64 {
        parse_decimal_or_zero(&self.regular_price)
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A selectable color swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub hex: String,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }

    /// Swatch label: first character upper-cased, rest as stored.
    pub fn label(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl ValueObject for ColorOption {}

/// Material tag (e.g. "Cotton").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material {
    pub material: String,
}

/// Product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(alias = "url")]
    pub image_url: String,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
}

/// Catalog product with its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub motif: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "material")]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// Sum of known stock across variants.
    pub fn total_stock(&self) -> i64 {
        self.variants
            .iter()
            .filter_map(|v| v.stock)
            .filter(|s| *s > 0)
            .sum()
    }

    /// Active and at least one variant that is not explicitly sold out.
    pub fn is_purchasable(&self) -> bool {
        self.is_active && self.variants.iter().any(|v| v.stock != Some(0))
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Prices arrive as decimal strings, but some endpoints send bare numbers.
fn price_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_price_string(deserializer)?.unwrap_or_default())
}

fn optional_price_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawPrice>::deserialize(deserializer)?;
    Ok(raw.map(|p| match p {
        RawPrice::Text(s) => s,
        RawPrice::Int(n) => n.to_string(),
        RawPrice::Float(n) => n.to_string(),
    }))
}
