//! Display price for the active variant.

use serde::{Deserialize, Serialize};

use caufi_core::{ValueObject, format_price, parse_decimal};

use crate::model::Variant;

/// What the price block on the product page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPrice {
    pub regular_price: f64,
    /// Parsed discount, `None` when absent, unreadable, or not positive.
    pub discount_price: Option<f64>,
    pub has_discount: bool,
    pub display_price: f64,
    pub savings: f64,
    /// Whole percent off the regular price, `0` without a discount.
    pub discount_percent: u32,
    pub is_out_of_stock: bool,
}

impl DisplayPrice {
    /// Formatted current price, e.g. `Rp 80.000`.
    pub fn display_label(&self, currency: &str) -> String {
        format_price(self.display_price, currency)
    }

    /// Formatted struck-through regular price, only when discounted.
    pub fn strike_label(&self, currency: &str) -> Option<String> {
        self.has_discount
            .then(|| format_price(self.regular_price, currency))
    }
}

impl ValueObject for DisplayPrice {}

/// Price the given variant.
///
/// A discount counts only when it is a positive number strictly below the
/// regular price. `"0"` is the admin editor's placeholder for "no discount",
/// so it is never shown as a free item. Only an explicit `stock: 0` marks the
/// variant sold out; unknown stock stays purchasable.
pub fn compute_display_price(variant: &Variant) -> DisplayPrice {
    let regular_price = match parse_decimal(&variant.regular_price) {
        Some(value) => value,
        None => {
            tracing::warn!(
                sku = %variant.sku,
                raw = %variant.regular_price,
                "unreadable regular price, showing 0"
            );
            0.0
        }
    };

    let discount_price = variant
        .discount_price
        .as_deref()
        .and_then(parse_decimal)
        .filter(|d| *d > 0.0);

    let has_discount = discount_price.is_some_and(|d| d < regular_price);
    let (display_price, savings) = match discount_price {
        Some(d) if has_discount => (d, regular_price - d),
        _ => (regular_price, 0.0),
    };

    let discount_percent = if has_discount && regular_price > 0.0 {
        (savings / regular_price * 100.0).round() as u32
    } else {
        0
    };

    DisplayPrice {
        regular_price,
        discount_price,
        has_discount,
        display_price,
        savings,
        discount_percent,
        is_out_of_stock: variant.stock == Some(0),
    }
}

/// Lowest and highest display price over a set of variants (listing cards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn of(variants: &[Variant]) -> Option<Self> {
        variants
            .iter()
            .map(|v| compute_display_price(v).display_price)
            .fold(None, |acc: Option<Self>, p| {
                Some(match acc {
                    None => Self { min: p, max: p },
                    Some(r) => Self {
                        min: r.min.min(p),
                        max: r.max.max(p),
                    },
                })
            })
    }

    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}
