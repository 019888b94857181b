//! Variant reconciliation for the product page.
//!
//! Given a product's flat variant list, derive the selectable color swatches,
//! the selectable sizes, which sizes are unavailable for a color, and the
//! variant that backs the current selection.

use std::collections::HashSet;

use crate::model::{ColorOption, Variant};

/// Read-only view over a product's variants, in backend order.
#[derive(Debug, Clone, Copy)]
pub struct VariantResolver<'a> {
    variants: &'a [Variant],
}

impl<'a> VariantResolver<'a> {
    pub fn new(variants: &'a [Variant]) -> Self {
        Self { variants }
    }

    pub fn variants(&self) -> &'a [Variant] {
        self.variants
    }

    /// One swatch per case-insensitive color, first-seen order.
    ///
    /// A variant needs both a non-empty color and a non-empty hex to surface a
    /// swatch. The first qualifying variant decides the spelling and the hex.
    pub fn distinct_colors(&self) -> Vec<ColorOption> {
        let mut seen = HashSet::new();
        let mut colors = Vec::new();

        for variant in self.variants {
            let (Some(name), Some(hex)) = (variant.color.as_deref(), variant.hex.as_deref()) else {
                continue;
            };
            if name.is_empty() || hex.is_empty() {
                continue;
            }
            if seen.insert(name.to_lowercase()) {
                colors.push(ColorOption::new(name, hex));
            }
        }

        colors
    }

    /// Distinct trimmed sizes, sorted.
    pub fn distinct_sizes(&self) -> Vec<String> {
        sorted_unique(self.variants.iter().filter_map(Variant::size_key))
    }

    /// Sorted sizes that have stock for `color`.
    pub fn available_sizes(&self, color: &str) -> Vec<String> {
        sorted_unique(
            self.variants
                .iter()
                .filter(|v| v.matches_color(color) && v.in_stock())
                .filter_map(Variant::size_key),
        )
    }

    /// Sizes from `distinct_sizes` that cannot be picked with `selected_color`.
    ///
    /// Without a selected color nothing is disabled.
    pub fn disabled_sizes(&self, selected_color: Option<&str>, distinct_sizes: &[String]) -> Vec<String> {
        let Some(color) = selected_color else {
            return Vec::new();
        };

        let available: HashSet<String> = self.available_sizes(color).into_iter().collect();
        distinct_sizes
            .iter()
            .filter(|size| !available.contains(size.trim()))
            .cloned()
            .collect()
    }

    /// The variant that backs the selection, with graceful fallback.
    ///
    /// 1. exact color + size match
    /// 2. first variant of the selected color
    /// 3. first variant with a positive regular price
    /// 4. the first variant
    ///
    /// A missing color only matches variants without a color, which keeps
    /// size-only products resolvable. Returns `None` only for an empty list.
    pub fn resolve_active_variant(
        &self,
        selected_color: Option<&str>,
        selected_size: Option<&str>,
    ) -> Option<&'a Variant> {
        if let Some(size) = selected_size {
            let exact = self.variants.iter().find(|v| {
                let color_ok = match selected_color {
                    Some(color) => v.matches_color(color),
                    None => v.color_key().is_none(),
                };
                color_ok && v.matches_size(size)
            });
            if exact.is_some() {
                return exact;
            }
        }

        if let Some(color) = selected_color {
            if let Some(variant) = self.variants.iter().find(|v| v.matches_color(color)) {
                tracing::debug!(color, size = ?selected_size, sku = %variant.sku, "no exact variant; using first of color");
                return Some(variant);
            }
        }

        if let Some(variant) = self.variants.iter().find(|v| v.regular_price_value() > 0.0) {
            tracing::debug!(color = ?selected_color, size = ?selected_size, sku = %variant.sku, "no color match; using first priced variant");
            return Some(variant);
        }

        self.variants.first()
    }
}

fn sorted_unique<'s>(sizes: impl Iterator<Item = &'s str>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for size in sizes {
        if !unique.iter().any(|s| s == size) {
            unique.push(size.to_string());
        }
    }
    unique.sort();
    unique
}
