//! Shopper selection on one product page and the view derived from it.
//!
//! The UI layer owns a [`Selection`], forwards swatch/size clicks to it, and
//! re-renders from [`resolve_selection`]. Everything here is synchronous and
//! free of UI framework types.

use serde::{Deserialize, Serialize};

use crate::model::{ColorOption, Variant};
use crate::pricing::{DisplayPrice, compute_display_price};
use crate::resolver::VariantResolver;

/// Selected color and size.
///
/// Invariant: a selected size always has stock in the selected color. With
/// no color selected (size-only products) any offered size may be selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    selected_color: Option<String>,
    selected_size: Option<String>,
}

impl Selection {
    /// Nothing selected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Selection on page mount: first swatch, then its first available size.
    pub fn initial(variants: &[Variant]) -> Self {
        let mut selection = Self::empty();
        if let Some(first) = VariantResolver::new(variants).distinct_colors().into_iter().next() {
            selection.select_color(variants, &first.name);
        }
        selection
    }

    /// Rebuild a selection from outside input (deep link, CLI flags).
    ///
    /// Starts from [`Selection::initial`]; a requested color or size that
    /// cannot be selected is ignored.
    pub fn restore(variants: &[Variant], color: Option<&str>, size: Option<&str>) -> Self {
        let mut selection = Self::initial(variants);
        if let Some(color) = color {
            selection.select_color(variants, color);
        }
        if let Some(size) = size {
            selection.select_size(variants, size);
        }
        selection
    }

    pub fn selected_color(&self) -> Option<&str> {
        self.selected_color.as_deref()
    }

    pub fn selected_size(&self) -> Option<&str> {
        self.selected_size.as_deref()
    }

    /// Switch to `color` and reconcile the size.
    ///
    /// The previous size survives if it has stock in the new color; otherwise
    /// the first available size (sorted) is picked, or none. Returns `false`
    /// and changes nothing when `color` is not an offered swatch.
    pub fn select_color(&mut self, variants: &[Variant], color: &str) -> bool {
        let resolver = VariantResolver::new(variants);
        let Some(swatch) = find_swatch(&resolver.distinct_colors(), color) else {
            tracing::debug!(color, "ignoring selection of unoffered color");
            return false;
        };

        let available = resolver.available_sizes(&swatch.name);
        let keep = self
            .selected_size
            .as_deref()
            .map(str::trim)
            .filter(|prev| available.iter().any(|s| s == prev))
            .map(str::to_string);

        self.selected_size = keep.or_else(|| available.into_iter().next());
        self.selected_color = Some(swatch.name);
        true
    }

    /// Select `size` if it is offered and not disabled for the current color.
    ///
    /// Returns `false` and changes nothing otherwise.
    pub fn select_size(&mut self, variants: &[Variant], size: &str) -> bool {
        let resolver = VariantResolver::new(variants);
        let wanted = size.trim();
        let sizes = resolver.distinct_sizes();

        if !sizes.iter().any(|s| s == wanted) {
            tracing::debug!(size = wanted, "ignoring selection of unknown size");
            return false;
        }
        let disabled = resolver.disabled_sizes(self.selected_color(), &sizes);
        if disabled.iter().any(|s| s == wanted) {
            tracing::debug!(size = wanted, color = ?self.selected_color, "ignoring selection of disabled size");
            return false;
        }

        self.selected_size = Some(wanted.to_string());
        true
    }
}

fn find_swatch(colors: &[ColorOption], color: &str) -> Option<ColorOption> {
    let key = color.to_lowercase();
    colors.iter().find(|c| c.name.to_lowercase() == key).cloned()
}

/// Everything the product page renders from a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub colors: Vec<ColorOption>,
    pub sizes: Vec<String>,
    pub disabled_sizes: Vec<String>,
    pub selection: Selection,
    pub active_variant: Option<Variant>,
    pub price: Option<DisplayPrice>,
}

impl DerivedView {
    pub fn is_size_disabled(&self, size: &str) -> bool {
        self.disabled_sizes.iter().any(|s| s == size.trim())
    }

    /// Add-to-cart is possible: a variant resolved and it is not sold out.
    pub fn can_add_to_cart(&self) -> bool {
        self.price.as_ref().is_some_and(|p| !p.is_out_of_stock)
    }
}

/// Derive the product-page view for `selection`.
pub fn resolve_selection(selection: &Selection, variants: &[Variant]) -> DerivedView {
    let resolver = VariantResolver::new(variants);
    let colors = resolver.distinct_colors();
    let sizes = resolver.distinct_sizes();
    let disabled_sizes = resolver.disabled_sizes(selection.selected_color(), &sizes);
    let active_variant = resolver.resolve_active_variant(selection.selected_color(), selection.selected_size());

    DerivedView {
        colors,
        sizes,
        disabled_sizes,
        selection: selection.clone(),
        price: active_variant.map(compute_display_price),
        active_variant: active_variant.cloned(),
    }
}
