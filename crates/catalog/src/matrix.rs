//! Variant matrix for the admin product editor.
//!
//! When the editor's color or size attributes change, the variant list is
//! regenerated as the Cartesian product of colors and sizes. Variants that
//! already exist for a combination keep their id, prices, stock and SKU.

use crate::model::{ColorOption, Variant};
use caufi_core::VariantId;

/// Regenerate the variant list for the given attribute selection.
///
/// - colors and sizes: one variant per (color, size), color-major order
/// - colors only: one color-only variant per color
/// - sizes only: one size-only variant per size
/// - neither: empty
///
/// Existing variants are matched by exact color and size spelling.
pub fn generate_variant_matrix(existing: &[Variant], colors: &[ColorOption], sizes: &[String]) -> Vec<Variant> {
    let mut variants = Vec::with_capacity(colors.len().max(1) * sizes.len().max(1));

    for color in colors {
        for size in sizes {
            let current = existing.iter().find(|v| {
                v.color.as_deref() == Some(color.name.as_str()) && v.size.as_deref() == Some(size.as_str())
            });
            variants.push(draft(
                current,
                Some(color),
                Some(size),
                format!("SKU-{}-{}", color.name, size),
            ));
        }
    }

    if sizes.is_empty() {
        for color in colors {
            let current = existing
                .iter()
                .find(|v| v.color.as_deref() == Some(color.name.as_str()) && is_blank(&v.size));
            variants.push(draft(current, Some(color), None, format!("SKU-{}", color.name)));
        }
    } else if colors.is_empty() {
        for size in sizes {
            let current = existing
                .iter()
                .find(|v| v.size.as_deref() == Some(size.as_str()) && is_blank(&v.color));
            variants.push(draft(current, None, Some(size), format!("SKU-{size}")));
        }
    }

    variants
}

fn draft(current: Option<&Variant>, color: Option<&ColorOption>, size: Option<&String>, sku: String) -> Variant {
    let kept = |field: Option<&str>| field.filter(|s| !s.is_empty()).map(str::to_string);

    Variant {
        id: current.map(|v| v.id).unwrap_or(VariantId::UNSAVED),
        color: color.map(|c| c.name.clone()),
        hex: color.map(|c| c.hex.clone()),
        size: size.cloned(),
        stock: Some(current.and_then(|v| v.stock).unwrap_or(0)),
        regular_price: kept(current.map(|v| v.regular_price.as_str())).unwrap_or_else(|| "0".to_string()),
        discount_price: Some(
            kept(current.and_then(|v| v.discount_price.as_deref())).unwrap_or_else(|| "0".to_string()),
        ),
        sku: kept(current.map(|v| v.sku.as_str())).unwrap_or_else(|| sku.to_uppercase()),
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

/// Colors currently present in the editor's variant list, first-seen order.
pub fn selected_colors(variants: &[Variant]) -> Vec<ColorOption> {
    let mut colors: Vec<ColorOption> = Vec::new();
    for v in variants {
        let Some(name) = v.color.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        if colors.iter().any(|c| c.name == name) {
            continue;
        }
        colors.push(ColorOption::new(name, v.hex.clone().unwrap_or_default()));
    }
    colors
}

/// Sizes currently present in the editor's variant list, first-seen order.
pub fn selected_sizes(variants: &[Variant]) -> Vec<String> {
    let mut sizes: Vec<String> = Vec::new();
    for size in variants.iter().filter_map(|v| v.size.as_deref()).filter(|s| !s.is_empty()) {
        if !sizes.iter().any(|s| s == size) {
            sizes.push(size.to_string());
        }
    }
    sizes
}
