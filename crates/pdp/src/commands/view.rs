//! `view`: the derived product page for a selection.

use std::fmt::Write as _;
use std::path::Path;

use caufi_catalog::{DerivedView, PriceRange, Product, Selection, primary_image, resolve_selection};
use caufi_core::format_price;
use serde::Serialize;

use super::{read_json, to_pretty_json};
use crate::config::PdpConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewReport<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub primary_image: Option<&'a str>,
    pub price_range: Option<PriceRange>,
    pub total_stock: i64,
    pub purchasable: bool,
    pub display_label: Option<String>,
    pub strike_label: Option<String>,
    pub can_add_to_cart: bool,
    pub view: DerivedView,
}

pub fn run(path: &Path, color: Option<&str>, size: Option<&str>, json: bool, config: &PdpConfig) -> anyhow::Result<String> {
    let product: Product = read_json(path)?;
    let report = build_report(&product, color, size, config);
    if json {
        to_pretty_json(&report)
    } else {
        Ok(render_human(&report, config))
    }
}

/// Derive the page for `color`/`size` on top of the mount-time selection.
pub fn build_report<'a>(product: &'a Product, color: Option<&str>, size: Option<&str>, config: &PdpConfig) -> ViewReport<'a> {
    let selection = Selection::restore(&product.variants, color, size);
    let view = resolve_selection(&selection, &product.variants);
    tracing::debug!(
        product = %product.slug,
        color = ?view.selection.selected_color(),
        size = ?view.selection.selected_size(),
        active = ?view.active_variant.as_ref().map(|v| v.sku.as_str()),
        "resolved product page"
    );

    ViewReport {
        name: &product.name,
        slug: &product.slug,
        primary_image: primary_image(&product.images).map(|img| img.image_url.as_str()),
        price_range: PriceRange::of(&product.variants),
        total_stock: product.total_stock(),
        purchasable: product.is_purchasable(),
        display_label: view.price.as_ref().map(|p| p.display_label(&config.currency)),
        strike_label: view.price.as_ref().and_then(|p| p.strike_label(&config.currency)),
        can_add_to_cart: view.can_add_to_cart(),
        view,
    }
}

pub fn render_human(report: &ViewReport<'_>, config: &PdpConfig) -> String {
    let view = &report.view;
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", report.name, report.slug);
    if let Some(range) = &report.price_range {
        if range.is_single() {
            let _ = writeln!(out, "Price range: {}", format_price(range.min, &config.currency));
        } else {
            let _ = writeln!(
                out,
                "Price range: {} - {}",
                format_price(range.min, &config.currency),
                format_price(range.max, &config.currency)
            );
        }
    }

    if report.purchasable {
        let _ = writeln!(out, "Total stock: {}", report.total_stock);
    } else {
        let _ = writeln!(out, "Product unavailable");
    }

    let colors: Vec<String> = view.colors.iter().map(|c| c.label()).collect();
    let _ = writeln!(out, "Colors: {}", list_or_dash(&colors));

    let sizes: Vec<String> = view
        .sizes
        .iter()
        .map(|s| if view.is_size_disabled(s) { format!("{s} (unavailable)") } else { s.clone() })
        .collect();
    let _ = writeln!(out, "Sizes: {}", list_or_dash(&sizes));

    let _ = writeln!(
        out,
        "Selected: {} / {}",
        view.selection.selected_color().unwrap_or("-"),
        view.selection.selected_size().unwrap_or("-")
    );

    match (&view.active_variant, &view.price) {
        (Some(variant), Some(price)) => {
            let _ = writeln!(out, "SKU: {}", variant.sku);
            let mut line = format!("Price: {}", price.display_label(&config.currency));
            if let Some(strike) = price.strike_label(&config.currency) {
                let _ = write!(line, " (was {strike}, -{}%)", price.discount_percent);
            }
            let _ = writeln!(out, "{line}");
            let stock = match variant.stock {
                Some(0) => "sold out".to_string(),
                Some(n) => n.to_string(),
                None => "unknown".to_string(),
            };
            let _ = writeln!(out, "Stock: {stock}");
        }
        _ => {
            let _ = writeln!(out, "No variant matches this selection");
        }
    }

    let _ = write!(out, "Add to cart: {}", if report.can_add_to_cart { "yes" } else { "no" });
    out
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() { "-".to_string() } else { items.join(", ") }
}
