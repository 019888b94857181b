//! `matrix`: regenerate a product's variant list from color and size attributes.

use std::path::Path;

use anyhow::bail;
use caufi_catalog::{ColorOption, Product, Variant, generate_variant_matrix};

use super::{read_json, to_pretty_json};

/// Parse a `NAME=HEX` color argument, e.g. `Red=#ff0000`.
pub fn parse_color_arg(raw: &str) -> anyhow::Result<ColorOption> {
    let Some((name, hex)) = raw.split_once('=') else {
        bail!("color `{raw}` must be written as NAME=HEX");
    };
    let (name, hex) = (name.trim(), hex.trim());
    if name.is_empty() {
        bail!("color `{raw}` has an empty name");
    }
    Ok(ColorOption::new(name, hex))
}

pub fn regenerate(product: &Product, colors: &[ColorOption], sizes: &[String]) -> Vec<Variant> {
    let variants = generate_variant_matrix(&product.variants, colors, sizes);
    let kept = variants.iter().filter(|v| !v.id.is_unsaved()).count();
    tracing::info!(
        product = %product.slug,
        total = variants.len(),
        kept,
        drafts = variants.len() - kept,
        "regenerated variant matrix"
    );
    variants
}

pub fn run(path: &Path, colors: &[String], sizes: &[String]) -> anyhow::Result<String> {
    let product: Product = read_json(path)?;
    let colors = colors
        .iter()
        .map(|raw| parse_color_arg(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let sizes: Vec<String> = sizes
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    to_pretty_json(&regenerate(&product, &colors, &sizes))
}
