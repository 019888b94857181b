//! `cart`: per-line pricing and the order summary for a cart document.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use caufi_cart::{Cart, CartLine, CartSummary, LinePricing, StockHint};
use caufi_core::format_price;
use serde::{Deserialize, Serialize};

use super::{read_json, to_pretty_json};
use crate::config::PdpConfig;

/// Cart as stored by the backend: either `{"lines": [...]}` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CartDocument {
    Wrapped { lines: Vec<CartLine> },
    Lines(Vec<CartLine>),
}

impl CartDocument {
    pub fn into_lines(self) -> Vec<CartLine> {
        match self {
            Self::Wrapped { lines } | Self::Lines(lines) => lines,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReport {
    pub product_name: String,
    pub sku: String,
    pub option_label: String,
    pub quantity: u32,
    pub pricing: LinePricing,
    pub stock_hint: StockHint,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartReport {
    pub currency: String,
    pub lines: Vec<LineReport>,
    pub summary: CartSummary,
}

pub fn run(path: &Path, json: bool, config: &PdpConfig) -> anyhow::Result<String> {
    let document: CartDocument = read_json(path)?;
    let cart = Cart::from_lines(document.into_lines())
        .with_context(|| format!("invalid cart in {}", path.display()))?;
    let report = build_report(&cart, config);
    if json {
        to_pretty_json(&report)
    } else {
        Ok(render_human(&report))
    }
}

pub fn build_report(cart: &Cart, config: &PdpConfig) -> CartReport {
    let lines = cart
        .lines()
        .iter()
        .map(|line| LineReport {
            product_name: line.product_name.clone(),
            sku: line.variant.sku.clone(),
            option_label: line.option_label(),
            quantity: line.quantity,
            pricing: line.pricing(),
            stock_hint: line.stock_hint(config.low_stock_threshold),
        })
        .collect();

    CartReport {
        currency: config.currency.clone(),
        lines,
        summary: cart.summary(),
    }
}

pub fn render_human(report: &CartReport) -> String {
    let currency = report.currency.as_str();
    let mut out = String::new();

    if report.lines.is_empty() {
        let _ = writeln!(out, "Cart is empty");
    }

    for line in &report.lines {
        let _ = write!(out, "{} x{} [{}]", line.product_name, line.quantity, line.sku);
        if !line.option_label.is_empty() {
            let _ = write!(out, " {}", line.option_label);
        }
        let _ = write!(out, ": {}", format_price(line.pricing.line_total, currency));
        if line.pricing.line_savings > 0.0 {
            let _ = write!(out, " (save {})", format_price(line.pricing.line_savings, currency));
        }
        match line.stock_hint {
            StockHint::Available => {}
            StockHint::LowStock { remaining } => {
                let _ = write!(out, " - only {remaining} more available");
            }
            StockHint::AtLimit => {
                let _ = write!(out, " - maximum stock reached");
            }
        }
        out.push('\n');
    }

    let summary = &report.summary;
    let _ = writeln!(out, "Items: {}", summary.total_items);
    let _ = writeln!(out, "Subtotal: {}", format_price(summary.subtotal, currency));
    if summary.has_savings {
        let _ = writeln!(out, "You save: {}", format_price(summary.total_savings, currency));
    }
    let _ = writeln!(out, "Shipping: Free");
    let _ = write!(out, "Total: {}", format_price(summary.total, currency));
    out
}
