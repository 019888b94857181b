use serde::{Deserialize, Serialize};

use caufi_catalog::{DisplayPrice, Product, Variant, compute_display_price};
use caufi_core::{DomainError, DomainResult, Entity, VariantId};

/// Quantity at or above `stock - threshold` shows an "only N left" hint.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// One variant in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_name: String,
    #[serde(default)]
    pub product_slug: String,
    pub variant: Variant,
    pub quantity: u32,
}

/// Pricing of a single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePricing {
    pub unit: DisplayPrice,
    pub line_total: f64,
    pub line_savings: f64,
}

/// Stock message shown under a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StockHint {
    Available,
    LowStock { remaining: i64 },
    AtLimit,
}

impl CartLine {
    pub fn new(product: &Product, variant: &Variant, quantity: u32) -> Self {
        Self {
            product_name: product.name.clone(),
            product_slug: product.slug.clone(),
            variant: variant.clone(),
            quantity,
        }
    }

    pub fn variant_id(&self) -> VariantId {
        self.variant.id
    }

    /// "Red • Size M", dropping whichever attribute is missing.
    pub fn option_label(&self) -> String {
        let color = self.variant.color.as_deref().filter(|c| !c.is_empty());
        let size = self.variant.size_key();
        match (color, size) {
            (Some(c), Some(s)) => format!("{c} • Size {s}"),
            (Some(c), None) => c.to_string(),
            (None, Some(s)) => format!("Size {s}"),
            (None, None) => String::new(),
        }
    }

    pub fn pricing(&self) -> LinePricing {
        let unit = compute_display_price(&self.variant);
        let qty = f64::from(self.quantity);
        LinePricing {
            line_total: unit.display_price * qty,
            line_savings: unit.savings * qty,
            unit,
        }
    }

    pub fn stock_hint(&self, threshold: i64) -> StockHint {
        let Some(stock) = self.variant.stock else {
            return StockHint::Available;
        };
        let qty = i64::from(self.quantity);
        if qty >= stock {
            StockHint::AtLimit
        } else if qty >= stock - threshold {
            StockHint::LowStock { remaining: stock - qty }
        } else {
            StockHint::Available
        }
    }

    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    pub fn can_increment(&self) -> bool {
        self.variant
            .stock
            .is_none_or(|stock| i64::from(self.quantity) < stock)
    }
}

/// Cart totals as shown in the order summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_items: u32,
    pub subtotal: f64,
    pub total_savings: f64,
    pub has_savings: bool,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

/// Ordered collection of cart lines, one per variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines as sent by the backend, merging duplicates.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> DomainResult<Self> {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line)?;
        }
        Ok(cart)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, variant_id: VariantId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.variant_id() == variant_id)
    }

    /// Add a line, merging into an existing line for the same variant.
    ///
    /// Saved variants merge by id. Unsaved ones (id `0`) merge only on an
    /// identical non-empty SKU, otherwise they are appended.
    pub fn add(&mut self, line: CartLine) -> DomainResult<()> {
        if line.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if line.variant.stock.is_some_and(|s| s <= 0) {
            return Err(DomainError::validation(format!(
                "variant {} is sold out",
                line.variant.sku
            )));
        }

        match self.lines.iter_mut().find(|l| same_cart_variant(&l.variant, &line.variant)) {
            Some(existing) => {
                let merged = existing
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or_else(|| DomainError::validation("quantity overflow"))?;
                ensure_within_stock(&line.variant, merged)?;
                existing.quantity = merged;
                existing.variant = line.variant;
                tracing::debug!(variant_id = %existing.variant.id, quantity = merged, "merged cart line");
            }
            None => {
                ensure_within_stock(&line.variant, line.quantity)?;
                tracing::debug!(variant_id = %line.variant.id, quantity = line.quantity, "added cart line");
                self.lines.push(line);
            }
        }
        Ok(())
    }

    /// Set the quantity of an existing line (stepper buttons).
    pub fn update_quantity(&mut self, variant_id: VariantId, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.variant_id() == variant_id)
            .ok_or_else(DomainError::not_found)?;
        ensure_within_stock(&line.variant, quantity)?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, variant_id: VariantId) -> DomainResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.variant_id() == variant_id)
            .ok_or_else(DomainError::not_found)?;
        Ok(self.lines.remove(index))
    }

    /// Totals for the summary panel. Shipping is free and tax is not charged.
    pub fn summary(&self) -> CartSummary {
        let mut total_items = 0u32;
        let mut subtotal = 0.0;
        let mut total_savings = 0.0;

        for line in &self.lines {
            let pricing = line.pricing();
            total_items = total_items.saturating_add(line.quantity);
            subtotal += pricing.line_total;
            total_savings += pricing.line_savings;
        }

        let shipping = 0.0;
        let tax = 0.0;
        CartSummary {
            total_items,
            subtotal,
            total_savings,
            has_savings: total_savings > 0.0,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

fn same_cart_variant(existing: &Variant, incoming: &Variant) -> bool {
    match (existing.id.is_unsaved(), incoming.id.is_unsaved()) {
        (false, false) => existing.same_entity(incoming),
        (true, true) => !incoming.sku.is_empty() && existing.sku == incoming.sku,
        _ => false,
    }
}

fn ensure_within_stock(variant: &Variant, quantity: u32) -> DomainResult<()> {
    match variant.stock {
        Some(stock) if i64::from(quantity) > stock => Err(DomainError::validation(format!(
            "only {} left in stock for {}",
            stock.max(0),
            variant.sku
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: i64, stock: Option<i64>, regular: &str, discount: Option<&str>) -> Variant {
        Variant {
            id: VariantId::new(id),
            color: Some("Red".to_string()),
            hex: Some("#ff0000".to_string()),
            size: Some("M".to_string()),
            stock,
            regular_price: regular.to_string(),
            discount_price: discount.map(str::to_string),
            sku: format!("SKU-{id}"),
        }
    }

    fn line(id: i64, stock: Option<i64>, quantity: u32) -> CartLine {
        CartLine {
            product_name: "Batik Shirt".to_string(),
            product_slug: "batik-shirt".to_string(),
            variant: variant(id, stock, "100", Some("80")),
            quantity,
        }
    }

    #[test]
    fn add_appends_new_variant() {
        let mut cart = Cart::new();
        cart.add(line(1, Some(10), 2)).unwrap();
        cart.add(line(2, None, 1)).unwrap();
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn add_merges_same_variant() {
        let mut cart = Cart::new();
        cart.add(line(1, Some(10), 2)).unwrap();
        cart.add(line(1, Some(10), 3)).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(VariantId::new(1)).map(|l| l.quantity), Some(5));
    }

    #[test]
    fn add_rejects_zero_quantity() {
        let err = Cart::new().add(line(1, Some(10), 0)).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for zero quantity"),
        }
    }

    #[test]
    fn add_rejects_sold_out_variant() {
        let err = Cart::new().add(line(1, Some(0), 1)).unwrap_err();
        assert_eq!(err, DomainError::validation("variant SKU-1 is sold out"));
    }

    #[test]
    fn add_rejects_merge_beyond_stock() {
        let mut cart = Cart::new();
        cart.add(line(1, Some(3), 2)).unwrap();
        let err = cart.add(line(1, Some(3), 2)).unwrap_err();
        assert_eq!(err, DomainError::validation("only 3 left in stock for SKU-1"));
        assert_eq!(cart.line(VariantId::new(1)).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn unsaved_variants_are_not_merged_by_id() {
        let mut shirt = line(0, None, 1);
        shirt.product_name = "Shirt".to_string();
        shirt.variant = variant(0, None, "100", None);
        shirt.variant.sku = "SHIRT-M".to_string();
        let mut scarf = line(0, None, 2);
        scarf.product_name = "Scarf".to_string();
        scarf.variant = variant(0, None, "10", None);
        scarf.variant.sku = "SCARF".to_string();

        let cart = Cart::from_lines(vec![shirt, scarf]).unwrap();
        let rows: Vec<_> = cart
            .lines()
            .iter()
            .map(|l| (l.product_name.as_str(), l.variant.sku.as_str(), l.quantity))
            .collect();
        assert_eq!(rows, vec![("Shirt", "SHIRT-M", 1), ("Scarf", "SCARF", 2)]);
        assert_eq!(cart.summary().subtotal, 120.0);
    }

    #[test]
    fn unsaved_variants_merge_on_same_sku() {
        let mut first = line(0, None, 1);
        first.variant.sku = "SHIRT-M".to_string();
        let mut again = line(0, None, 2);
        again.variant.sku = "SHIRT-M".to_string();
        let mut blank = line(0, None, 1);
        blank.variant.sku = String::new();
        let mut blank_again = line(0, None, 1);
        blank_again.variant.sku = String::new();

        let cart = Cart::from_lines(vec![first, again, blank, blank_again]).unwrap();
        let quantities: Vec<u32> = cart.lines().iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![3, 1, 1]);
    }

    #[test]
    fn update_quantity_enforces_bounds() {
        let mut cart = Cart::from_lines(vec![line(1, Some(4), 1)]).unwrap();
        cart.update_quantity(VariantId::new(1), 4).unwrap();
        assert!(matches!(cart.update_quantity(VariantId::new(1), 0), Err(DomainError::Validation(_))));
        assert!(matches!(cart.update_quantity(VariantId::new(1), 5), Err(DomainError::Validation(_))));
        assert_eq!(cart.update_quantity(VariantId::new(9), 1), Err(DomainError::NotFound));
        assert_eq!(cart.line(VariantId::new(1)).map(|l| l.quantity), Some(4));
    }

    #[test]
    fn remove_returns_line_or_not_found() {
        let mut cart = Cart::from_lines(vec![line(1, None, 1), line(2, None, 1)]).unwrap();
        let removed = cart.remove(VariantId::new(1)).unwrap();
        assert_eq!(removed.variant_id(), VariantId::new(1));
        assert_eq!(cart.remove(VariantId::new(1)), Err(DomainError::NotFound));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn line_pricing_multiplies_unit_price() {
        let pricing = line(1, None, 3).pricing();
        assert_eq!(pricing.unit.display_price, 80.0);
        assert_eq!(pricing.line_total, 240.0);
        assert_eq!(pricing.line_savings, 60.0);
    }

    #[test]
    fn stock_hints_follow_threshold() {
        assert_eq!(line(1, Some(20), 2).stock_hint(5), StockHint::Available);
        assert_eq!(line(1, Some(8), 3).stock_hint(5), StockHint::LowStock { remaining: 5 });
        assert_eq!(line(1, Some(8), 7).stock_hint(5), StockHint::LowStock { remaining: 1 });
        assert_eq!(line(1, Some(8), 8).stock_hint(5), StockHint::AtLimit);
        assert_eq!(line(1, None, 99).stock_hint(5), StockHint::Available);
    }

    #[test]
    fn stepper_guards() {
        assert!(!line(1, Some(5), 1).can_decrement());
        assert!(line(1, Some(5), 2).can_decrement());
        assert!(line(1, Some(5), 4).can_increment());
        assert!(!line(1, Some(5), 5).can_increment());
        assert!(line(1, None, 500).can_increment());
    }

    #[test]
    fn option_label_drops_missing_parts() {
        let mut l = line(1, None, 1);
        assert_eq!(l.option_label(), "Red • Size M");
        l.variant.size = None;
        assert_eq!(l.option_label(), "Red");
        l.variant.color = None;
        l.variant.size = Some("42".into());
        assert_eq!(l.option_label(), "Size 42");
    }

    #[test]
    fn summary_adds_up_lines() {
        let mut full_price = line(2, None, 1);
        full_price.variant = variant(2, None, "50", Some("0"));
        let cart = Cart::from_lines(vec![line(1, None, 2), full_price]).unwrap();

        let summary = cart.summary();
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.subtotal, 210.0);
        assert_eq!(summary.total_savings, 40.0);
        assert!(summary.has_savings);
        assert_eq!(summary.total, 210.0);
    }

    #[test]
    fn empty_cart_summary() {
        let summary = Cart::new().summary();
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total, 0.0);
        assert!(!summary.has_savings);
    }

    #[test]
    fn stock_hint_serializes_with_status_tag() {
        let json = serde_json::to_value(StockHint::LowStock { remaining: 2 }).unwrap();
        assert_eq!(json["status"], "lowStock");
        assert_eq!(json["remaining"], 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: summary totals equal the sum of line totals.
            #[test]
            fn summary_matches_line_totals(
                rows in prop::collection::vec((1u32..20, 1u32..500, proptest::option::of(1u32..500)), 0..8),
            ) {
                let lines: Vec<CartLine> = rows
                    .iter()
                    .enumerate()
                    .map(|(i, (qty, regular, discount))| CartLine {
                        product_name: format!("Product {i}"),
                        product_slug: format!("product-{i}"),
                        variant: variant(i as i64 + 1, None, &regular.to_string(), discount.map(|d| d.to_string()).as_deref()),
                        quantity: *qty,
                    })
                    .collect();
                let cart = Cart::from_lines(lines.clone()).unwrap();
                let summary = cart.summary();

                let expected_total: f64 = lines.iter().map(|l| l.pricing().line_total).sum();
                let expected_items: u32 = lines.iter().map(|l| l.quantity).sum();
                prop_assert_eq!(summary.subtotal, expected_total);
                prop_assert_eq!(summary.total_items, expected_items);
                prop_assert!(summary.total_savings >= 0.0);
            }
        }
    }
}
