//! Shopping cart module.
//!
//! Client-side cart view model: line pricing, stock hints and the order
//! summary, implemented purely as deterministic logic (no IO, no HTTP). The
//! backend stays the source of truth for the stored cart.

pub mod cart;

pub use cart::{Cart, CartLine, CartSummary, DEFAULT_LOW_STOCK_THRESHOLD, LinePricing, StockHint};
