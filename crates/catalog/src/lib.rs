//! Catalog domain module for the storefront product page.
//!
//! Pure derivations over product data already fetched from the backend (no IO,
//! no HTTP, no UI framework): which swatches and sizes to offer, which variant
//! is active for the shopper's selection, and what price to show.

pub mod gallery;
pub mod matrix;
pub mod model;
pub mod pricing;
pub mod resolver;
pub mod selection;

pub use gallery::{ordered_images, primary_image};
pub use matrix::{generate_variant_matrix, selected_colors, selected_sizes};
pub use model::{ColorOption, Material, Product, ProductImage, Variant};
pub use pricing::{DisplayPrice, PriceRange, compute_display_price};
pub use resolver::VariantResolver;
pub use selection::{DerivedView, Selection, resolve_selection};
