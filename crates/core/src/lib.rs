//! `caufi-core`: storefront building blocks shared by the domain crates.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no UI framework).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, VariantId};
pub use money::{format_price, parse_decimal, parse_decimal_or_zero};
pub use value_object::ValueObject;
