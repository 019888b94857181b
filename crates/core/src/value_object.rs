//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A color swatch
/// `{ name: "Red", hex: "#ff0000" }` or a computed display price is a value
/// object; a catalog variant with its backend id is an entity.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Swatch {
///     name: String,
///     hex: String,
/// }
///
/// impl ValueObject for Swatch {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
