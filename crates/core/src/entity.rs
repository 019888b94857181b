//! Entity trait for records that carry a backend identity.

/// A record identified by its backend id rather than by its field values.
///
/// Two snapshots of the same variant (e.g. one embedded in a cart line, one
/// fetched with the product) are the same entity even if price or stock moved.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// True when both records refer to the same backend entity.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
