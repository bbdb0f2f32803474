//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities are compared by identity, never by attribute values. Implementors
/// should not derive `PartialEq`/`Hash` over their fields; collections key
/// entities by `id()` instead.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` is the same entity, regardless of its current state.
    fn is_same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
