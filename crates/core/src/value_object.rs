//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An order line
/// asking for 10 units of `RED-CHAIR` for order `o1` is equal to every other
/// such order line; a batch, by contrast, is an entity and keeps its identity
/// while its allocations change.
///
/// The trait requires `Eq + Hash + Ord` on top of `Clone + Debug` so value
/// objects can be used directly as set members and map keys, where their
/// structural equality deduplicates repeated values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// struct Quantity(u32);
///
/// impl ValueObject for Quantity {}
///
/// let mut set = std::collections::BTreeSet::new();
/// set.insert(Quantity(3));
/// set.insert(Quantity(3));
/// assert_eq!(set.len(), 1);
/// ```
pub trait ValueObject: Clone + Eq + core::hash::Hash + Ord + core::fmt::Debug {}
