//! Entity trait: identity that outlives any single read of the record.

/// Entity marker + minimal interface.
///
/// Two entities with the same id are the same record, whatever the rest of
/// their fields say.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
