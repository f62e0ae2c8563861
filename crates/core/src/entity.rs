//! Entity trait: identity + continuity across state changes.

use crate::value_object::ValueObject;

/// Entity marker + minimal interface.
///
/// Entities are compared **by identity**: two entities of the same concrete type are
/// the same entity iff their identity value objects compare equal, regardless of any
/// other attribute. Repositories use the identity as their lookup/storage key.
///
/// The trait deliberately does not auto-validate. Each concrete entity decides at
/// which lifecycle points validation runs (creation, mutations of validated fields);
/// toggling an unvalidated flag needs none.
pub trait Entity {
    /// Value-object identifier used as the lookup/storage key.
    type Id: ValueObject + Eq + core::hash::Hash + core::fmt::Display + Send + Sync;

    /// Concrete type name, used to build precise not-found diagnostics without
    /// runtime type introspection.
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn entity_id(&self) -> &Self::Id;

    /// Identity equality: same concrete type (statically enforced by the `&Self`
    /// receiver), same identifier.
    fn same_identity(&self, other: &Self) -> bool {
        self.entity_id() == other.entity_id()
    }
}
