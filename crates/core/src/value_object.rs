//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by value**.
/// They represent concepts where identity doesn't matter - only the values matter.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// ## Immutability
///
/// Value objects should be **immutable** - once created, they don't change. To "modify"
/// a value object, create a new one with the new values. Implementing types expose no
/// mutators; a value object that fails its construction-time validation is never
/// observable.
///
/// ## Design Constraints
///
/// The trait requires:
/// - **Clone**: Value objects should be cheap to copy (they're values, not references)
/// - **PartialEq**: Value objects are compared by their attribute values
/// - **Debug**: Value objects should be debuggable (helpful for logging, testing)
///
/// Deriving `PartialEq` over all attributes gives structural equality; comparing a
/// value object against a different concrete type is ruled out at compile time, so
/// equality can never raise.
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Money {
///     amount: i64,
///     currency: String,
/// }
///
/// impl ValueObject for Money {}
///
/// let m1 = Money { amount: 100, currency: "USD".to_string() };
/// let m2 = Money { amount: 100, currency: "USD".to_string() };
/// assert_eq!(m1, m2);  // Equal by value, not identity
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
