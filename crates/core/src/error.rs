//! Domain error model.
//!
//! Keep this focused on deterministic, business/domain failures (malformed
//! identifiers, constraint violations, missing records). Every error carries its
//! structured payload; callers inspect the payload rather than parsing messages.

use thiserror::Error;

use crate::entity::Entity;
use crate::validation::FieldsError;

/// A caller-supplied identifier string failed UUID validation.
///
/// Raised synchronously at value-object construction; the caller must supply a valid
/// string or omit it to auto-generate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID must be a valid UUID: {id}")]
pub struct InvalidUuidError {
    /// The rejected input, verbatim.
    pub id: String,
}

impl InvalidUuidError {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// One or more field constraints were violated.
///
/// Carries the full per-field message map; this is the single error channel for all
/// constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation Error")]
pub struct EntityValidationError {
    pub error: FieldsError,
}

impl EntityValidationError {
    pub fn new(error: FieldsError) -> Self {
        Self { error }
    }

    /// Number of distinct invalid fields.
    pub fn count(&self) -> usize {
        self.error.count()
    }
}

/// An update or delete targeted an identity absent from the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity_kind} Not Found using ID {id}")]
pub struct NotFoundError {
    /// Display form of the missing identifier.
    pub id: String,
    /// Concrete type the repository is bound to.
    pub entity_kind: &'static str,
}

impl NotFoundError {
    /// Build a not-found error for an entity type without naming it at the call site.
    pub fn new<E: Entity>(id: &E::Id) -> Self {
        Self {
            id: id.to_string(),
            entity_kind: E::KIND,
        }
    }
}

/// Repository operation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An entity materialized from storage failed re-validation.
    #[error(transparent)]
    Validation(#[from] EntityValidationError),

    /// The operation's contract is defined but this backend has not realized it.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Backend failure (storage engine, lock poisoning, row decoding).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
