//! Storage-agnostic repository contract.
//!
//! The sole persistence boundary of the domain: any concrete storage technology
//! (relational, document, memory) must implement these operations identically.
//!
//! ## Contract
//!
//! - Reads represent absence with `None`, never with an error.
//! - `update`/`delete` against a missing identity fail with
//!   [`NotFoundError`](crate::error::NotFoundError) carrying the id and the bound
//!   entity type; `update` never implicitly inserts.
//! - `bulk_insert` is one logical operation; its partial-failure policy is
//!   backend-defined but must not leave inconsistent state observable by later reads.
//! - `search` is contract-defined for every backend; a backend that has not realized
//!   it fails fast with `RepositoryError::Unsupported` rather than returning wrong
//!   data.
//!
//! Operations are suspension points (they may await I/O) but run to completion
//! before their result is observed; there is no implicit background work.

use std::sync::Arc;

use async_trait::async_trait;

use crate::entity::Entity;
use crate::error::RepositoryError;
use crate::search::{SearchParams, SearchResult};

/// Uniform CRUD + bulk-insert + find-all + search contract over entities keyed by a
/// value-object identifier.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Entity + Send + Sync,
{
    /// Persist a single new entity, keyed by its `entity_id`.
    async fn insert(&self, entity: E) -> Result<(), RepositoryError>;

    /// Persist a sequence of entities in one logical operation.
    async fn bulk_insert(&self, entities: Vec<E>) -> Result<(), RepositoryError>;

    /// Return the entity whose identity equals `id`, or `None` if absent.
    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError>;

    /// Return every stored entity; order is backend-defined.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;

    /// Replace the stored record matching `entity.entity_id()`.
    async fn update(&self, entity: E) -> Result<(), RepositoryError>;

    /// Remove the record matching `id`.
    async fn delete(&self, id: &E::Id) -> Result<(), RepositoryError>;

    /// Paginated, filtered, sorted query.
    async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, RepositoryError>;

    /// Concrete entity type this repository is bound to, for generic diagnostics.
    fn entity_kind(&self) -> &'static str {
        E::KIND
    }
}

#[async_trait]
impl<E, R> Repository<E> for Arc<R>
where
    E: Entity + Send + Sync + 'static,
    R: Repository<E> + ?Sized,
{
    async fn insert(&self, entity: E) -> Result<(), RepositoryError> {
        (**self).insert(entity).await
    }

    async fn bulk_insert(&self, entities: Vec<E>) -> Result<(), RepositoryError> {
        (**self).bulk_insert(entities).await
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        (**self).find_all().await
    }

    async fn update(&self, entity: E) -> Result<(), RepositoryError> {
        (**self).update(entity).await
    }

    async fn delete(&self, id: &E::Id) -> Result<(), RepositoryError> {
        (**self).delete(id).await
    }

    async fn search(&self, params: SearchParams) -> Result<SearchResult<E>, RepositoryError> {
        (**self).search(params).await
    }

    fn entity_kind(&self) -> &'static str {
        (**self).entity_kind()
    }
}
