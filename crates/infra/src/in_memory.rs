//! In-memory repository.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::{
    Entity, NotFoundError, Repository, RepositoryError, SearchParams, SearchResult,
};

/// In-memory repository backed by an ordered sequence of entities.
///
/// The backing sequence is private per repository instance; uniqueness and lookup are
/// by identity equality, never by reference. Removal preserves the relative order of
/// the remaining elements.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    items: RwLock<Vec<E>>,
}

impl<E> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<E>>, RepositoryError> {
        self.items
            .read()
            .map_err(|_| RepositoryError::storage("lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<E>>, RepositoryError> {
        self.items
            .write()
            .map_err(|_| RepositoryError::storage("lock poisoned"))
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Clone + Send + Sync,
{
    async fn insert(&self, entity: E) -> Result<(), RepositoryError> {
        self.write()?.push(entity);
        Ok(())
    }

    async fn bulk_insert(&self, entities: Vec<E>) -> Result<(), RepositoryError> {
        self.write()?.extend(entities);
        Ok(())
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, RepositoryError> {
        Ok(self
            .read()?
            .iter()
            .find(|item| item.entity_id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.read()?.clone())
    }

    async fn update(&self, entity: E) -> Result<(), RepositoryError> {
        let mut items = self.write()?;
        match items
            .iter()
            .position(|item| item.entity_id() == entity.entity_id())
        {
            Some(index) => {
                items[index] = entity;
                Ok(())
            }
            None => Err(NotFoundError::new::<E>(entity.entity_id()).into()),
        }
    }

    async fn delete(&self, id: &E::Id) -> Result<(), RepositoryError> {
        let mut items = self.write()?;
        match items.iter().position(|item| item.entity_id() == id) {
            Some(index) => {
                items.remove(index);
                Ok(())
            }
            None => Err(NotFoundError::new::<E>(id).into()),
        }
    }

    async fn search(&self, _params: SearchParams) -> Result<SearchResult<E>, RepositoryError> {
        // Contract defined, not realized by this backend: fail fast.
        Err(RepositoryError::Unsupported("search"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::UniqueId;

    #[derive(Debug, Clone, PartialEq)]
    struct StubEntity {
        entity_id: UniqueId,
        name: String,
        price: u32,
    }

    impl StubEntity {
        fn new(name: &str, price: u32) -> Self {
            Self {
                entity_id: UniqueId::new(),
                name: name.to_string(),
                price,
            }
        }
    }

    impl Entity for StubEntity {
        type Id = UniqueId;

        const KIND: &'static str = "StubEntity";

        fn entity_id(&self) -> &Self::Id {
            &self.entity_id
        }
    }

    fn repo() -> InMemoryRepository<StubEntity> {
        InMemoryRepository::new()
    }

    #[tokio::test]
    async fn inserts_a_new_entity() {
        let repo = repo();
        let entity = StubEntity::new("Test", 10);

        repo.insert(entity.clone()).await.unwrap();

        let found = repo.find_by_id(entity.entity_id()).await.unwrap();
        assert_eq!(found, Some(entity));
    }

    #[tokio::test]
    async fn bulk_inserts_entities() {
        let repo = repo();
        let entities = vec![StubEntity::new("Test", 10), StubEntity::new("Test 2", 20)];

        repo.bulk_insert(entities.clone()).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap(), entities);
    }

    #[tokio::test]
    async fn returns_all_entities() {
        let repo = repo();
        let entities = vec![StubEntity::new("Test", 10), StubEntity::new("Test 2", 20)];

        repo.bulk_insert(entities.clone()).await.unwrap();

        let result = repo.find_all().await.unwrap();
        assert_eq!(result, entities);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_when_absent() {
        let repo = repo();
        assert_eq!(repo.find_by_id(&UniqueId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_fails_when_entity_not_found() {
        let repo = repo();
        let entity = StubEntity::new("Test", 10);

        let err = repo.update(entity.clone()).await.unwrap_err();
        assert_eq!(
            err,
            RepositoryError::NotFound(NotFoundError::new::<StubEntity>(entity.entity_id()))
        );
    }

    #[tokio::test]
    async fn updates_an_entity_in_place() {
        let repo = repo();
        let entity = StubEntity::new("Test", 10);
        repo.insert(entity.clone()).await.unwrap();

        let updated = StubEntity {
            entity_id: entity.entity_id,
            name: "updated name".to_string(),
            price: 10,
        };
        repo.update(updated.clone()).await.unwrap();

        assert_eq!(
            repo.find_by_id(entity.entity_id()).await.unwrap(),
            Some(updated)
        );
    }

    #[tokio::test]
    async fn update_locates_by_identity_and_preserves_order() {
        let repo = repo();
        let first = StubEntity::new("first", 1);
        let second = StubEntity::new("second", 2);
        repo.bulk_insert(vec![first.clone(), second.clone()])
            .await
            .unwrap();

        let replacement = StubEntity {
            entity_id: first.entity_id,
            name: "replaced".to_string(),
            price: 3,
        };
        repo.update(replacement.clone()).await.unwrap();

        assert_eq!(repo.find_all().await.unwrap(), vec![replacement, second]);
    }

    #[tokio::test]
    async fn delete_fails_when_entity_not_found() {
        let repo = repo();
        let id = UniqueId::new();

        let err = repo.delete(&id).await.unwrap_err();
        assert_eq!(
            err,
            RepositoryError::NotFound(NotFoundError::new::<StubEntity>(&id))
        );
    }

    #[tokio::test]
    async fn deletes_an_entity() {
        let repo = repo();
        let entity = StubEntity::new("Test", 10);
        repo.insert(entity.clone()).await.unwrap();

        repo.delete(entity.entity_id()).await.unwrap();

        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(repo.find_by_id(entity.entity_id()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_preserves_the_order_of_remaining_entities() {
        let repo = repo();
        let entities = vec![
            StubEntity::new("a", 1),
            StubEntity::new("b", 2),
            StubEntity::new("c", 3),
        ];
        repo.bulk_insert(entities.clone()).await.unwrap();

        repo.delete(entities[1].entity_id()).await.unwrap();

        assert_eq!(
            repo.find_all().await.unwrap(),
            vec![entities[0].clone(), entities[2].clone()]
        );
    }

    #[tokio::test]
    async fn search_fails_fast_as_unrealized() {
        let repo = repo();
        let err = repo.search(SearchParams::new()).await.unwrap_err();
        assert_eq!(err, RepositoryError::Unsupported("search"));
    }

    #[tokio::test]
    async fn exposes_the_bound_entity_kind() {
        assert_eq!(repo().entity_kind(), "StubEntity");
    }
}
