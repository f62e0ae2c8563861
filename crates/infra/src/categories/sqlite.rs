//! SQLite-backed category repository.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use catalog_categories::Category;
use catalog_core::{
    Entity, NotFoundError, Repository, RepositoryError, SearchParams, SearchResult, SortDirection,
};

use super::mapper::{self, CategoryRecord};

/// Fields the search contract may sort by; anything else falls back to the default
/// ordering.
const SORTABLE_FIELDS: &[&str] = &["name", "created_at"];

const SELECT_COLUMNS: &str = "id, name, description, is_active, created_at";

/// Category repository over a SQLite connection pool.
///
/// Holds no in-process state beyond the pool handle; isolation and locking are the
/// storage backend's concern. Every read materializes entities through the record
/// mapper, which re-validates them.
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    /// Wrap an existing pool, creating the schema idempotently.
    pub async fn new(pool: SqlitePool) -> Result<Self, RepositoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                description TEXT NULL,
                is_active   INTEGER NOT NULL,
                created_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| storage_error("create categories table", e))?;

        Ok(Self { pool })
    }

    /// Connect to a SQLite database URL and prepare the schema.
    pub async fn connect(url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(url)
            .await
            .map_err(|e| storage_error("connect", e))?;
        Self::new(pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn storage_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    RepositoryError::storage(format!("{operation}: {err}"))
}

#[async_trait]
impl Repository<Category> for SqliteCategoryRepository {
    async fn insert(&self, entity: Category) -> Result<(), RepositoryError> {
        let record = mapper::to_record(&entity);
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.is_active)
        .bind(&record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("insert category", e))?;

        debug!(category_id = %record.id, "inserted category");
        Ok(())
    }

    async fn bulk_insert(&self, entities: Vec<Category>) -> Result<(), RepositoryError> {
        // One transaction: the batch lands all-or-nothing.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| storage_error("begin bulk insert", e))?;

        for entity in &entities {
            let record = mapper::to_record(entity);
            sqlx::query(
                r#"
                INSERT INTO categories (id, name, description, is_active, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&record.id)
            .bind(&record.name)
            .bind(&record.description)
            .bind(record.is_active)
            .bind(&record.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| storage_error("bulk insert category", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| storage_error("commit bulk insert", e))?;

        debug!(count = entities.len(), "bulk inserted categories");
        Ok(())
    }

    async fn find_by_id(&self, id: &<Category as Entity>::Id) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE id = ?1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find category by id", e))?;

        match row {
            Some(row) => Ok(Some(mapper::to_entity(CategoryRecord::from_row(&row)?)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM categories"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("find all categories", e))?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            entities.push(mapper::to_entity(CategoryRecord::from_row(&row)?)?);
        }
        Ok(entities)
    }

    async fn update(&self, entity: Category) -> Result<(), RepositoryError> {
        let record = mapper::to_record(&entity);
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = ?2, description = ?3, is_active = ?4, created_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(record.is_active)
        .bind(&record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update category", e))?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new::<Category>(entity.entity_id()).into());
        }
        Ok(())
    }

    async fn delete(&self, id: &<Category as Entity>::Id) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete category", e))?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new::<Category>(id).into());
        }
        Ok(())
    }

    async fn search(
        &self,
        params: SearchParams,
    ) -> Result<SearchResult<Category>, RepositoryError> {
        let pattern = params.filter().map(|f| format!("%{f}%"));

        let count_row =
            sqlx::query("SELECT COUNT(*) AS total FROM categories WHERE (?1 IS NULL OR name LIKE ?1)")
                .bind(pattern.as_deref())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| storage_error("count categories", e))?;
        let total: i64 = count_row
            .try_get("total")
            .map_err(|e| storage_error("read category count", e))?;

        // Sort fields are whitelisted before being spliced into the statement.
        let order_by = match params.sort().filter(|s| SORTABLE_FIELDS.contains(s)) {
            Some(field) => {
                let dir = match params.sort_dir().unwrap_or(SortDirection::Asc) {
                    SortDirection::Asc => "ASC",
                    SortDirection::Desc => "DESC",
                };
                format!("{field} {dir}")
            }
            None => "created_at DESC".to_string(),
        };

        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM categories
            WHERE (?1 IS NULL OR name LIKE ?1)
            ORDER BY {order_by}
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(pattern.as_deref())
        .bind(i64::from(params.per_page()))
        .bind(params.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("search categories", e))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(mapper::to_entity(CategoryRecord::from_row(&row)?)?);
        }

        Ok(SearchResult::new(items, total as u64, &params))
    }
}
