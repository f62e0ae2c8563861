//! Pure translation between categories and their storage record shape.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use catalog_categories::{Category, CategoryProps};
use catalog_core::{RepositoryError, UniqueId};

/// Flat storage record for a category.
///
/// Business attributes mirror the entity 1:1; the timestamp is RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl CategoryRecord {
    /// Read a record out of a fetched row.
    pub fn from_row(row: &SqliteRow) -> Result<Self, RepositoryError> {
        Ok(Self {
            id: row.try_get("id").map_err(column_error)?,
            name: row.try_get("name").map_err(column_error)?,
            description: row.try_get("description").map_err(column_error)?,
            is_active: row.try_get("is_active").map_err(column_error)?,
            created_at: row.try_get("created_at").map_err(column_error)?,
        })
    }
}

fn column_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::storage(format!("failed to read category row: {err}"))
}

/// Entity -> storage record.
pub fn to_record(entity: &Category) -> CategoryRecord {
    CategoryRecord {
        id: entity.category_id().to_string(),
        name: entity.name().to_string(),
        description: entity.description().map(str::to_string),
        is_active: entity.is_active(),
        created_at: entity.created_at().to_rfc3339(),
    }
}

/// Storage record -> entity.
///
/// Re-validates the reconstructed entity, so only valid entities ever materialize
/// from storage, even if the underlying table was mutated out-of-band. Corrupt
/// identifiers and timestamps surface as storage errors, constraint violations as
/// validation errors.
pub fn to_entity(record: CategoryRecord) -> Result<Category, RepositoryError> {
    let category_id = UniqueId::parse(&record.id)
        .map_err(|err| RepositoryError::storage(format!("corrupt category id: {err}")))?;
    let created_at = DateTime::parse_from_rfc3339(&record.created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| RepositoryError::storage(format!("corrupt category timestamp: {err}")))?;

    let category = Category::restore(CategoryProps {
        category_id: Some(category_id),
        name: record.name,
        description: record.description,
        is_active: Some(record.is_active),
        created_at: Some(created_at),
    });
    category.validate()?;
    Ok(category)
}
