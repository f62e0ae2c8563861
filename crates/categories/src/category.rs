use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use catalog_core::{Entity, EntityValidationError, UniqueId, ValidatorFields};

use crate::validator::CategoryValidator;

/// Constructor snapshot for a category.
///
/// Absent optionals fall back to their defaults: a freshly generated id, active, and
/// a creation timestamp of now.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProps {
    pub category_id: Option<UniqueId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Command: create a new category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Catalog category.
///
/// Identity is immutable after construction; `name` and `description` may change
/// through the validated mutation operations, the activation flag through the
/// unvalidated toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    category_id: UniqueId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Rebuild a category from previously captured state. Does not validate; this is
    /// the rehydration path for storage mappers and tests.
    pub fn restore(props: CategoryProps) -> Self {
        Self {
            category_id: props.category_id.unwrap_or_default(),
            name: props.name,
            description: props.description,
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        }
    }

    /// Create a new category, validating before the entity escapes.
    pub fn create(cmd: CreateCategory) -> Result<Self, EntityValidationError> {
        let category = Self::restore(CategoryProps {
            category_id: None,
            name: cmd.name,
            description: cmd.description,
            is_active: cmd.is_active,
            created_at: None,
        });
        category.validate()?;
        Ok(category)
    }

    pub fn category_id(&self) -> UniqueId {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Rename the category; the previous name is restored if the new state fails
    /// validation.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), EntityValidationError> {
        let previous = core::mem::replace(&mut self.name, name.into());
        if let Err(err) = self.validate() {
            self.name = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Replace the description; the previous value is restored if the new state
    /// fails validation.
    pub fn change_description(
        &mut self,
        description: Option<String>,
    ) -> Result<(), EntityValidationError> {
        let previous = core::mem::replace(&mut self.description, description);
        if let Err(err) = self.validate() {
            self.description = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Boolean toggle, no re-validation.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Boolean toggle, no re-validation.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Run the declarative category rules against the current state.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        CategoryValidator::default()
            .validate(&self.validation_snapshot())
            .map_err(EntityValidationError::new)
    }

    /// Plain snapshot of the validated attributes.
    fn validation_snapshot(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "is_active": self.is_active,
        })
    }
}

impl Entity for Category {
    type Id = UniqueId;

    const KIND: &'static str = "Category";

    fn entity_id(&self) -> &Self::Id {
        &self.category_id
    }
}
