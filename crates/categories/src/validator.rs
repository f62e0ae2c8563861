//! Declarative rule table for categories.

use catalog_core::{Constraint, RuleSet, ValidatorFields};

/// Category field rules, interpreted by the core validation framework.
///
/// - `name`: required string, at most 255 characters
/// - `description`: optional string
/// - `is_active`: optional boolean
#[derive(Debug, Clone)]
pub struct CategoryValidator {
    rules: RuleSet,
}

impl Default for CategoryValidator {
    fn default() -> Self {
        Self {
            rules: RuleSet::new()
                .field(
                    "name",
                    [
                        Constraint::NotEmpty,
                        Constraint::IsString,
                        Constraint::MaxLength(255),
                    ],
                )
                .field("description", [Constraint::IsString, Constraint::Optional])
                .field("is_active", [Constraint::IsBoolean, Constraint::Optional]),
        }
    }
}

impl ValidatorFields for CategoryValidator {
    fn rule_set(&self) -> &RuleSet {
        &self.rules
    }
}
