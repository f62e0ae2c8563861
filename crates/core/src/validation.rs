//! Declarative field validation.
//!
//! A [`RuleSet`] is an ordered table of `field -> ordered constraint list`,
//! interpreted against a plain JSON snapshot of an entity's attributes. Evaluation is
//! a pure function of the rule set and the snapshot: the same invalid snapshot always
//! yields the same messages in the same order, and no state leaks between calls.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Named constraint applied to a single field of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Violated by absent, null, or empty-string values.
    NotEmpty,
    /// Violated unless the value is a string.
    IsString,
    /// Violated unless the value is a boolean.
    IsBoolean,
    /// Violated unless the value is a string of at most this many characters.
    /// Absent, null, and non-string values violate it as well.
    MaxLength(usize),
    /// Modifier: when the field is absent or null, skip every other constraint.
    Optional,
}

impl Constraint {
    /// Returns the violation message, or `None` when the constraint holds.
    fn check(&self, field: &str, value: Option<&Value>) -> Option<String> {
        match self {
            Constraint::Optional => None,
            Constraint::NotEmpty => match value {
                None | Some(Value::Null) => Some(format!("{field} should not be empty")),
                Some(Value::String(s)) if s.is_empty() => {
                    Some(format!("{field} should not be empty"))
                }
                Some(_) => None,
            },
            Constraint::IsString => match value {
                Some(Value::String(_)) => None,
                _ => Some(format!("{field} must be a string")),
            },
            Constraint::IsBoolean => match value {
                Some(Value::Bool(_)) => None,
                _ => Some(format!("{field} must be a boolean value")),
            },
            Constraint::MaxLength(max) => match value {
                Some(Value::String(s)) if s.chars().count() <= *max => None,
                _ => Some(format!(
                    "{field} must be shorter than or equal to {max} characters"
                )),
            },
        }
    }
}

/// Ordered constraints for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldRules {
    field: String,
    constraints: Vec<Constraint>,
}

/// Ordered, data-driven rule table for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the ordered constraint list for a field.
    pub fn field(
        mut self,
        name: impl Into<String>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.rules.push(FieldRules {
            field: name.into(),
            constraints: constraints.into_iter().collect(),
        });
        self
    }

    /// Interpret the rule table against a snapshot of entity attributes.
    ///
    /// The snapshot is expected to be a JSON object; fields missing from it are
    /// treated the same as null. Messages are collected per field in constraint
    /// declaration order.
    pub fn validate(&self, snapshot: &Value) -> Result<(), FieldsError> {
        let object = snapshot.as_object();
        let mut errors = FieldsError::new();

        for rule in &self.rules {
            let value = object.and_then(|map| map.get(&rule.field));
            let absent = matches!(value, None | Some(Value::Null));
            let optional = rule
                .constraints
                .iter()
                .any(|c| matches!(c, Constraint::Optional));
            if absent && optional {
                continue;
            }

            for constraint in &rule.constraints {
                if let Some(message) = constraint.check(&rule.field, value) {
                    errors.push(&rule.field, message);
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Translates a declarative rule set against an attribute snapshot into a
/// field -> messages error map.
pub trait ValidatorFields {
    /// The rule table this validator interprets.
    fn rule_set(&self) -> &RuleSet;

    fn validate(&self, snapshot: &Value) -> Result<(), FieldsError> {
        self.rule_set().validate(snapshot)
    }
}

/// Mapping of field name to the ordered list of violation messages.
///
/// A field absent from the map is valid. Field iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldsError {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldsError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for one field, in constraint declaration order.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Number of distinct invalid fields.
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_rules() -> RuleSet {
        RuleSet::new().field(
            "name",
            [
                Constraint::NotEmpty,
                Constraint::IsString,
                Constraint::MaxLength(255),
            ],
        )
    }

    #[test]
    fn a_null_field_violates_every_constraint_in_order() {
        let err = name_rules().validate(&json!({ "name": null })).unwrap_err();

        assert_eq!(
            err.messages("name").unwrap(),
            [
                "name should not be empty",
                "name must be a string",
                "name must be shorter than or equal to 255 characters",
            ]
        );
        assert_eq!(err.count(), 1);
    }

    #[test]
    fn a_missing_field_is_treated_like_null() {
        let err = name_rules().validate(&json!({})).unwrap_err();
        assert_eq!(err.messages("name").unwrap().len(), 3);
    }

    #[test]
    fn an_empty_string_only_violates_not_empty() {
        let err = name_rules().validate(&json!({ "name": "" })).unwrap_err();
        assert_eq!(err.messages("name").unwrap(), ["name should not be empty"]);
    }

    #[test]
    fn a_non_string_violates_is_string_and_max_length() {
        let err = name_rules().validate(&json!({ "name": 5 })).unwrap_err();
        assert_eq!(
            err.messages("name").unwrap(),
            [
                "name must be a string",
                "name must be shorter than or equal to 255 characters",
            ]
        );
    }

    #[test]
    fn an_overlong_string_only_violates_max_length() {
        let err = name_rules()
            .validate(&json!({ "name": "t".repeat(256) }))
            .unwrap_err();
        assert_eq!(
            err.messages("name").unwrap(),
            ["name must be shorter than or equal to 255 characters"]
        );
    }

    #[test]
    fn a_valid_string_passes() {
        assert!(name_rules().validate(&json!({ "name": "Movie" })).is_ok());
    }

    #[test]
    fn optional_fields_skip_constraints_when_absent_or_null() {
        let rules = RuleSet::new().field(
            "description",
            [Constraint::IsString, Constraint::Optional],
        );

        assert!(rules.validate(&json!({})).is_ok());
        assert!(rules.validate(&json!({ "description": null })).is_ok());
        assert!(rules.validate(&json!({ "description": "text" })).is_ok());

        let err = rules.validate(&json!({ "description": 7 })).unwrap_err();
        assert_eq!(
            err.messages("description").unwrap(),
            ["description must be a string"]
        );
    }

    #[test]
    fn boolean_constraint_rejects_other_types() {
        let rules = RuleSet::new().field(
            "is_active",
            [Constraint::IsBoolean, Constraint::Optional],
        );

        let err = rules.validate(&json!({ "is_active": "true" })).unwrap_err();
        assert_eq!(
            err.messages("is_active").unwrap(),
            ["is_active must be a boolean value"]
        );
        assert!(rules.validate(&json!({ "is_active": false })).is_ok());
    }

    #[test]
    fn count_reports_distinct_invalid_fields() {
        let rules = RuleSet::new()
            .field("name", [Constraint::NotEmpty, Constraint::IsString])
            .field("is_active", [Constraint::IsBoolean]);

        let err = rules
            .validate(&json!({ "name": null, "is_active": "yes" }))
            .unwrap_err();
        assert_eq!(err.count(), 2);
    }

    #[test]
    fn evaluation_is_deterministic_and_re_entrant() {
        let rules = name_rules();
        let snapshot = json!({ "name": 5 });

        let first = rules.validate(&snapshot).unwrap_err();
        let second = rules.validate(&snapshot).unwrap_err();
        assert_eq!(first, second);

        // A later, unrelated call never sees a former call's errors.
        assert!(rules.validate(&json!({ "name": "ok" })).is_ok());
    }
}
