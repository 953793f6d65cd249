//! Field-level validation results.
//!
//! [`ModelErrors`] collects messages per field so handlers can return the
//! full set of problems in one 400 response, whether they come from a
//! `validator` derive, a duplicate-name check, or a failed patch operation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::DbId;

/// Messages keyed by field name, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelErrors(BTreeMap<String, Vec<String>>);

impl ModelErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single message for `field`.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ModelErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<ValidationErrors> for ModelErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = ModelErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                let message = match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("failed '{}' check", err.code),
                };
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Run the `validator` derive on a DTO and convert failures into
/// [`CoreError::Model`].
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), CoreError> {
    dto.validate()
        .map_err(|errors| CoreError::Model(errors.into()))
}

/// Validate that a path identifier is a positive integer.
pub fn validate_id(id: DbId) -> Result<(), CoreError> {
    if id <= 0 {
        return Err(CoreError::Validation(format!(
            "Id must be a positive integer, got {id}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 0))]
        count: i32,
    }

    #[test]
    fn validate_id_rejects_zero_and_negative() {
        assert_matches!(validate_id(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_id(-3), Err(CoreError::Validation(_)));
        assert!(validate_id(1).is_ok());
    }

    #[test]
    fn validator_messages_are_keyed_by_field() {
        let sample = Sample {
            name: String::new(),
            count: -1,
        };
        let err = validate_dto(&sample).unwrap_err();
        let CoreError::Model(errors) = err else {
            panic!("expected model errors");
        };
        assert_eq!(errors.get("name"), Some(&["Name is required".to_string()][..]));
        assert!(errors.get("count").is_some());
    }

    #[test]
    fn add_appends_to_existing_field() {
        let mut errors = ModelErrors::single("name", "taken");
        errors.add("name", "too long");
        assert_eq!(errors.get("name").map(<[String]>::len), Some(2));
        assert!(errors.get("rate").is_none());
    }

    #[test]
    fn display_joins_all_messages() {
        let mut errors = ModelErrors::single("name", "taken");
        errors.add("rate", "negative");
        assert_eq!(errors.to_string(), "name: taken; rate: negative");
    }

    #[test]
    fn serializes_as_plain_map() {
        let errors = ModelErrors::single("name", "Villa already exists");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "name": ["Villa already exists"] }));
    }
}
