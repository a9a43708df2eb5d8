//! Explicit field validation for incoming payloads.
//!
//! A payload implements [`Validate`] by checking its fields in declaration
//! order, so the resulting list of [`FieldError`]s is stable and can be
//! returned to the client as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub const NOT_BLANK_MESSAGE: &str = "must not be blank";
pub const NOT_NULL_MESSAGE: &str = "must not be null";

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub object_name: String,
    pub field: String,
    pub rejected_value: Value,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(
        object_name: impl Into<String>,
        field: impl Into<String>,
        rejected_value: Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            field: field.into(),
            rejected_value,
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field error in object '{}' on field '{}': rejected value [{}]; {}",
            self.object_name, self.field, self.rejected_value, self.message
        )
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(pub Vec<FieldError>);

pub trait Validate {
    /// Returns every violated constraint, in field declaration order.
    fn validate(&self) -> Vec<FieldError>;
}

#[must_use]
pub fn not_blank(object_name: &str, field: &str, value: Option<&str>) -> Option<FieldError> {
    match value {
        Some(value) if !value.trim().is_empty() => None,
        _ => Some(FieldError::new(
            object_name,
            field,
            value.map_or(Value::Null, |value| Value::String(value.to_owned())),
            NOT_BLANK_MESSAGE,
        )),
    }
}

#[must_use]
pub fn not_null<T>(object_name: &str, field: &str, value: Option<&T>) -> Option<FieldError> {
    value
        .is_none()
        .then(|| FieldError::new(object_name, field, Value::Null, NOT_NULL_MESSAGE))
}

/// Rejects values longer than `max` characters. Absent values pass.
#[must_use]
pub fn size(object_name: &str, field: &str, value: Option<&str>, max: usize) -> Option<FieldError> {
    let value = value?;
    (value.chars().count() > max).then(|| {
        FieldError::new(
            object_name,
            field,
            Value::String(value.to_owned()),
            format!("size must be between 0 and {max}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use crate::validation::{FieldError, NOT_BLANK_MESSAGE, not_blank, not_null, size};
    use serde_json::{Value, json};

    #[test]
    fn blank_values() {
        assert_eq!(not_blank("post", "title", Some("hello")), None);
        assert_eq!(not_blank("post", "title", Some("  x ")), None);

        let empty = not_blank("post", "title", Some("")).unwrap();
        assert_eq!(empty.field, "title");
        assert_eq!(empty.rejected_value, json!(""));
        assert_eq!(empty.message, NOT_BLANK_MESSAGE);

        let whitespace = not_blank("post", "title", Some(" \t\n")).unwrap();
        assert_eq!(whitespace.rejected_value, json!(" \t\n"));

        let missing = not_blank("post", "title", None).unwrap();
        assert_eq!(missing.rejected_value, Value::Null);
    }

    #[test]
    fn null_values() {
        assert_eq!(not_null("post", "postId", Some(&5)), None);
        assert!(not_null::<i64>("post", "postId", None).is_some());
    }

    #[test]
    fn sized_values() {
        assert_eq!(size("post", "title", None, 3), None);
        assert_eq!(size("post", "title", Some("abc"), 3), None);
        // characters, not bytes
        assert_eq!(size("post", "title", Some("가나다"), 3), None);

        let error = size("post", "title", Some("abcd"), 3).unwrap();
        assert_eq!(error.field, "title");
        assert_eq!(error.rejected_value, json!("abcd"));
        assert_eq!(error.message, "size must be between 0 and 3");
    }

    #[test]
    fn field_error_json() {
        let error = FieldError::new("postCreateRequest", "writer", json!(""), NOT_BLANK_MESSAGE);

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "objectName": "postCreateRequest",
                "field": "writer",
                "rejectedValue": "",
                "message": "must not be blank",
            })
        );
        assert_eq!(
            error.to_string(),
            "Field error in object 'postCreateRequest' on field 'writer': \
            rejected value [\"\"]; must not be blank"
        );
    }
}
