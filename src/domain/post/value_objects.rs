use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use super::errors::FieldErrors;

pub const TEXT_REQUIRED: &str = "Text field is required";
pub const TEXT_LENGTH: &str = "Post must be between 10 and 300 characters";

/// Body text shared by posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostText {
    #[validate(length(min = 10, max = 300, message = "Post must be between 10 and 300 characters"))]
    pub value: String,
}

impl PostText {
    /// Validates raw input. Missing or blank text reports the "required"
    /// message instead of the length one.
    pub fn parse(value: Option<&str>) -> Result<Self, FieldErrors> {
        let value = value.unwrap_or_default();
        if value.trim().is_empty() {
            return Err(FieldErrors::from([(
                "text".to_string(),
                TEXT_REQUIRED.to_string(),
            )]));
        }

        let text = Self {
            value: value.to_string(),
        };
        text.validate().map_err(|e| field_errors("text", &e))?;
        Ok(text)
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

/// Flattens validator output to one message per field, renaming the inner
/// `value` field to the name the client sent.
fn field_errors(field: &str, errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(name, errs)| {
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .or_else(|| errs.first().map(|e| e.code.to_string()))?;
            let name = if name == "value" { field } else { &*name };
            Some((name.to_string(), message))
        })
        .collect()
}

/// Trims optional display fields, dropping empty ones.
pub fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
