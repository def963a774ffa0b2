//! The single error kind raised by the product record layer.

use thiserror::Error;

use crate::db::RepositoryError;

/// A product could not be validated, deserialized or persisted.
///
/// Every failure of [`Product`](crate::Product) operations surfaces as this
/// type: malformed input, missing fields, wrongly typed fields, unknown
/// categories, lifecycle misuse (e.g. updating a product that was never
/// created) and backend failures. The `Display` output is the message and
/// nothing else, so callers can hand it straight to an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DataValidationError {
    message: String,
}

impl DataValidationError {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Input was not a JSON object.
    pub(crate) fn bad_data(received: &str) -> Self {
        Self::new(format!(
            "Invalid product: body of request contained bad or no data: expected a JSON object, got {received}"
        ))
    }

    /// A required key is absent from the input object.
    pub(crate) fn missing(field: &str) -> Self {
        Self::new(format!("Invalid product: missing {field}"))
    }

    /// A field holds a value of the wrong primitive type.
    pub(crate) fn invalid_type(kind: &str, field: &str, detail: &str) -> Self {
        Self::new(format!("Invalid type for {kind} [{field}]: {detail}"))
    }

    /// A field holds a value outside its closed set of names.
    pub(crate) fn invalid_attribute(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Invalid attribute: {detail}"))
    }
}

impl From<RepositoryError> for DataValidationError {
    fn from(err: RepositoryError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_bare_message() {
        let err = DataValidationError::new("Update called with empty ID field");
        assert_eq!(err.to_string(), "Update called with empty ID field");
        assert_eq!(err.message(), "Update called with empty ID field");
    }

    #[test]
    fn test_message_builders() {
        assert_eq!(
            DataValidationError::missing("price").to_string(),
            "Invalid product: missing price"
        );
        assert_eq!(
            DataValidationError::invalid_type("boolean", "available", "string").to_string(),
            "Invalid type for boolean [available]: string"
        );
        assert!(
            DataValidationError::bad_data("string")
                .to_string()
                .starts_with("Invalid product: body of request contained bad or no data")
        );
        assert_eq!(
            DataValidationError::invalid_attribute("unknown category: SHOES").to_string(),
            "Invalid attribute: unknown category: SHOES"
        );
    }

    #[test]
    fn test_wraps_repository_errors() {
        let err: DataValidationError =
            RepositoryError::Conflict("price must not be negative".to_string()).into();
        assert_eq!(
            err.to_string(),
            "constraint violation: price must not be negative"
        );

        let err: DataValidationError = RepositoryError::NotFound.into();
        assert_eq!(err.to_string(), "not found");
    }
}
