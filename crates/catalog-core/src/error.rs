//! Domain error types.
//!
//! Three distinct shapes, kept separate on purpose: errors raised
//! immediately (malformed ids, missing aggregates, transaction failures),
//! expected failures returned as `Result` values at their call sites, and
//! the batched [`EntityValidationError`] raised once per request from an
//! accumulated [`Notification`].

use thiserror::Error;

use crate::notification::Notification;

/// Raised at a use-case boundary after all validation for the request has
/// been attempted; carries every accumulated problem at once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("entity validation failed: {notification}")]
pub struct EntityValidationError {
    /// The accumulated field and message entries.
    pub notification: Notification,
}

impl EntityValidationError {
    /// Wraps a notification that holds at least one entry.
    #[must_use]
    pub fn new(notification: Notification) -> Self {
        Self { notification }
    }
}

/// An aggregate required by id does not exist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{entity_name} not found using id {id}")]
pub struct NotFoundError {
    /// The id that was looked up.
    pub id: String,
    /// Type name of the missing aggregate.
    pub entity_name: &'static str,
}

impl NotFoundError {
    /// Creates a not-found error for `id` on the named aggregate type.
    #[must_use]
    pub fn new(id: impl Into<String>, entity_name: &'static str) -> Self {
        Self {
            id: id.into(),
            entity_name,
        }
    }
}

/// A raw identifier that is not a valid UUID. Raised immediately at
/// parse time; never collected into a notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("id {value} must be a valid uuid")]
pub struct InvalidIdError {
    /// The rejected raw value.
    pub value: String,
}

impl InvalidIdError {
    /// Creates the error for the rejected raw value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Top-level error returned by use cases and infrastructure components.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// One batched validation failure for the whole request.
    #[error(transparent)]
    EntityValidation(#[from] EntityValidationError),

    /// A required aggregate is missing.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A malformed identifier.
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    /// Transaction lifecycle failure in the unit of work. Always causes a
    /// rollback before propagating.
    #[error("transaction failure: {0}")]
    Transaction(String),

    /// Broker, storage, or other infrastructure failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_id_and_entity_name() {
        let err = NotFoundError::new("3f6c", "Category");
        assert_eq!(err.to_string(), "Category not found using id 3f6c");
    }

    #[test]
    fn test_entity_validation_message_embeds_serialized_notification() {
        // Arrange
        let mut notification = Notification::new();
        notification.add_error_on("rating", "rating is not valid");

        // Act
        let err = DomainError::from(EntityValidationError::new(notification));

        // Assert
        assert_eq!(
            err.to_string(),
            r#"entity validation failed: [{"rating":["rating is not valid"]}]"#
        );
    }

    #[test]
    fn test_invalid_id_message_carries_raw_value() {
        let err = InvalidIdError::new("not-a-uuid");
        assert_eq!(err.to_string(), "id not-a-uuid must be a valid uuid");
    }
}
