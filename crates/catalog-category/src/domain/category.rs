//! The Category entity and its identity.

use std::str::FromStr;

use catalog_core::aggregate::Entity;
use catalog_core::clock::Clock;
use catalog_core::error::InvalidIdError;
use catalog_core::notification::Notification;
use catalog_core::repository::SearchableEntity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity value object for categories. Parsing a malformed string fails
/// immediately; it is never a soft validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying uuid.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = InvalidIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidIdError::new(value))
    }
}

const NAME_MAX_CHARS: usize = 255;

/// A content category, e.g. "Movies" or "Documentaries".
#[derive(Debug, Clone)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    notification: Notification,
}

impl Category {
    /// Creates a category and runs the default validation rules, leaving
    /// any failures on the entity's notification.
    #[must_use]
    pub fn create(
        name: impl Into<String>,
        description: Option<String>,
        is_active: bool,
        clock: &dyn Clock,
    ) -> Self {
        let mut category = Self {
            category_id: CategoryId::new(),
            name: name.into(),
            description,
            is_active,
            created_at: clock.now(),
            notification: Notification::new(),
        };
        category.validate(None);
        category
    }

    /// The category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The optional free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the category is visible in the catalog.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Renames the category, re-running only the name rules.
    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.validate(Some(&["name"]));
    }

    /// Replaces the description.
    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Makes the category visible.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Hides the category.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Runs the named rule groups (default: `name`), merging failures
    /// into the notification. Returns whether the notification is clean.
    pub fn validate(&mut self, fields: Option<&[&str]>) -> bool {
        let fields = fields.unwrap_or(&["name"]);
        if fields.contains(&"name") {
            if self.name.trim().is_empty() {
                self.notification
                    .add_error_on("name", "name should not be empty");
            }
            if self.name.chars().count() > NAME_MAX_CHARS {
                self.notification
                    .add_error_on("name", "name must be at most 255 characters");
            }
        }
        !self.notification.has_errors()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn entity_name() -> &'static str {
        "Category"
    }

    fn entity_id(&self) -> &CategoryId {
        &self.category_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }

    fn notification_mut(&mut self) -> &mut Notification {
        &mut self.notification
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.category_id == other.category_id
    }
}

impl SearchableEntity for Category {
    fn matches_filter(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    fn compare_by(&self, other: &Self, field: &str) -> Option<std::cmp::Ordering> {
        match field {
            "name" => Some(self.name.cmp(&other.name)),
            "created_at" => Some(self.created_at.cmp(&other.created_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_test_support::FixedClock;

    use super::*;

    #[test]
    fn test_create_with_valid_name_leaves_notification_clean() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);

        // Act
        let category = Category::create("Movies", None, true, &clock);

        // Assert
        assert!(!category.notification().has_errors());
        assert_eq!(category.name(), "Movies");
        assert_eq!(category.created_at(), clock.0);
    }

    #[test]
    fn test_create_with_blank_name_accumulates_error() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);

        // Act
        let category = Category::create("   ", None, true, &clock);

        // Assert
        assert_eq!(
            category.notification().as_json(),
            serde_json::json!([{"name": ["name should not be empty"]}])
        );
    }

    #[test]
    fn test_create_with_overlong_name_accumulates_error() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);

        // Act
        let category = Category::create("x".repeat(256), None, true, &clock);

        // Assert
        assert!(category.notification().has_errors());
    }

    #[test]
    fn test_change_name_revalidates_only_the_name_group() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let mut category = Category::create("Movies", None, true, &clock);

        // Act
        category.change_name("Series");

        // Assert
        assert!(!category.notification().has_errors());
        assert_eq!(category.name(), "Series");
    }

    #[test]
    fn test_entities_are_equal_iff_ids_are_equal() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let first = Category::create("Movies", None, true, &clock);
        let mut renamed = first.clone();
        renamed.change_name("Series");
        let other = Category::create("Movies", None, true, &clock);

        // Assert
        assert_eq!(first, renamed);
        assert_ne!(first, other);
    }

    #[test]
    fn test_malformed_id_fails_fast() {
        let err = "not-a-uuid".parse::<CategoryId>().unwrap_err();
        assert_eq!(err.value, "not-a-uuid");
    }
}
