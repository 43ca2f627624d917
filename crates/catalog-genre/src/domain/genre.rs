//! The Genre entity and its identity.

use std::str::FromStr;

use catalog_core::aggregate::Entity;
use catalog_core::clock::Clock;
use catalog_core::error::InvalidIdError;
use catalog_core::notification::Notification;
use catalog_core::repository::SearchableEntity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity value object for genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(Uuid);

impl GenreId {
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

impl Default for GenreId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenreId {
    type Err = InvalidIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidIdError::new(value))
    }
}

const NAME_MAX_CHARS: usize = 255;

/// A video genre, e.g. "Drama".
#[derive(Debug, Clone)]
pub struct Genre {
    genre_id: GenreId,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    notification: Notification,
}

impl Genre {
    /// Creates a genre and runs the default validation rules.
    #[must_use]
    pub fn create(name: impl Into<String>, is_active: bool, clock: &dyn Clock) -> Self {
        let mut genre = Self {
            genre_id: GenreId::new(),
            name: name.into(),
            is_active,
            created_at: clock.now(),
            notification: Notification::new(),
        };
        genre.validate(None);
        genre
    }

    /// The genre name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the genre is visible in the catalog.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Renames the genre, re-running only the name rules.
    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.validate(Some(&["name"]));
    }

    /// Makes the genre visible.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Hides the genre.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Runs the named rule groups (default: `name`). Returns whether the
    /// notification is clean.
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

impl Entity for Genre {
    type Id = GenreId;

    fn entity_name() -> &'static str {
        "Genre"
    }

    fn entity_id(&self) -> &GenreId {
        &self.genre_id
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

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.genre_id == other.genre_id
    }
}

impl SearchableEntity for Genre {
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
