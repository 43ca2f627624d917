//! The Cast Member entity, its identity, and the member-type value object.

use std::str::FromStr;

use catalog_core::aggregate::Entity;
use catalog_core::clock::Clock;
use catalog_core::error::InvalidIdError;
use catalog_core::notification::Notification;
use catalog_core::repository::SearchableEntity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity value object for cast members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastMemberId(Uuid);

impl CastMemberId {
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

impl Default for CastMemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CastMemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CastMemberId {
    type Err = InvalidIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidIdError::new(value))
    }
}

/// Parse failure for a member-type code. An expected outcome of user
/// input, handled at the call site rather than raised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cast member type {value} must be 1 (director) or 2 (actor)")]
pub struct InvalidCastMemberTypeError {
    /// The rejected code.
    pub value: i32,
}

/// Role of a cast member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastMemberType {
    /// Directed the video.
    Director,
    /// Appears in the video.
    Actor,
}

impl CastMemberType {
    /// The wire code for this type.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            CastMemberType::Director => 1,
            CastMemberType::Actor => 2,
        }
    }
}

impl TryFrom<i32> for CastMemberType {
    type Error = InvalidCastMemberTypeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CastMemberType::Director),
            2 => Ok(CastMemberType::Actor),
            _ => Err(InvalidCastMemberTypeError { value }),
        }
    }
}

const NAME_MAX_CHARS: usize = 255;

/// A person credited on videos.
#[derive(Debug, Clone)]
pub struct CastMember {
    cast_member_id: CastMemberId,
    name: String,
    member_type: CastMemberType,
    created_at: DateTime<Utc>,
    notification: Notification,
}

impl CastMember {
    /// Creates a cast member and runs the default validation rules.
    #[must_use]
    pub fn create(
        name: impl Into<String>,
        member_type: CastMemberType,
        clock: &dyn Clock,
    ) -> Self {
        let mut member = Self {
            cast_member_id: CastMemberId::new(),
            name: name.into(),
            member_type,
            created_at: clock.now(),
            notification: Notification::new(),
        };
        member.validate(None);
        member
    }

    /// The member's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member's role.
    #[must_use]
    pub fn member_type(&self) -> CastMemberType {
        self.member_type
    }

    /// Renames the member, re-running only the name rules.
    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.validate(Some(&["name"]));
    }

    /// Changes the member's role.
    pub fn change_member_type(&mut self, member_type: CastMemberType) {
        self.member_type = member_type;
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

impl Entity for CastMember {
    type Id = CastMemberId;

    fn entity_name() -> &'static str {
        "CastMember"
    }

    fn entity_id(&self) -> &CastMemberId {
        &self.cast_member_id
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

impl PartialEq for CastMember {
    fn eq(&self, other: &Self) -> bool {
        self.cast_member_id == other.cast_member_id
    }
}

impl SearchableEntity for CastMember {
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
    fn test_member_type_parses_known_codes() {
        assert_eq!(CastMemberType::try_from(1), Ok(CastMemberType::Director));
        assert_eq!(CastMemberType::try_from(2), Ok(CastMemberType::Actor));
    }

    #[test]
    fn test_member_type_rejects_unknown_code() {
        let err = CastMemberType::try_from(9).unwrap_err();
        assert_eq!(err.value, 9);
        assert_eq!(
            err.to_string(),
            "cast member type 9 must be 1 (director) or 2 (actor)"
        );
    }

    #[test]
    fn test_create_runs_name_rules() {
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);

        let member = CastMember::create("Ana", CastMemberType::Actor, &clock);
        assert!(!member.notification().has_errors());

        let blank = CastMember::create("", CastMemberType::Director, &clock);
        assert!(blank.notification().has_errors());
    }
}
