//! Audience age rating value object.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parse failure for a rating label. An expected outcome of user input,
/// handled at the call site and merged into the aggregate notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("rating {value} is not one of L, 10, 12, 14, 16, 18")]
pub struct InvalidRatingError {
    /// The rejected raw label.
    pub value: String,
}

/// Audience age rating, `L` meaning free for all audiences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    /// Free for all audiences.
    #[default]
    RL,
    /// Ages 10 and up.
    R10,
    /// Ages 12 and up.
    R12,
    /// Ages 14 and up.
    R14,
    /// Ages 16 and up.
    R16,
    /// Ages 18 and up.
    R18,
}

impl Rating {
    /// The wire label for this rating.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Rating::RL => "L",
            Rating::R10 => "10",
            Rating::R12 => "12",
            Rating::R14 => "14",
            Rating::R16 => "16",
            Rating::R18 => "18",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = InvalidRatingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "L" => Ok(Rating::RL),
            "10" => Ok(Rating::R10),
            "12" => Ok(Rating::R12),
            "14" => Ok(Rating::R14),
            "16" => Ok(Rating::R16),
            "18" => Ok(Rating::R18),
            other => Err(InvalidRatingError {
                value: other.to_owned(),
            }),
        }
    }
}
