//! Shared output mapping for video use cases.

use catalog_core::aggregate::Entity;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::video::Video;

/// Read view of a video aggregate returned by get/list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoOutput {
    /// Aggregate id.
    pub id: String,
    /// Title shown in the catalog.
    pub title: String,
    /// Synopsis.
    pub description: String,
    /// Release year.
    pub year_launched: i32,
    /// Duration in minutes.
    pub duration: i32,
    /// Audience age rating label.
    pub rating: String,
    /// Whether the video was already released.
    pub is_opened: bool,
    /// Whether the encoded main media is available.
    pub is_published: bool,
    /// Referenced category ids (sorted for determinism).
    pub categories_id: Vec<String>,
    /// Referenced genre ids (sorted for determinism).
    pub genres_id: Vec<String>,
    /// Referenced cast member ids (sorted for determinism).
    pub cast_members_id: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Video> for VideoOutput {
    fn from(video: &Video) -> Self {
        let mut categories_id: Vec<String> =
            video.categories_id().iter().map(ToString::to_string).collect();
        categories_id.sort();
        let mut genres_id: Vec<String> =
            video.genres_id().iter().map(ToString::to_string).collect();
        genres_id.sort();
        let mut cast_members_id: Vec<String> = video
            .cast_members_id()
            .iter()
            .map(ToString::to_string)
            .collect();
        cast_members_id.sort();

        Self {
            id: video.entity_id().to_string(),
            title: video.title().to_owned(),
            description: video.description().to_owned(),
            year_launched: video.year_launched(),
            duration: video.duration(),
            rating: video.rating().to_string(),
            is_opened: video.is_opened(),
            is_published: video.is_published(),
            categories_id,
            genres_id,
            cast_members_id,
            created_at: video.created_at(),
        }
    }
}
