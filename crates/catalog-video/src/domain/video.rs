//! The Video aggregate root.

use std::collections::HashSet;
use std::str::FromStr;

use catalog_castmember::domain::cast_member::CastMemberId;
use catalog_category::domain::category::CategoryId;
use catalog_core::aggregate::{AggregateRoot, Entity};
use catalog_core::clock::Clock;
use catalog_core::error::{DomainError, InvalidIdError, NotFoundError};
use catalog_core::notification::Notification;
use catalog_core::repository::SearchableEntity;
use catalog_genre::domain::genre::GenreId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{AudioVideoMediaReplaced, VideoCreated, VideoEvent, VideoEventKind};
use super::media::{AudioVideoMedia, AudioVideoMediaType, ImageMedia};
use super::rating::Rating;

/// Identity value object for videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(Uuid);

impl VideoId {
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

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = InvalidIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidIdError::new(value))
    }
}

const TITLE_MAX_CHARS: usize = 255;

/// Construction input for [`Video::create`]. Reference-id sets are
/// `HashSet`-backed, so duplicates collapse before they reach the
/// aggregate.
#[derive(Debug, Clone)]
pub struct VideoProps {
    /// Title shown in the catalog.
    pub title: String,
    /// Synopsis.
    pub description: String,
    /// Release year.
    pub year_launched: i32,
    /// Duration in minutes.
    pub duration: i32,
    /// Audience age rating.
    pub rating: Rating,
    /// Whether the video was already released.
    pub is_opened: bool,
    /// Referenced category ids.
    pub categories_id: HashSet<CategoryId>,
    /// Referenced genre ids.
    pub genres_id: HashSet<GenreId>,
    /// Referenced cast member ids.
    pub cast_members_id: HashSet<CastMemberId>,
}

/// The Video aggregate: catalog fields, cross-aggregate references, media
/// placeholders, and the recorded events driving async encoding.
#[derive(Debug, Clone)]
pub struct Video {
    video_id: VideoId,
    title: String,
    description: String,
    year_launched: i32,
    duration: i32,
    rating: Rating,
    is_opened: bool,
    is_published: bool,
    banner: Option<ImageMedia>,
    thumbnail: Option<ImageMedia>,
    thumbnail_half: Option<ImageMedia>,
    trailer: Option<AudioVideoMedia>,
    video: Option<AudioVideoMedia>,
    categories_id: HashSet<CategoryId>,
    genres_id: HashSet<GenreId>,
    cast_members_id: HashSet<CastMemberId>,
    created_at: DateTime<Utc>,
    notification: Notification,
    recorded_events: Vec<VideoEvent>,
}

impl Video {
    /// Creates an unpublished video, runs the default validation rules,
    /// and records the local-only created event.
    #[must_use]
    pub fn create(props: VideoProps, clock: &dyn Clock) -> Self {
        let mut video = Self {
            video_id: VideoId::new(),
            title: props.title,
            description: props.description,
            year_launched: props.year_launched,
            duration: props.duration,
            rating: props.rating,
            is_opened: props.is_opened,
            is_published: false,
            banner: None,
            thumbnail: None,
            thumbnail_half: None,
            trailer: None,
            video: None,
            categories_id: props.categories_id,
            genres_id: props.genres_id,
            cast_members_id: props.cast_members_id,
            created_at: clock.now(),
            notification: Notification::new(),
            recorded_events: Vec::new(),
        };
        video.validate(None);
        video.record(
            VideoEventKind::Created(VideoCreated {
                video_id: video.video_id,
                title: video.title.clone(),
            }),
            clock,
        );
        video
    }

    /// The title shown in the catalog.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The synopsis.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Release year.
    #[must_use]
    pub fn year_launched(&self) -> i32 {
        self.year_launched
    }

    /// Duration in minutes.
    #[must_use]
    pub fn duration(&self) -> i32 {
        self.duration
    }

    /// Audience age rating.
    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Whether the video was already released.
    #[must_use]
    pub fn is_opened(&self) -> bool {
        self.is_opened
    }

    /// Whether the encoded main media is available to viewers. Derived
    /// from media state; never set directly.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.is_published
    }

    /// The banner image, if uploaded.
    #[must_use]
    pub fn banner(&self) -> Option<&ImageMedia> {
        self.banner.as_ref()
    }

    /// The thumbnail image, if uploaded.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&ImageMedia> {
        self.thumbnail.as_ref()
    }

    /// The half-size thumbnail image, if uploaded.
    #[must_use]
    pub fn thumbnail_half(&self) -> Option<&ImageMedia> {
        self.thumbnail_half.as_ref()
    }

    /// The trailer media, if uploaded.
    #[must_use]
    pub fn trailer(&self) -> Option<&AudioVideoMedia> {
        self.trailer.as_ref()
    }

    /// The main video media, if uploaded.
    #[must_use]
    pub fn video(&self) -> Option<&AudioVideoMedia> {
        self.video.as_ref()
    }

    /// Referenced category ids.
    #[must_use]
    pub fn categories_id(&self) -> &HashSet<CategoryId> {
        &self.categories_id
    }

    /// Referenced genre ids.
    #[must_use]
    pub fn genres_id(&self) -> &HashSet<GenreId> {
        &self.genres_id
    }

    /// Referenced cast member ids.
    #[must_use]
    pub fn cast_members_id(&self) -> &HashSet<CastMemberId> {
        &self.cast_members_id
    }

    /// Retitles the video, re-running only the title rules.
    pub fn change_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.validate(Some(&["title"]));
    }

    /// Replaces the synopsis.
    pub fn change_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Changes the release year.
    pub fn change_year_launched(&mut self, year_launched: i32) {
        self.year_launched = year_launched;
    }

    /// Changes the duration.
    pub fn change_duration(&mut self, duration: i32) {
        self.duration = duration;
    }

    /// Changes the age rating.
    pub fn change_rating(&mut self, rating: Rating) {
        self.rating = rating;
    }

    /// Marks the video as released.
    pub fn open(&mut self) {
        self.is_opened = true;
    }

    /// Marks the video as not yet released.
    pub fn close(&mut self) {
        self.is_opened = false;
    }

    /// Replaces the referenced category set.
    pub fn sync_categories_id(&mut self, ids: impl IntoIterator<Item = CategoryId>) {
        self.categories_id = ids.into_iter().collect();
    }

    /// Replaces the referenced genre set.
    pub fn sync_genres_id(&mut self, ids: impl IntoIterator<Item = GenreId>) {
        self.genres_id = ids.into_iter().collect();
    }

    /// Replaces the referenced cast member set.
    pub fn sync_cast_members_id(&mut self, ids: impl IntoIterator<Item = CastMemberId>) {
        self.cast_members_id = ids.into_iter().collect();
    }

    /// Replaces the banner image.
    pub fn replace_banner(&mut self, banner: ImageMedia) {
        self.banner = Some(banner);
    }

    /// Replaces the thumbnail image.
    pub fn replace_thumbnail(&mut self, thumbnail: ImageMedia) {
        self.thumbnail = Some(thumbnail);
    }

    /// Replaces the half-size thumbnail image.
    pub fn replace_thumbnail_half(&mut self, thumbnail_half: ImageMedia) {
        self.thumbnail_half = Some(thumbnail_half);
    }

    /// Replaces the trailer media and records the replacement event. A
    /// new upload always needs encoding, so publication is withdrawn
    /// before the event is recorded.
    pub fn replace_trailer(&mut self, media: AudioVideoMedia, clock: &dyn Clock) {
        self.trailer = Some(media.clone());
        self.is_published = false;
        self.record(
            VideoEventKind::AudioVideoMediaReplaced(AudioVideoMediaReplaced {
                video_id: self.video_id,
                media,
                media_type: AudioVideoMediaType::Trailer,
            }),
            clock,
        );
    }

    /// Replaces the main video media and records the replacement event.
    /// Publication is withdrawn until the encoder completes the new file.
    pub fn replace_video(&mut self, media: AudioVideoMedia, clock: &dyn Clock) {
        self.video = Some(media.clone());
        self.is_published = false;
        self.record(
            VideoEventKind::AudioVideoMediaReplaced(AudioVideoMediaReplaced {
                video_id: self.video_id,
                media,
                media_type: AudioVideoMediaType::Video,
            }),
            clock,
        );
    }

    /// Marks the media in `media_type` as encoded at `encoded_location`.
    /// A completed main video publishes the aggregate.
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] when the slot holds no media.
    pub fn complete_audio_video_media(
        &mut self,
        media_type: AudioVideoMediaType,
        encoded_location: &str,
    ) -> Result<(), DomainError> {
        match media_type {
            AudioVideoMediaType::Trailer => {
                let trailer = self.slot_media(media_type)?;
                self.trailer = Some(trailer.complete(encoded_location));
            }
            AudioVideoMediaType::Video => {
                let video = self.slot_media(media_type)?;
                self.video = Some(video.complete(encoded_location));
                self.is_published = true;
            }
        }
        Ok(())
    }

    /// Marks the media in `media_type` as failed.
    ///
    /// # Errors
    ///
    /// [`NotFoundError`] when the slot holds no media.
    pub fn fail_audio_video_media(
        &mut self,
        media_type: AudioVideoMediaType,
    ) -> Result<(), DomainError> {
        let media = self.slot_media(media_type)?;
        let failed = media.fail();
        match media_type {
            AudioVideoMediaType::Trailer => self.trailer = Some(failed),
            AudioVideoMediaType::Video => self.video = Some(failed),
        }
        Ok(())
    }

    /// Runs the named rule groups (default: `title`), merging failures
    /// into the notification. Returns whether the notification is clean.
    pub fn validate(&mut self, fields: Option<&[&str]>) -> bool {
        let fields = fields.unwrap_or(&["title"]);
        if fields.contains(&"title") {
            if self.title.trim().is_empty() {
                self.notification
                    .add_error_on("title", "title should not be empty");
            }
            if self.title.chars().count() > TITLE_MAX_CHARS {
                self.notification
                    .add_error_on("title", "title must be at most 255 characters");
            }
        }
        !self.notification.has_errors()
    }

    fn record(&mut self, kind: VideoEventKind, clock: &dyn Clock) {
        self.recorded_events.push(VideoEvent::new(kind, clock.now()));
    }

    fn slot_media(&self, media_type: AudioVideoMediaType) -> Result<AudioVideoMedia, DomainError> {
        let slot = match media_type {
            AudioVideoMediaType::Trailer => &self.trailer,
            AudioVideoMediaType::Video => &self.video,
        };
        slot.clone().ok_or_else(|| {
            NotFoundError::new(format!("{}.{media_type}", self.video_id), "AudioVideoMedia").into()
        })
    }
}

impl Entity for Video {
    type Id = VideoId;

    fn entity_name() -> &'static str {
        "Video"
    }

    fn entity_id(&self) -> &VideoId {
        &self.video_id
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

impl AggregateRoot for Video {
    type Event = VideoEvent;

    fn recorded_events(&self) -> &[VideoEvent] {
        &self.recorded_events
    }

    fn clear_recorded_events(&mut self) {
        self.recorded_events.clear();
    }
}

impl PartialEq for Video {
    fn eq(&self, other: &Self) -> bool {
        self.video_id == other.video_id
    }
}

impl SearchableEntity for Video {
    fn matches_filter(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }

    fn compare_by(&self, other: &Self, field: &str) -> Option<std::cmp::Ordering> {
        match field {
            "title" => Some(self.title.cmp(&other.title)),
            "created_at" => Some(self.created_at.cmp(&other.created_at)),
            _ => None,
        }
    }
}
