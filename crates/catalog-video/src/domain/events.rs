//! Domain events of the Video aggregate.

use catalog_core::event::{DomainEvent, IntegrationEvent};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::media::{AudioVideoMedia, AudioVideoMediaType};
use super::video::VideoId;

/// Integration-event name announcing a new raw upload to the encoder.
pub const AUDIO_VIDEO_MEDIA_UPLOADED: &str = "video.audio_video_media_uploaded";

/// Schema version of the video event payloads.
const EVENT_VERSION: i32 = 1;

/// Emitted when a video aggregate is first created. Local-only: it has no
/// external consumer and is skipped by integration publication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCreated {
    /// The new aggregate's id.
    pub video_id: VideoId,
    /// Title at creation time.
    pub title: String,
}

/// Emitted when a trailer or main video upload replaces the slot's media.
/// Its integration form asks the external encoder to process the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioVideoMediaReplaced {
    /// The owning aggregate's id.
    pub video_id: VideoId,
    /// The freshly uploaded media.
    pub media: AudioVideoMedia,
    /// Which slot was replaced.
    pub media_type: AudioVideoMediaType,
}

/// Payload union of the Video aggregate's events.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoEventKind {
    /// The aggregate was created.
    Created(VideoCreated),
    /// A trailer or main video media was replaced.
    AudioVideoMediaReplaced(AudioVideoMediaReplaced),
}

/// Event envelope: payload plus the metadata every event carries.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoEvent {
    /// Event-specific payload.
    pub kind: VideoEventKind,
    /// When the mutation happened.
    pub occurred_on: DateTime<Utc>,
    /// Schema version of the payload.
    pub event_version: i32,
}

impl VideoEvent {
    /// Wraps a payload with the current schema version.
    #[must_use]
    pub fn new(kind: VideoEventKind, occurred_on: DateTime<Utc>) -> Self {
        Self {
            kind,
            occurred_on,
            event_version: EVENT_VERSION,
        }
    }
}

impl DomainEvent for VideoEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            VideoEventKind::Created(_) => "video.created",
            VideoEventKind::AudioVideoMediaReplaced(_) => "video.audio_video_media_replaced",
        }
    }

    fn aggregate_id(&self) -> Uuid {
        match &self.kind {
            VideoEventKind::Created(payload) => payload.video_id.as_uuid(),
            VideoEventKind::AudioVideoMediaReplaced(payload) => payload.video_id.as_uuid(),
        }
    }

    fn event_version(&self) -> i32 {
        self.event_version
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    fn integration_event(&self) -> Option<IntegrationEvent> {
        match &self.kind {
            VideoEventKind::Created(_) => None,
            VideoEventKind::AudioVideoMediaReplaced(payload) => Some(IntegrationEvent {
                name: AUDIO_VIDEO_MEDIA_UPLOADED,
                event_version: self.event_version,
                occurred_on: self.occurred_on,
                payload: json!({
                    "resource_id": format!("{}.{}", payload.video_id, payload.media_type),
                    "file_path": payload.media.raw_location,
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_test_support::FixedClock;

    use super::*;
    use crate::domain::media::AudioVideoMedia;

    #[test]
    fn test_created_event_is_local_only() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let event = VideoEvent::new(
            VideoEventKind::Created(VideoCreated {
                video_id: VideoId::new(),
                title: "Alien".to_owned(),
            }),
            clock.0,
        );

        // Assert
        assert_eq!(event.event_type(), "video.created");
        assert!(event.integration_event().is_none());
    }

    #[test]
    fn test_media_replaced_converts_to_the_encoder_integration_event() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let video_id = VideoId::new();
        let media = AudioVideoMedia::new("cafe.mp4", format!("{video_id}/cafe.mp4"));
        let event = VideoEvent::new(
            VideoEventKind::AudioVideoMediaReplaced(AudioVideoMediaReplaced {
                video_id,
                media,
                media_type: AudioVideoMediaType::Video,
            }),
            clock.0,
        );

        // Act
        let integration = event.integration_event().unwrap();

        // Assert
        assert_eq!(integration.name, AUDIO_VIDEO_MEDIA_UPLOADED);
        assert_eq!(integration.occurred_on, clock.0);
        assert_eq!(
            integration.payload,
            serde_json::json!({
                "resource_id": format!("{video_id}.video"),
                "file_path": format!("{video_id}/cafe.mp4"),
            })
        );
    }
}
