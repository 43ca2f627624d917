//! Process-audio-video-media use case.
//!
//! The inbound half of the async encoding loop: applies the encoder's
//! outcome message to the aggregate's media slot.

use std::sync::Arc;

use catalog_core::aggregate::Entity;
use catalog_core::error::{DomainError, NotFoundError};
use catalog_core::uow::{UnitOfWork, run_in_transaction};
use serde::Deserialize;

use crate::domain::media::AudioVideoMediaType;
use crate::domain::repository::VideoRepository;
use crate::domain::video::{Video, VideoId};

/// Outcome reported by the external encoder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum EncodingOutcome {
    /// Encoding succeeded; the output lives at `encoded_location`.
    Completed {
        /// Location of the encoded output.
        encoded_location: String,
    },
    /// Encoding failed.
    Failed,
}

/// Encoder outcome message for one media slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessAudioVideoMediaInput {
    /// Id of the target video.
    pub video_id: String,
    /// Which slot the outcome refers to.
    pub media_type: AudioVideoMediaType,
    /// The encoder's outcome.
    pub outcome: EncodingOutcome,
}

/// Applies an encoder outcome to the stored aggregate.
pub struct ProcessAudioVideoMediasUseCase {
    video_repository: Arc<dyn VideoRepository>,
}

impl ProcessAudioVideoMediasUseCase {
    /// Wires the use case over the video repository.
    #[must_use]
    pub fn new(video_repository: Arc<dyn VideoRepository>) -> Self {
        Self { video_repository }
    }

    /// Runs the state transition and persists it in the unit of work.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] on a malformed id;
    /// [`DomainError::NotFound`] when the video, or the media slot the
    /// outcome refers to, does not exist; transaction failures propagate
    /// unchanged.
    #[tracing::instrument(skip_all, fields(video_id = %input.video_id, media_type = %input.media_type))]
    pub async fn execute<U>(
        &self,
        input: ProcessAudioVideoMediaInput,
        uow: &mut U,
    ) -> Result<(), DomainError>
    where
        U: UnitOfWork<Video>,
    {
        let video_id: VideoId = input.video_id.parse()?;
        let mut video = self
            .video_repository
            .find_by_id(&video_id)
            .await?
            .ok_or_else(|| NotFoundError::new(&input.video_id, Video::entity_name()))?;

        match &input.outcome {
            EncodingOutcome::Completed { encoded_location } => {
                video.complete_audio_video_media(input.media_type, encoded_location)?;
            }
            EncodingOutcome::Failed => {
                video.fail_audio_video_media(input.media_type)?;
            }
        }

        let repository = Arc::clone(&self.video_repository);
        run_in_transaction(uow, move |_uow| {
            Box::pin(async move { repository.update(video).await })
        })
        .await
    }
}
