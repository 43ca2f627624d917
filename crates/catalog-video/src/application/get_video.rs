//! Get-video use case.

use std::sync::Arc;

use catalog_core::aggregate::Entity;
use catalog_core::error::{DomainError, NotFoundError};

use super::output::VideoOutput;
use crate::domain::repository::VideoRepository;
use crate::domain::video::{Video, VideoId};

/// Fetches one video by id.
pub struct GetVideoUseCase {
    video_repository: Arc<dyn VideoRepository>,
}

impl GetVideoUseCase {
    /// Wires the use case over the video repository.
    #[must_use]
    pub fn new(video_repository: Arc<dyn VideoRepository>) -> Self {
        Self { video_repository }
    }

    /// Looks the video up and maps it to its read view.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] on a malformed id;
    /// [`DomainError::NotFound`] when nothing is stored under it.
    pub async fn execute(&self, id: &str) -> Result<VideoOutput, DomainError> {
        let video_id: VideoId = id.parse()?;
        let video = self
            .video_repository
            .find_by_id(&video_id)
            .await?
            .ok_or_else(|| NotFoundError::new(id, Video::entity_name()))?;
        Ok(VideoOutput::from(&video))
    }
}
