//! Delete-video use case.

use std::sync::Arc;

use catalog_core::error::DomainError;
use catalog_core::uow::{UnitOfWork, run_in_transaction};

use crate::domain::repository::VideoRepository;
use crate::domain::video::{Video, VideoId};

/// Deletes a video by id inside the unit of work.
pub struct DeleteVideoUseCase {
    video_repository: Arc<dyn VideoRepository>,
}

impl DeleteVideoUseCase {
    /// Wires the use case over the video repository.
    #[must_use]
    pub fn new(video_repository: Arc<dyn VideoRepository>) -> Self {
        Self { video_repository }
    }

    /// Runs the deletion.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] on a malformed id;
    /// [`DomainError::NotFound`] when nothing is stored under it;
    /// transaction failures propagate unchanged.
    #[tracing::instrument(skip_all, fields(video_id = %id))]
    pub async fn execute<U>(&self, id: &str, uow: &mut U) -> Result<(), DomainError>
    where
        U: UnitOfWork<Video>,
    {
        let video_id: VideoId = id.parse()?;
        let repository = Arc::clone(&self.video_repository);
        run_in_transaction(uow, move |_uow| {
            Box::pin(async move { repository.delete(&video_id).await })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::aggregate::Entity;
    use catalog_core::error::NotFoundError;
    use catalog_core::repository::Repository;
    use catalog_core::uow::InMemoryUnitOfWork;
    use catalog_test_support::{FixedClock, InMemoryRepository};

    use super::*;
    use crate::domain::rating::Rating;
    use crate::domain::video::VideoProps;

    #[tokio::test]
    async fn test_delete_removes_the_stored_video() {
        // Arrange
        let clock = FixedClock::at(2026, 1, 15, 10, 0, 0);
        let repo = Arc::new(InMemoryRepository::<Video>::new());
        let video = Video::create(
            VideoProps {
                title: "Alien".to_owned(),
                description: "Theatrical cut.".to_owned(),
                year_launched: 1979,
                duration: 117,
                rating: Rating::R16,
                is_opened: true,
                categories_id: std::collections::HashSet::new(),
                genres_id: std::collections::HashSet::new(),
                cast_members_id: std::collections::HashSet::new(),
            },
            &clock,
        );
        let id = video.entity_id().to_string();
        repo.insert(video).await.unwrap();
        let use_case = DeleteVideoUseCase::new(Arc::clone(&repo) as Arc<dyn VideoRepository>);
        let mut uow = InMemoryUnitOfWork::<Video>::new();

        // Act
        use_case.execute(&id, &mut uow).await.unwrap();

        // Assert
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_a_missing_video_is_not_found() {
        // Arrange
        let repo = Arc::new(InMemoryRepository::<Video>::new());
        let use_case = DeleteVideoUseCase::new(Arc::clone(&repo) as Arc<dyn VideoRepository>);
        let mut uow = InMemoryUnitOfWork::<Video>::new();
        let missing = VideoId::new();

        // Act
        let err = use_case
            .execute(&missing.to_string(), &mut uow)
            .await
            .unwrap_err();

        // Assert
        assert_eq!(
            err,
            DomainError::NotFound(NotFoundError::new(missing.to_string(), "Video"))
        );
    }
}
