//! Update-video use case.

use std::sync::Arc;

use catalog_castmember::application::validations::CastMembersIdExistsValidator;
use catalog_category::application::validations::CategoriesIdExistsValidator;
use catalog_core::aggregate::{Entity, share};
use catalog_core::error::{DomainError, EntityValidationError, NotFoundError};
use catalog_core::notification::Notification;
use catalog_core::uow::{UnitOfWork, run_in_transaction};
use catalog_genre::application::validations::GenresIdExistsValidator;
use serde::{Deserialize, Serialize};

use crate::domain::rating::Rating;
use crate::domain::repository::VideoRepository;
use crate::domain::video::{Video, VideoId};

/// Partial update request; absent fields are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVideoInput {
    /// Id of the video to update.
    pub id: String,
    /// New title.
    pub title: Option<String>,
    /// New synopsis.
    pub description: Option<String>,
    /// New release year.
    pub year_launched: Option<i32>,
    /// New duration in minutes.
    pub duration: Option<i32>,
    /// New rating label.
    pub rating: Option<String>,
    /// New released flag.
    pub is_opened: Option<bool>,
    /// Replacement category reference set.
    pub categories_id: Option<Vec<String>>,
    /// Replacement genre reference set.
    pub genres_id: Option<Vec<String>>,
    /// Replacement cast member reference set.
    pub cast_members_id: Option<Vec<String>>,
}

/// Identifier of the updated aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVideoOutput {
    /// The updated video's id.
    pub id: String,
}

/// Applies a partial update, re-validating only the touched rule groups
/// and any provided reference sets, then persists in the unit of work.
pub struct UpdateVideoUseCase {
    video_repository: Arc<dyn VideoRepository>,
    categories_validator: CategoriesIdExistsValidator,
    genres_validator: GenresIdExistsValidator,
    cast_members_validator: CastMembersIdExistsValidator,
}

impl UpdateVideoUseCase {
    /// Wires the use case over its repository and validators.
    #[must_use]
    pub fn new(
        video_repository: Arc<dyn VideoRepository>,
        categories_validator: CategoriesIdExistsValidator,
        genres_validator: GenresIdExistsValidator,
        cast_members_validator: CastMembersIdExistsValidator,
    ) -> Self {
        Self {
            video_repository,
            categories_validator,
            genres_validator,
            cast_members_validator,
        }
    }

    /// Runs the update.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotFound`] immediately when the video does not
    /// exist; [`DomainError::InvalidId`] on malformed ids;
    /// [`DomainError::EntityValidation`] with every accumulated problem;
    /// repository and transaction failures propagate unchanged.
    #[tracing::instrument(skip_all, fields(video_id = %input.id))]
    pub async fn execute<U>(
        &self,
        input: UpdateVideoInput,
        uow: &mut U,
    ) -> Result<UpdateVideoOutput, DomainError>
    where
        U: UnitOfWork<Video>,
    {
        let video_id: VideoId = input.id.parse()?;
        let mut video = self
            .video_repository
            .find_by_id(&video_id)
            .await?
            .ok_or_else(|| NotFoundError::new(&input.id, Video::entity_name()))?;

        let mut notification = Notification::new();

        if let Some(rating) = &input.rating {
            match rating.parse::<Rating>() {
                Ok(rating) => video.change_rating(rating),
                Err(err) => notification.add_error_on("rating", err.to_string()),
            }
        }
        if let Some(title) = input.title {
            video.change_title(title);
        }
        if let Some(description) = input.description {
            video.change_description(description);
        }
        if let Some(year_launched) = input.year_launched {
            video.change_year_launched(year_launched);
        }
        if let Some(duration) = input.duration {
            video.change_duration(duration);
        }
        match input.is_opened {
            Some(true) => video.open(),
            Some(false) => video.close(),
            None => {}
        }

        if let Some(ids) = &input.categories_id {
            match self.categories_validator.validate(ids).await? {
                Ok(ids) => video.sync_categories_id(ids),
                Err(errors) => notification.set_errors_on(
                    "categories_id",
                    errors.iter().map(ToString::to_string).collect(),
                ),
            }
        }
        if let Some(ids) = &input.genres_id {
            match self.genres_validator.validate(ids).await? {
                Ok(ids) => video.sync_genres_id(ids),
                Err(errors) => notification.set_errors_on(
                    "genres_id",
                    errors.iter().map(ToString::to_string).collect(),
                ),
            }
        }
        if let Some(ids) = &input.cast_members_id {
            match self.cast_members_validator.validate(ids).await? {
                Ok(ids) => video.sync_cast_members_id(ids),
                Err(errors) => notification.set_errors_on(
                    "cast_members_id",
                    errors.iter().map(ToString::to_string).collect(),
                ),
            }
        }

        video.notification_mut().copy_errors(&notification);
        if video.notification().has_errors() {
            return Err(EntityValidationError::new(video.notification().clone()).into());
        }

        let repository = Arc::clone(&self.video_repository);
        let root = share(video);
        run_in_transaction(uow, move |uow| {
            Box::pin(async move {
                let snapshot = root.lock().await.clone();
                repository.update(snapshot).await?;
                uow.add_aggregate_root(root);
                Ok(())
            })
        })
        .await?;

        Ok(UpdateVideoOutput { id: input.id })
    }
}
