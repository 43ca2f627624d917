//! Create-video use case.

use std::sync::Arc;

use catalog_castmember::application::validations::CastMembersIdExistsValidator;
use catalog_category::application::validations::CategoriesIdExistsValidator;
use catalog_core::aggregate::{Entity, share};
use catalog_core::clock::Clock;
use catalog_core::error::{DomainError, EntityValidationError, NotFoundError};
use catalog_core::notification::Notification;
use catalog_core::uow::{UnitOfWork, run_in_transaction};
use catalog_genre::application::validations::GenresIdExistsValidator;
use serde::{Deserialize, Serialize};

use crate::domain::rating::Rating;
use crate::domain::repository::VideoRepository;
use crate::domain::video::{Video, VideoProps};

/// Request to create a video.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideoInput {
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
    /// Referenced category ids.
    pub categories_id: Vec<String>,
    /// Referenced genre ids.
    pub genres_id: Vec<String>,
    /// Referenced cast member ids.
    pub cast_members_id: Vec<String>,
}

/// Identifier of the created aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateVideoOutput {
    /// The new video's id.
    pub id: String,
}

/// Creates a video after validating the rating and every cross-aggregate
/// reference, reporting all problems of one request in a single batch.
pub struct CreateVideoUseCase {
    video_repository: Arc<dyn VideoRepository>,
    categories_validator: CategoriesIdExistsValidator,
    genres_validator: GenresIdExistsValidator,
    cast_members_validator: CastMembersIdExistsValidator,
    clock: Arc<dyn Clock>,
}

impl CreateVideoUseCase {
    /// Wires the use case over its repository, validators, and clock.
    #[must_use]
    pub fn new(
        video_repository: Arc<dyn VideoRepository>,
        categories_validator: CategoriesIdExistsValidator,
        genres_validator: GenresIdExistsValidator,
        cast_members_validator: CastMembersIdExistsValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            video_repository,
            categories_validator,
            genres_validator,
            cast_members_validator,
            clock,
        }
    }

    /// Runs the creation: soft-validate, construct, abort on any
    /// accumulated error, then persist inside the unit of work.
    ///
    /// # Errors
    ///
    /// [`DomainError::EntityValidation`] with every accumulated problem;
    /// [`DomainError::InvalidId`] immediately on a malformed reference
    /// id; repository and transaction failures propagate unchanged.
    #[tracing::instrument(skip_all, fields(title = %input.title))]
    pub async fn execute<U>(
        &self,
        input: CreateVideoInput,
        uow: &mut U,
    ) -> Result<CreateVideoOutput, DomainError>
    where
        U: UnitOfWork<Video>,
    {
        let mut notification = Notification::new();

        let rating = match input.rating.parse::<Rating>() {
            Ok(rating) => Some(rating),
            Err(err) => {
                notification.add_error_on("rating", err.to_string());
                None
            }
        };

        let categories_id = soft_ids(
            self.categories_validator.validate(&input.categories_id).await?,
            "categories_id",
            &mut notification,
        )
        .unwrap_or_default();
        let genres_id = soft_ids(
            self.genres_validator.validate(&input.genres_id).await?,
            "genres_id",
            &mut notification,
        )
        .unwrap_or_default();
        let cast_members_id = soft_ids(
            self.cast_members_validator
                .validate(&input.cast_members_id)
                .await?,
            "cast_members_id",
            &mut notification,
        )
        .unwrap_or_default();

        // A placeholder rating keeps construction going when the label was
        // rejected; the accumulated rating error aborts before persistence.
        let mut video = Video::create(
            VideoProps {
                title: input.title,
                description: input.description,
                year_launched: input.year_launched,
                duration: input.duration,
                rating: rating.unwrap_or_default(),
                is_opened: input.is_opened,
                categories_id: categories_id.into_iter().collect(),
                genres_id: genres_id.into_iter().collect(),
                cast_members_id: cast_members_id.into_iter().collect(),
            },
            self.clock.as_ref(),
        );
        video.notification_mut().copy_errors(&notification);

        if video.notification().has_errors() {
            return Err(EntityValidationError::new(video.notification().clone()).into());
        }

        let id = video.entity_id().to_string();
        let repository = Arc::clone(&self.video_repository);
        let root = share(video);
        run_in_transaction(uow, move |uow| {
            Box::pin(async move {
                let snapshot = root.lock().await.clone();
                repository.insert(snapshot).await?;
                uow.add_aggregate_root(root);
                Ok(())
            })
        })
        .await?;

        tracing::debug!(video_id = %id, "video created");
        Ok(CreateVideoOutput { id })
    }
}

/// Accepts the validated ids or merges the not-found batch into the
/// notification under `field`, replacing any prior batch for it.
fn soft_ids<I>(
    outcome: Result<Vec<I>, Vec<NotFoundError>>,
    field: &str,
    notification: &mut Notification,
) -> Option<Vec<I>> {
    match outcome {
        Ok(ids) => Some(ids),
        Err(errors) => {
            notification.set_errors_on(field, errors.iter().map(ToString::to_string).collect());
            None
        }
    }
}
