//! Upload-audio-video-media use case.
//!
//! The event-producing half of the async encoding loop: stores the raw
//! upload, replaces the aggregate's media slot (which records the
//! replacement event), and persists inside the transaction owned by the
//! caller's application service. After the commit, the recorded event's
//! integration form reaches the encoder through the broker.

use std::sync::Arc;

use catalog_core::aggregate::{Entity, share};
use catalog_core::clock::Clock;
use catalog_core::error::{DomainError, EntityValidationError, NotFoundError};
use catalog_core::notification::Notification;
use catalog_core::storage::{Storage, StorageObject};
use catalog_core::uow::UnitOfWork;

use crate::domain::media::{
    AudioVideoMedia, AudioVideoMediaType, MediaFile, TRAILER_RULES, UploadedFile, VIDEO_RULES,
};
use crate::domain::repository::VideoRepository;
use crate::domain::video::{Video, VideoId};

/// Request to upload one audio-video media file.
#[derive(Debug, Clone)]
pub struct UploadAudioVideoMediaInput {
    /// Id of the target video.
    pub video_id: String,
    /// Which slot the upload targets.
    pub media_type: AudioVideoMediaType,
    /// The raw upload.
    pub file: UploadedFile,
}

/// Uploads a trailer or main video file and records the replacement
/// event for post-commit publication.
pub struct UploadAudioVideoMediasUseCase {
    video_repository: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl UploadAudioVideoMediasUseCase {
    /// Wires the use case over the repository, blob storage, and clock.
    #[must_use]
    pub fn new(
        video_repository: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            video_repository,
            storage,
            clock,
        }
    }

    /// Runs the upload. The caller's application service owns the
    /// transaction; this method only persists and registers the root for
    /// post-commit event publication.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidId`] on a malformed id;
    /// [`DomainError::NotFound`] when the video does not exist;
    /// [`DomainError::EntityValidation`] when the file breaks the slot's
    /// size or mime rules; storage and repository failures propagate
    /// unchanged.
    #[tracing::instrument(skip_all, fields(video_id = %input.video_id, media_type = %input.media_type))]
    pub async fn execute<U>(
        &self,
        input: UploadAudioVideoMediaInput,
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

        let rules = match input.media_type {
            AudioVideoMediaType::Trailer => TRAILER_RULES,
            AudioVideoMediaType::Video => VIDEO_RULES,
        };
        let media_file = match MediaFile::from_upload(&input.file, &rules) {
            Ok(media_file) => media_file,
            Err(err) => {
                let mut notification = Notification::new();
                notification.add_error_on(&input.media_type.to_string(), err.to_string());
                return Err(EntityValidationError::new(notification).into());
            }
        };

        let location = format!("{video_id}/{}", media_file.name);
        self.storage
            .store(StorageObject {
                id: location.clone(),
                data: input.file.data,
                mime_type: media_file.mime_type.clone(),
            })
            .await?;

        let media = AudioVideoMedia::new(media_file.name, location);
        match input.media_type {
            AudioVideoMediaType::Trailer => video.replace_trailer(media, self.clock.as_ref()),
            AudioVideoMediaType::Video => video.replace_video(media, self.clock.as_ref()),
        }

        let root = share(video);
        let snapshot = root.lock().await.clone();
        self.video_repository.update(snapshot).await?;
        uow.add_aggregate_root(root);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use catalog_core::aggregate::AggregateRoot;
    use catalog_core::application::ApplicationService;
    use catalog_core::clock::Clock;
    use catalog_core::mediator::DomainEventMediator;
    use catalog_core::repository::Repository;
    use catalog_core::storage::InMemoryStorage;
    use catalog_test_support::{
        CallLog, FixedClock, InMemoryRepository, RecordingDomainEventHandler,
        RecordingIntegrationEventHandler, RecordingUnitOfWork,
    };

    use super::*;
    use crate::domain::events::{AUDIO_VIDEO_MEDIA_UPLOADED, VideoEvent};
    use crate::domain::media::AudioVideoMediaStatus;
    use crate::domain::rating::Rating;
    use crate::domain::video::VideoProps;

    fn stored_video(clock: &dyn Clock) -> Video {
        let mut video = Video::create(
            VideoProps {
                title: "Alien".to_owned(),
                description: "Synopsis.".to_owned(),
                year_launched: 1979,
                duration: 117,
                rating: Rating::R16,
                is_opened: true,
                categories_id: HashSet::new(),
                genres_id: HashSet::new(),
                cast_members_id: HashSet::new(),
            },
            clock,
        );
        // A persisted aggregate comes back without pending events.
        video.clear_recorded_events();
        video
    }

    fn upload(video_id: String) -> UploadAudioVideoMediaInput {
        UploadAudioVideoMediaInput {
            video_id,
            media_type: AudioVideoMediaType::Video,
            file: UploadedFile {
                raw_name: "alien.mp4".to_owned(),
                data: b"raw bytes".to_vec(),
                mime_type: "video/mp4".to_owned(),
            },
        }
    }

    #[tokio::test]
    async fn test_upload_stores_the_file_and_replaces_the_slot() {
        // Arrange
        let clock = Arc::new(FixedClock::at(2026, 1, 15, 10, 0, 0));
        let repo = Arc::new(InMemoryRepository::<Video>::new());
        let storage = Arc::new(InMemoryStorage::new());
        let video = stored_video(clock.as_ref());
        let id = video.entity_id().to_string();
        repo.insert(video).await.unwrap();
        let use_case = UploadAudioVideoMediasUseCase::new(
            Arc::clone(&repo) as Arc<dyn VideoRepository>,
            Arc::clone(&storage) as Arc<dyn Storage>,
            clock,
        );
        let mut uow = RecordingUnitOfWork::<Video>::new();
        uow.start().await.unwrap();

        // Act
        use_case.execute(upload(id.clone()), &mut uow).await.unwrap();

        // Assert
        let stored = &repo.find_all().await.unwrap()[0];
        let media = stored.video().unwrap();
        assert_eq!(media.status, AudioVideoMediaStatus::Pending);
        assert!(media.raw_location.starts_with(&id));
        assert!(storage.get(&media.raw_location).await.is_ok());
        assert_eq!(uow.aggregate_roots().len(), 1);
    }

    #[tokio::test]
    async fn test_disallowed_mime_type_batches_into_a_validation_error() {
        // Arrange
        let clock = Arc::new(FixedClock::at(2026, 1, 15, 10, 0, 0));
        let repo = Arc::new(InMemoryRepository::<Video>::new());
        let video = stored_video(clock.as_ref());
        let id = video.entity_id().to_string();
        repo.insert(video).await.unwrap();
        let use_case = UploadAudioVideoMediasUseCase::new(
            Arc::clone(&repo) as Arc<dyn VideoRepository>,
            Arc::new(InMemoryStorage::new()),
            clock,
        );
        let mut uow = RecordingUnitOfWork::<Video>::new();

        let mut input = upload(id);
        input.file.mime_type = "video/x-matroska".to_owned();

        // Act
        let err = use_case.execute(input, &mut uow).await.unwrap_err();

        // Assert
        let DomainError::EntityValidation(validation) = err else {
            panic!("expected EntityValidation, got {err:?}");
        };
        assert_eq!(
            validation.notification.as_json(),
            serde_json::json!([
                {"video": ["mime type video/x-matroska is not allowed"]}
            ])
        );
    }

    #[tokio::test]
    async fn test_full_request_publishes_integration_event_only_after_commit() {
        // Arrange
        let clock = Arc::new(FixedClock::at(2026, 1, 15, 10, 0, 0));
        let repo = Arc::new(InMemoryRepository::<Video>::new());
        let video = stored_video(clock.as_ref());
        let id = video.entity_id().to_string();
        repo.insert(video).await.unwrap();
        let use_case = UploadAudioVideoMediasUseCase::new(
            Arc::clone(&repo) as Arc<dyn VideoRepository>,
            Arc::new(InMemoryStorage::new()),
            clock,
        );

        let log: CallLog = Arc::new(std::sync::Mutex::new(Vec::new()));
        let local_handler =
            Arc::new(RecordingDomainEventHandler::<VideoEvent>::new().with_call_log(Arc::clone(&log)));
        let integration_handler =
            Arc::new(RecordingIntegrationEventHandler::new().with_call_log(Arc::clone(&log)));
        let mut mediator: DomainEventMediator<VideoEvent> = DomainEventMediator::new();
        mediator.register(
            Arc::clone(&local_handler) as Arc<dyn catalog_core::mediator::DomainEventHandler<VideoEvent>>,
        );
        mediator.register_integration(
            Arc::clone(&integration_handler) as Arc<dyn catalog_core::mediator::IntegrationEventHandler>,
        );

        let uow = RecordingUnitOfWork::<Video>::new().with_call_log(Arc::clone(&log));
        let mut service = ApplicationService::new(uow, mediator);

        // Act
        let input = upload(id);
        service
            .run(move |uow| Box::pin(async move { use_case.execute(input, uow).await }))
            .await
            .unwrap();

        // Assert: local dispatch before the commit, integration after.
        assert_eq!(
            *log.lock().unwrap(),
            vec!["start", "local-event", "commit", "integration-event"]
        );
        let published = integration_handler.received();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].name, AUDIO_VIDEO_MEDIA_UPLOADED);
    }

    #[tokio::test]
    async fn test_integration_events_stay_unpublished_when_commit_fails() {
        // Arrange
        let clock = Arc::new(FixedClock::at(2026, 1, 15, 10, 0, 0));
        let repo = Arc::new(InMemoryRepository::<Video>::new());
        let video = stored_video(clock.as_ref());
        let id = video.entity_id().to_string();
        repo.insert(video).await.unwrap();
        let use_case = UploadAudioVideoMediasUseCase::new(
            Arc::clone(&repo) as Arc<dyn VideoRepository>,
            Arc::new(InMemoryStorage::new()),
            clock,
        );

        let log: CallLog = Arc::new(std::sync::Mutex::new(Vec::new()));
        let integration_handler =
            Arc::new(RecordingIntegrationEventHandler::new().with_call_log(Arc::clone(&log)));
        let mut mediator: DomainEventMediator<VideoEvent> = DomainEventMediator::new();
        mediator.register_integration(
            Arc::clone(&integration_handler) as Arc<dyn catalog_core::mediator::IntegrationEventHandler>,
        );

        let uow = RecordingUnitOfWork::<Video>::new()
            .failing_on_commit()
            .with_call_log(Arc::clone(&log));
        let mut service = ApplicationService::new(uow, mediator);

        // Act
        let input = upload(id);
        let err = service
            .run(move |uow| Box::pin(async move { use_case.execute(input, uow).await }))
            .await
            .unwrap_err();

        // Assert: the broker-facing handler never ran.
        assert_eq!(err, DomainError::Transaction("commit refused".into()));
        assert_eq!(*log.lock().unwrap(), vec!["start", "commit", "rollback"]);
        assert!(integration_handler.received().is_empty());
    }
}
