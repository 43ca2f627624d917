//! Shared test doubles for the video catalog admin backend.

mod clock;
mod handlers;
mod repository;
mod uow;

pub use clock::FixedClock;
pub use handlers::{CallLog, RecordingDomainEventHandler, RecordingIntegrationEventHandler};
pub use repository::InMemoryRepository;
pub use uow::RecordingUnitOfWork;
