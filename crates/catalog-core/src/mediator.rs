//! Domain event dispatch to local and external subscribers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;
use crate::event::{DomainEvent, IntegrationEvent};

/// In-process subscriber to an aggregate's domain events. Handlers
/// receive the full event union and match the variants they care about,
/// which keeps dispatch exhaustive at compile time.
#[async_trait]
pub trait DomainEventHandler<E: DomainEvent>: Send + Sync {
    /// Reacts to one recorded event.
    async fn handle(&self, event: &E) -> Result<(), DomainError>;
}

/// Subscriber to integration events. Invoked only after the owning
/// transaction committed.
#[async_trait]
pub trait IntegrationEventHandler: Send + Sync {
    /// Forwards one integration event to its external destination.
    async fn handle(&self, event: &IntegrationEvent) -> Result<(), DomainError>;
}

/// Dispatcher replaying an aggregate's recorded events to registered
/// subscribers: local handlers first, integration handlers strictly after
/// the commit.
pub struct DomainEventMediator<E: DomainEvent> {
    handlers: Vec<Arc<dyn DomainEventHandler<E>>>,
    integration_handlers: Vec<Arc<dyn IntegrationEventHandler>>,
}

impl<E: DomainEvent> Default for DomainEventMediator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> DomainEventMediator<E> {
    /// Creates a mediator with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            integration_handlers: Vec::new(),
        }
    }

    /// Subscribes a local handler. Handlers run in registration order.
    pub fn register(&mut self, handler: Arc<dyn DomainEventHandler<E>>) {
        self.handlers.push(handler);
    }

    /// Subscribes an integration-event handler for the after-commit leg.
    pub fn register_integration(&mut self, handler: Arc<dyn IntegrationEventHandler>) {
        self.integration_handlers.push(handler);
    }

    /// Dispatches every event recorded on `aggregate`, in recording
    /// order, to every local handler. The recorded-event list is left in
    /// place: integration publication still needs it.
    ///
    /// # Errors
    ///
    /// The first handler failure aborts dispatch and propagates.
    pub async fn publish<A>(&self, aggregate: &A) -> Result<(), DomainError>
    where
        A: AggregateRoot<Event = E>,
    {
        for event in aggregate.recorded_events() {
            tracing::debug!(event_type = event.event_type(), "dispatching domain event");
            for handler in &self.handlers {
                handler.handle(event).await?;
            }
        }
        Ok(())
    }

    /// Converts each recorded event that exposes an integration form and
    /// dispatches it to the integration handlers. Local-only events are
    /// skipped without error. Must only be called after the unit of work
    /// committed, so external consumers never observe unpersisted state.
    ///
    /// # Errors
    ///
    /// The first handler failure aborts dispatch and propagates.
    pub async fn publish_integration_events<A>(&self, aggregate: &A) -> Result<(), DomainError>
    where
        A: AggregateRoot<Event = E>,
    {
        for event in aggregate.recorded_events() {
            let Some(integration_event) = event.integration_event() else {
                continue;
            };
            tracing::debug!(name = integration_event.name, "dispatching integration event");
            for handler in &self.integration_handlers {
                handler.handle(&integration_event).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::testing::{StubAggregate, StubEvent};

    struct RecordingHandler {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl DomainEventHandler<StubEvent> for RecordingHandler {
        async fn handle(&self, event: &StubEvent) -> Result<(), DomainError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.tag, event.event_type()));
            Ok(())
        }
    }

    struct RecordingIntegrationHandler {
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl IntegrationEventHandler for RecordingIntegrationHandler {
        async fn handle(&self, event: &IntegrationEvent) -> Result<(), DomainError> {
            self.log.lock().unwrap().push(format!("int:{}", event.name));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_publish_dispatches_in_recording_then_registration_order() {
        // Arrange
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut mediator: DomainEventMediator<StubEvent> = DomainEventMediator::new();
        mediator.register(Arc::new(RecordingHandler {
            tag: "a",
            log: Arc::clone(&log),
        }));
        mediator.register(Arc::new(RecordingHandler {
            tag: "b",
            log: Arc::clone(&log),
        }));

        let mut aggregate = StubAggregate::new();
        aggregate.note("first");
        aggregate.archive();

        // Act
        mediator.publish(&aggregate).await.unwrap();

        // Assert
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "a:stub.noted".to_owned(),
                "b:stub.noted".to_owned(),
                "a:stub.archived".to_owned(),
                "b:stub.archived".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn test_publish_leaves_recorded_events_in_place() {
        // Arrange
        let mediator: DomainEventMediator<StubEvent> = DomainEventMediator::new();
        let mut aggregate = StubAggregate::new();
        aggregate.note("kept");

        // Act
        mediator.publish(&aggregate).await.unwrap();

        // Assert
        assert_eq!(aggregate.recorded_events().len(), 1);
    }

    #[tokio::test]
    async fn test_integration_publication_skips_local_only_events() {
        // Arrange
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut mediator: DomainEventMediator<StubEvent> = DomainEventMediator::new();
        mediator.register_integration(Arc::new(RecordingIntegrationHandler {
            log: Arc::clone(&log),
        }));

        let mut aggregate = StubAggregate::new();
        aggregate.archive();
        aggregate.note("external");

        // Act
        mediator.publish_integration_events(&aggregate).await.unwrap();

        // Assert: only the noted event converts to an integration event.
        assert_eq!(*log.lock().unwrap(), vec!["int:stub.noted".to_owned()]);
    }
}
