//! Mediator handler forwarding integration events to the broker.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_core::event::IntegrationEvent;
use catalog_core::mediator::IntegrationEventHandler;

use crate::broker::MessageBroker;

/// Integration-event handler that forwards to the broker. Registered with
/// the mediator, so it only ever runs after the owning transaction
/// committed.
pub struct BrokerEventPublisher {
    broker: Arc<dyn MessageBroker>,
}

impl BrokerEventPublisher {
    /// Creates the publisher over a broker.
    #[must_use]
    pub fn new(broker: Arc<dyn MessageBroker>) -> Self {
        Self { broker }
    }
}

#[async_trait]
impl IntegrationEventHandler for BrokerEventPublisher {
    async fn handle(&self, event: &IntegrationEvent) -> Result<(), DomainError> {
        tracing::debug!(name = event.name, "publishing integration event");
        self.broker.publish_event(event).await
    }
}
