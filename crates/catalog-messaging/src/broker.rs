//! Message broker contract.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_core::event::IntegrationEvent;

use crate::routing::{Route, RoutingTable};

/// Publishes integration events to the external broker, resolving the
/// destination through the injected routing table.
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Publishes one integration event.
    ///
    /// # Errors
    ///
    /// A configuration error when the event's name has no route; any
    /// transport failure otherwise.
    async fn publish_event(&self, event: &IntegrationEvent) -> Result<(), DomainError>;
}

/// Broker double that resolves routes for real and records what would
/// have been published.
#[derive(Debug)]
pub struct InMemoryMessageBroker {
    routing: RoutingTable,
    published: Mutex<Vec<(Route, IntegrationEvent)>>,
}

impl InMemoryMessageBroker {
    /// Creates the broker over a routing table.
    #[must_use]
    pub fn new(routing: RoutingTable) -> Self {
        Self {
            routing,
            published: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the recorded publications, in publish order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn published(&self) -> Vec<(Route, IntegrationEvent)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageBroker for InMemoryMessageBroker {
    async fn publish_event(&self, event: &IntegrationEvent) -> Result<(), DomainError> {
        let route = self.routing.route_for(event.name)?.clone();
        self.published
            .lock()
            .map_err(|_| DomainError::Infrastructure("broker mutex poisoned".into()))?
            .push((route, event.clone()));
        Ok(())
    }
}
