//! Recording event-handler doubles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog_core::error::DomainError;
use catalog_core::event::{DomainEvent, IntegrationEvent};
use catalog_core::mediator::{DomainEventHandler, IntegrationEventHandler};

/// Shared ordered log of lifecycle and dispatch markers.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

/// Local handler that keeps every received event and optionally writes a
/// `local-event` marker into a shared call log.
pub struct RecordingDomainEventHandler<E> {
    events: Mutex<Vec<E>>,
    call_log: Option<CallLog>,
}

impl<E> RecordingDomainEventHandler<E> {
    /// Creates a handler with no call log attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            call_log: None,
        }
    }

    /// Attaches a shared call log receiving `local-event` markers.
    #[must_use]
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.call_log = Some(log);
        self
    }

    /// Snapshot of the received events, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn received(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.events.lock().unwrap().clone()
    }
}

impl<E> Default for RecordingDomainEventHandler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: DomainEvent + Clone> DomainEventHandler<E> for RecordingDomainEventHandler<E> {
    async fn handle(&self, event: &E) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event.clone());
        if let Some(log) = &self.call_log {
            log.lock().unwrap().push("local-event");
        }
        Ok(())
    }
}

/// Integration handler that keeps every received event and optionally
/// writes an `integration-event` marker into a shared call log.
pub struct RecordingIntegrationEventHandler {
    events: Mutex<Vec<IntegrationEvent>>,
    call_log: Option<CallLog>,
}

impl RecordingIntegrationEventHandler {
    /// Creates a handler with no call log attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            call_log: None,
        }
    }

    /// Attaches a shared call log receiving `integration-event` markers.
    #[must_use]
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.call_log = Some(log);
        self
    }

    /// Snapshot of the received integration events, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn received(&self) -> Vec<IntegrationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for RecordingIntegrationEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntegrationEventHandler for RecordingIntegrationEventHandler {
    async fn handle(&self, event: &IntegrationEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event.clone());
        if let Some(log) = &self.call_log {
            log.lock().unwrap().push("integration-event");
        }
        Ok(())
    }
}
