//! Domain and integration event abstractions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Trait implemented by every aggregate's event union.
///
/// Events are recorded on the aggregate during mutation and dispatched by
/// the mediator after the use case ran; recording alone never reaches an
/// external consumer.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Type name used for logging and broker routing tables. Dispatch
    /// itself goes through the concrete event union, not this string.
    fn event_type(&self) -> &'static str;

    /// Id of the aggregate that produced the event.
    fn aggregate_id(&self) -> Uuid;

    /// Schema version of the event payload.
    fn event_version(&self) -> i32;

    /// When the mutation producing the event happened.
    fn occurred_on(&self) -> DateTime<Utc>;

    /// The externally published form of this event, or `None` for
    /// local-only events, which integration publication silently skips.
    fn integration_event(&self) -> Option<IntegrationEvent> {
        None
    }
}

/// Externally published counterpart of a domain event, delivered through
/// the message broker only after the owning transaction committed.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationEvent {
    /// Name used to look up the broker route.
    pub name: &'static str,
    /// Schema version of the payload.
    pub event_version: i32,
    /// Timestamp inherited from the originating domain event.
    pub occurred_on: DateTime<Utc>,
    /// Opaque serialized payload.
    pub payload: serde_json::Value,
}
