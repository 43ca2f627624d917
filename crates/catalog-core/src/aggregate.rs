//! Entity and aggregate-root abstractions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::event::DomainEvent;
use crate::notification::Notification;

/// Trait for domain entities with a typed identity and an owned
/// validation notification.
///
/// Two entities of the same type are equal iff their ids are equal;
/// concrete types implement `PartialEq` on the id alone.
pub trait Entity: Send + Sync {
    /// The identity value object for this entity type.
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Display + Send + Sync;

    /// Type name used in error messages.
    fn entity_name() -> &'static str
    where
        Self: Sized;

    /// The entity's identity.
    fn entity_id(&self) -> &Self::Id;

    /// Creation timestamp, the default sort key for listings.
    fn created_at(&self) -> DateTime<Utc>;

    /// The notification accumulating this entity's validation errors,
    /// created with the entity and scoped to its lifetime.
    fn notification(&self) -> &Notification;

    /// Mutable access for validators and use cases merging in errors.
    fn notification_mut(&mut self) -> &mut Notification;
}

/// Trait for aggregate roots that record domain events during mutation.
///
/// Mutation methods update derived state inline and then record the
/// event, so the aggregate's own reaction always precedes any external
/// dispatch performed by the mediator.
pub trait AggregateRoot: Entity {
    /// The event union this aggregate produces.
    type Event: DomainEvent + Clone;

    /// Events recorded since the last clear, in recording order.
    fn recorded_events(&self) -> &[Self::Event];

    /// Empties the recorded-event list once dispatch is complete.
    fn clear_recorded_events(&mut self);
}

/// Request-scoped shared handle to an aggregate root, used by the unit of
/// work's touched-aggregate set and by event publication. Never shared
/// across requests.
pub type SharedAggregate<A> = Arc<Mutex<A>>;

/// Wraps an aggregate into the shared handle form.
#[must_use]
pub fn share<A>(aggregate: A) -> SharedAggregate<A> {
    Arc::new(Mutex::new(aggregate))
}
