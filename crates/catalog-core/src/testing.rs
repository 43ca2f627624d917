//! Minimal aggregate fixture for this crate's own tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::aggregate::{AggregateRoot, Entity};
use crate::event::{DomainEvent, IntegrationEvent};
use crate::notification::Notification;

/// Event union of the stub aggregate: `Noted` converts to an integration
/// event, `Archived` stays local-only.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StubEvent {
    Noted { id: Uuid, text: String },
    Archived { id: Uuid },
}

impl DomainEvent for StubEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StubEvent::Noted { .. } => "stub.noted",
            StubEvent::Archived { .. } => "stub.archived",
        }
    }

    fn aggregate_id(&self) -> Uuid {
        match self {
            StubEvent::Noted { id, .. } | StubEvent::Archived { id } => *id,
        }
    }

    fn event_version(&self) -> i32 {
        1
    }

    fn occurred_on(&self) -> DateTime<Utc> {
        fixed_instant()
    }

    fn integration_event(&self) -> Option<IntegrationEvent> {
        match self {
            StubEvent::Noted { id, text } => Some(IntegrationEvent {
                name: "stub.noted",
                event_version: 1,
                occurred_on: fixed_instant(),
                payload: json!({"id": id.to_string(), "text": text}),
            }),
            StubEvent::Archived { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct StubAggregate {
    id: Uuid,
    created_at: DateTime<Utc>,
    notification: Notification,
    events: Vec<StubEvent>,
}

impl StubAggregate {
    pub(crate) fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: fixed_instant(),
            notification: Notification::new(),
            events: Vec::new(),
        }
    }

    pub(crate) fn note(&mut self, text: &str) {
        self.events.push(StubEvent::Noted {
            id: self.id,
            text: text.to_owned(),
        });
    }

    pub(crate) fn archive(&mut self) {
        self.events.push(StubEvent::Archived { id: self.id });
    }
}

impl Entity for StubAggregate {
    type Id = Uuid;

    fn entity_name() -> &'static str {
        "StubAggregate"
    }

    fn entity_id(&self) -> &Uuid {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn notification(&self) -> &Notification {
        &self.notification
    }

    fn notification_mut(&mut self) -> &mut Notification {
        &mut self.notification
    }
}

impl AggregateRoot for StubAggregate {
    type Event = StubEvent;

    fn recorded_events(&self) -> &[StubEvent] {
        &self.events
    }

    fn clear_recorded_events(&mut self) {
        self.events.clear();
    }
}

fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}
