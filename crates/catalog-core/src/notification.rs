//! Error accumulation for entity validation.
//!
//! A [`Notification`] collects every validation problem found during one
//! construction or mutation attempt instead of failing on the first one,
//! so a single response can enumerate all of them at once.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    /// A field-less message, keyed by its own text.
    Bare(String),
    /// A named field and its accumulated messages.
    Field {
        name: String,
        messages: Vec<String>,
    },
}

/// Accumulator of validation and business errors, keyed by field name or,
/// for bare messages, by the message text itself. Entries keep their
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    entries: Vec<Entry>,
}

impl Notification {
    /// Creates an empty notification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field-less error, keyed by its own text. Adding the same
    /// message twice keeps a single entry.
    pub fn add_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        let already_present = self
            .entries
            .iter()
            .any(|entry| matches!(entry, Entry::Bare(existing) if *existing == message));
        if !already_present {
            self.entries.push(Entry::Bare(message));
        }
    }

    /// Appends an error to `field` unless the exact message is already
    /// present on it.
    pub fn add_error_on(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        if let Some(messages) = self.field_messages_mut(field) {
            if !messages.contains(&message) {
                messages.push(message);
            }
        } else {
            self.entries.push(Entry::Field {
                name: field.to_owned(),
                messages: vec![message],
            });
        }
    }

    /// Overwrites the error list of `field`. Unlike [`add_error_on`], prior
    /// content is discarded, so repeated calls replace rather than
    /// accumulate — used when merging externally computed error batches.
    ///
    /// [`add_error_on`]: Notification::add_error_on
    pub fn set_errors_on(&mut self, field: &str, messages: Vec<String>) {
        if let Some(existing) = self.field_messages_mut(field) {
            *existing = messages;
        } else {
            self.entries.push(Entry::Field {
                name: field.to_owned(),
                messages,
            });
        }
    }

    /// Merges every entry of `other` into `self`, preserving field keys.
    /// Field entries overwrite, bare messages keep uniqueness semantics.
    pub fn copy_errors(&mut self, other: &Notification) {
        for entry in &other.entries {
            match entry {
                Entry::Bare(message) => self.add_error(message.clone()),
                Entry::Field { name, messages } => self.set_errors_on(name, messages.clone()),
            }
        }
    }

    /// Returns true iff at least one entry exists.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Serialized form: an ordered sequence mixing bare strings and
    /// `{field: [messages]}` objects, in insertion order.
    ///
    /// # Panics
    ///
    /// Never panics; the serializer for this type is infallible.
    #[must_use]
    pub fn as_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("Notification serialization is infallible")
    }

    fn field_messages_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Field { name, messages } if name == field => Some(messages),
            _ => None,
        })
    }
}

impl Serialize for Notification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            match entry {
                Entry::Bare(message) => seq.serialize_element(message)?,
                Entry::Field { name, messages } => {
                    seq.serialize_element(&FieldEntry { name, messages })?;
                }
            }
        }
        seq.end()
    }
}

struct FieldEntry<'a> {
    name: &'a str,
    messages: &'a [String],
}

impl Serialize for FieldEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, self.messages)?;
        map.end()
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_json())
    }
}
