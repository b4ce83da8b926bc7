//! Journal state.
//!
//! A [`Journal`] is an immutable value: every edit returns a new journal and
//! leaves the original untouched, so the timeline can be reassembled from any
//! snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer::{AnswerError, AnswerField, AnswerValue};
use crate::catalog::Catalog;
use crate::custom_event::{CustomEvent, EventField};
use crate::image::ImageRef;

/// Everything the user has entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    /// Name shown in the timeline header and used for export filenames.
    #[serde(default)]
    pub user_name: String,

    /// Answers keyed by question key.
    #[serde(default, rename = "formData")]
    pub answers: BTreeMap<String, AnswerValue>,

    /// Custom events in creation order.
    #[serde(default)]
    pub custom_events: Vec<CustomEvent>,

    /// Images attached to preset questions, keyed by question key.
    #[serde(default, rename = "uploadedImages")]
    pub images: BTreeMap<String, ImageRef>,

    /// When the journal was last written to disk.
    #[serde(default)]
    pub last_saved: Option<DateTime<Utc>>,
}

/// Errors that can occur when editing a journal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Unknown custom event: {0}")]
    UnknownEvent(Uuid),

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

impl Journal {
    /// True when there is nothing worth saving.
    pub fn is_blank(&self) -> bool {
        self.user_name.is_empty()
            && self.answers.is_empty()
            && self.custom_events.is_empty()
            && self.images.is_empty()
    }

    /// Look up a custom event by id.
    pub fn custom_event(&self, id: Uuid) -> Option<&CustomEvent> {
        self.custom_events.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn with_user_name(&self, name: impl Into<String>) -> Self {
        Self {
            user_name: name.into(),
            ..self.clone()
        }
    }

    /// Set one field of a question's answer, creating the answer on first edit.
    pub fn with_answer_field(
        &self,
        catalog: &Catalog,
        key: &str,
        field: AnswerField,
        value: impl Into<String>,
    ) -> Result<Self, JournalError> {
        let (_, question) = catalog
            .question(key)
            .ok_or_else(|| JournalError::UnknownQuestion(key.to_string()))?;

        let current = self
            .answers
            .get(key)
            .cloned()
            .unwrap_or_else(|| AnswerValue::empty_for(question.kind));
        let updated = current.with_field(field, value)?;

        let mut next = self.clone();
        next.answers.insert(key.to_string(), updated);
        Ok(next)
    }

    /// Attach an image to a preset question, replacing any previous one.
    pub fn with_image(&self, catalog: &Catalog, key: &str, image: ImageRef) -> Result<Self, JournalError> {
        if catalog.question(key).is_none() {
            return Err(JournalError::UnknownQuestion(key.to_string()));
        }
        let mut next = self.clone();
        next.images.insert(key.to_string(), image);
        Ok(next)
    }

    /// Remove a question's image. Removing a missing image is a no-op.
    #[must_use]
    pub fn without_image(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.images.remove(key);
        next
    }

    /// Append a new empty custom event, returning the journal and its id.
    #[must_use]
    pub fn with_custom_event_added(&self) -> (Self, Uuid) {
        self.with_custom_event(CustomEvent::new())
    }

    /// Append a prepared custom event.
    #[must_use]
    pub fn with_custom_event(&self, event: CustomEvent) -> (Self, Uuid) {
        let id = event.id;
        let mut next = self.clone();
        next.custom_events.push(event);
        (next, id)
    }

    /// Set one text field of a custom event.
    pub fn with_custom_event_field(
        &self,
        id: Uuid,
        field: EventField,
        value: impl Into<String>,
    ) -> Result<Self, JournalError> {
        let value = value.into();
        self.map_custom_event(id, |event| event.with_field(field, value))
    }

    /// Replace (or clear) a custom event's image.
    pub fn with_custom_event_image(&self, id: Uuid, image: Option<ImageRef>) -> Result<Self, JournalError> {
        self.map_custom_event(id, |event| event.with_image(image))
    }

    /// Delete a custom event.
    pub fn without_custom_event(&self, id: Uuid) -> Result<Self, JournalError> {
        if self.custom_event(id).is_none() {
            return Err(JournalError::UnknownEvent(id));
        }
        let mut next = self.clone();
        next.custom_events.retain(|e| e.id != id);
        Ok(next)
    }

    fn map_custom_event(
        &self,
        id: Uuid,
        f: impl FnOnce(&CustomEvent) -> CustomEvent,
    ) -> Result<Self, JournalError> {
        let index = self
            .custom_events
            .iter()
            .position(|e| e.id == id)
            .ok_or(JournalError::UnknownEvent(id))?;
        let mut next = self.clone();
        next.custom_events[index] = f(&self.custom_events[index]);
        Ok(next)
    }
}
