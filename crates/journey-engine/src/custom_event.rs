//! User-authored timeline events not tied to a preset question.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image::ImageRef;

/// A free-form event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEvent {
    /// Unique token assigned at creation.
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// Editable text fields of a custom event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Title,
    Date,
    EndDate,
    Description,
}

/// A field name that is not one of [`EventField`].
#[derive(Debug, thiserror::Error)]
#[error("Unknown event field: {0}")]
pub struct UnknownEventField(pub String);

impl std::str::FromStr for EventField {
    type Err = UnknownEventField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "date" => Ok(Self::Date),
            "endDate" | "end_date" | "end" => Ok(Self::EndDate),
            "description" => Ok(Self::Description),
            other => Err(UnknownEventField(other.to_string())),
        }
    }
}

impl CustomEvent {
    /// Create an empty event with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            date: String::new(),
            end_date: String::new(),
            description: String::new(),
            image: None,
        }
    }

    /// Whether the event shows up on the timeline (needs a title and a date).
    pub fn is_eligible(&self) -> bool {
        !self.title.is_empty() && !self.date.is_empty()
    }

    /// Return a copy with one text field replaced.
    #[must_use]
    pub fn with_field(&self, field: EventField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            EventField::Title => &mut next.title,
            EventField::Date => &mut next.date,
            EventField::EndDate => &mut next.end_date,
            EventField::Description => &mut next.description,
        };
        *slot = value.into();
        next
    }

    /// Return a copy with the image replaced (or cleared).
    #[must_use]
    pub fn with_image(&self, image: Option<ImageRef>) -> Self {
        Self {
            image,
            ..self.clone()
        }
    }
}

impl Default for CustomEvent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty_with_unique_id() {
        let a = CustomEvent::new();
        let b = CustomEvent::new();
        assert_ne!(a.id, b.id);
        assert!(a.title.is_empty());
        assert!(a.image.is_none());
        assert!(!a.is_eligible());
    }

    #[test]
    fn test_eligibility_needs_title_and_date() {
        let event = CustomEvent::new().with_field(EventField::Title, "Marathon");
        assert!(!event.is_eligible());

        let event = event.with_field(EventField::Date, "2015-06-01");
        assert!(event.is_eligible());

        let event = event.with_field(EventField::Title, "");
        assert!(!event.is_eligible());
    }

    #[test]
    fn test_with_field_keeps_id() {
        let event = CustomEvent::new();
        let edited = event.with_field(EventField::Description, "Finished first marathon");
        assert_eq!(edited.id, event.id);
        assert_eq!(edited.description, "Finished first marathon");
        assert!(event.description.is_empty());
    }

    #[test]
    fn test_serialized_uses_camel_case() {
        let event = CustomEvent::new().with_field(EventField::EndDate, "2016-01-01");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["endDate"], "2016-01-01");
        assert!(json["image"].is_null());
    }
}
