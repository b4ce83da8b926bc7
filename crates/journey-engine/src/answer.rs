//! Answer records for preset questions.
//!
//! The field set of an answer depends on the question type, so answers are a
//! tagged variant rather than a bag of optional fields.

use serde::{Deserialize, Serialize};

use crate::catalog::QuestionType;

/// An answer to a preset question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Answer to a `date` question.
    Date {
        #[serde(default)]
        date: String,
    },
    /// Answer to a `text` or `textarea` question.
    Text {
        #[serde(default)]
        description: String,
    },
    /// Answer to a `period` question.
    Period {
        #[serde(default, rename = "startDate")]
        start_date: String,
        #[serde(default, rename = "endDate")]
        end_date: String,
        #[serde(default)]
        name: String,
    },
    /// Answer to an `event` question.
    Event {
        #[serde(default)]
        date: String,
        #[serde(default)]
        description: String,
    },
}

/// A field of an answer that can be edited on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerField {
    Date,
    Description,
    StartDate,
    EndDate,
    Name,
}

impl std::str::FromStr for AnswerField {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "description" => Ok(Self::Description),
            "startDate" | "start_date" | "start" => Ok(Self::StartDate),
            "endDate" | "end_date" | "end" => Ok(Self::EndDate),
            "name" => Ok(Self::Name),
            other => Err(AnswerError::UnknownFieldName(other.to_string())),
        }
    }
}

impl std::fmt::Display for AnswerField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Description => write!(f, "description"),
            Self::StartDate => write!(f, "startDate"),
            Self::EndDate => write!(f, "endDate"),
            Self::Name => write!(f, "name"),
        }
    }
}

/// Errors that can occur when editing answers.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    /// The field name is not one of the known answer fields.
    #[error("Unknown answer field: {0}")]
    UnknownFieldName(String),

    /// The field exists but not on this kind of answer.
    #[error("Field {field} does not apply to {kind} answers")]
    UnknownField { field: AnswerField, kind: QuestionType },
}

impl AnswerValue {
    /// The empty answer for a question type.
    pub fn empty_for(kind: QuestionType) -> Self {
        match kind {
            QuestionType::Date => Self::Date {
                date: String::new(),
            },
            QuestionType::Text | QuestionType::Textarea => Self::Text {
                description: String::new(),
            },
            QuestionType::Period => Self::Period {
                start_date: String::new(),
                end_date: String::new(),
                name: String::new(),
            },
            QuestionType::Event => Self::Event {
                date: String::new(),
                description: String::new(),
            },
        }
    }

    /// The question type this answer shape belongs to.
    ///
    /// `Text` answers report [`QuestionType::Text`]; they also serve
    /// `textarea` questions.
    pub fn kind(&self) -> QuestionType {
        match self {
            Self::Date { .. } => QuestionType::Date,
            Self::Text { .. } => QuestionType::Text,
            Self::Period { .. } => QuestionType::Period,
            Self::Event { .. } => QuestionType::Event,
        }
    }

    /// Projected date: `date`, or `startDate` for periods.
    pub fn date(&self) -> Option<&str> {
        let date = match self {
            Self::Date { date } | Self::Event { date, .. } => date,
            Self::Period { start_date, .. } => start_date,
            Self::Text { .. } => return None,
        };
        non_empty(date)
    }

    /// Projected description: `description`, or `name` for periods.
    pub fn description(&self) -> Option<&str> {
        let text = match self {
            Self::Text { description } | Self::Event { description, .. } => description,
            Self::Period { name, .. } => name,
            Self::Date { .. } => return None,
        };
        non_empty(text)
    }

    /// End date, only carried by periods.
    pub fn end_date(&self) -> Option<&str> {
        match self {
            Self::Period { end_date, .. } => non_empty(end_date),
            _ => None,
        }
    }

    /// Whether the answer contributes a timeline entry.
    ///
    /// Present iff it has a non-empty `date`, `startDate` or `description`.
    /// A period's `name` alone does not count.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Date { date } => !date.is_empty(),
            Self::Text { description } => !description.is_empty(),
            Self::Period { start_date, .. } => !start_date.is_empty(),
            Self::Event { date, description } => !date.is_empty() || !description.is_empty(),
        }
    }

    /// Return a copy with one field replaced.
    pub fn with_field(&self, field: AnswerField, value: impl Into<String>) -> Result<Self, AnswerError> {
        let value = value.into();
        let mut next = self.clone();
        let slot = match (&mut next, field) {
            (Self::Date { date }, AnswerField::Date)
            | (Self::Event { date, .. }, AnswerField::Date) => date,
            (Self::Text { description }, AnswerField::Description)
            | (Self::Event { description, .. }, AnswerField::Description) => description,
            (Self::Period { start_date, .. }, AnswerField::StartDate) => start_date,
            (Self::Period { end_date, .. }, AnswerField::EndDate) => end_date,
            (Self::Period { name, .. }, AnswerField::Name) => name,
            _ => {
                return Err(AnswerError::UnknownField {
                    field,
                    kind: self.kind(),
                })
            }
        };
        *slot = value;
        Ok(next)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
