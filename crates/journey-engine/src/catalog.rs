//! Preset question catalog.
//!
//! Questions are grouped into ordered categories. Each category carries a
//! stable icon; labels are resolved separately through [`crate::i18n`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Icon used for categories the catalog does not know, and for custom events.
pub const FALLBACK_ICON: &str = "\u{2b50}"; // ⭐

/// Input shape of a preset question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// A single date.
    Date,
    /// A one-line description.
    Text,
    /// A multi-line description.
    Textarea,
    /// A start date, end date and name (schooling, employment).
    Period,
    /// A date with a description.
    Event,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Text => write!(f, "text"),
            Self::Textarea => write!(f, "textarea"),
            Self::Period => write!(f, "period"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// A single preset question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    /// Unique key, also the answer and image key.
    pub key: String,
    /// Id of the owning category.
    pub category_id: String,
    /// Input shape.
    pub kind: QuestionType,
    /// Placeholder translation key (without the `placeholders.` prefix).
    pub placeholder: Option<String>,
}

/// An ordered group of questions sharing an icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub icon: String,
    pub questions: Vec<QuestionDefinition>,
}

/// The full, immutable set of preset questions.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

/// Errors that can occur when building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Two questions share a key.
    #[error("Duplicate question key: {0}")]
    DuplicateKey(String),

    /// A question names a category other than the one holding it.
    #[error("Question {key} is filed under {actual} but declares category {declared}")]
    CategoryMismatch {
        key: String,
        declared: String,
        actual: String,
    },
}

type QuestionRow = (&'static str, QuestionType, Option<&'static str>);

const BUILTIN: &[(&str, &str, &[QuestionRow])] = &[
    (
        "birth",
        "\u{1f476}", // 👶
        &[
            ("birthDate", QuestionType::Date, None),
            ("birthPlace", QuestionType::Text, Some("birthPlace")),
            ("birthStory", QuestionType::Textarea, Some("birthStory")),
        ],
    ),
    (
        "education",
        "\u{1f393}", // 🎓
        &[
            ("primarySchool", QuestionType::Period, Some("school")),
            ("middleSchool", QuestionType::Period, Some("school")),
            ("highSchool", QuestionType::Period, Some("school")),
            ("university", QuestionType::Period, Some("university")),
            ("graduateSchool", QuestionType::Period, Some("university")),
        ],
    ),
    (
        "career",
        "\u{1f4bc}", // 💼
        &[
            ("firstJob", QuestionType::Period, Some("job")),
            ("careerMilestone", QuestionType::Event, Some("milestone")),
        ],
    ),
    (
        "love",
        "\u{1f495}", // 💕
        &[
            ("firstLove", QuestionType::Event, Some("loveStory")),
            ("engagement", QuestionType::Event, Some("engagement")),
            ("marriage", QuestionType::Event, Some("marriage")),
        ],
    ),
    (
        "family",
        "\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}\u{200d}\u{1f466}", // 👨‍👩‍👧‍👦
        &[
            ("firstChild", QuestionType::Event, Some("child")),
            ("moreChildren", QuestionType::Event, Some("moreChildren")),
        ],
    ),
    (
        "achievements",
        "\u{1f3c6}", // 🏆
        &[
            ("awards", QuestionType::Event, Some("awards")),
            ("specialAchievement", QuestionType::Event, Some("achievement")),
        ],
    ),
    (
        "relocation",
        "\u{1f30d}", // 🌍
        &[
            ("majorMove", QuestionType::Event, Some("move")),
            ("lifeChange", QuestionType::Event, Some("lifeChange")),
        ],
    ),
    (
        "health",
        "\u{2764}\u{fe0f}\u{200d}\u{1fa79}", // ❤️‍🩹
        &[
            ("healthEvent", QuestionType::Event, Some("health")),
            ("fitness", QuestionType::Event, Some("fitness")),
        ],
    ),
    (
        "travel",
        "\u{2708}\u{fe0f}", // ✈️
        &[
            ("memorableTrip", QuestionType::Event, Some("trip")),
            ("countries", QuestionType::Event, Some("countries")),
        ],
    ),
    (
        "property",
        "\u{1f3e0}", // 🏠
        &[
            ("firstHome", QuestionType::Event, Some("home")),
            ("investment", QuestionType::Event, Some("investment")),
        ],
    ),
];

impl Catalog {
    /// Build a catalog from ordered categories.
    ///
    /// Rejects duplicate question keys and questions whose `category_id`
    /// disagrees with the category holding them.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for category in &categories {
            for question in &category.questions {
                if question.category_id != category.id {
                    return Err(CatalogError::CategoryMismatch {
                        key: question.key.clone(),
                        declared: question.category_id.clone(),
                        actual: category.id.clone(),
                    });
                }
                if !seen.insert(question.key.as_str()) {
                    return Err(CatalogError::DuplicateKey(question.key.clone()));
                }
            }
        }
        Ok(Self { categories })
    }

    /// The built-in ten-category catalog.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(id, icon, rows)| Category {
                id: (*id).to_string(),
                icon: (*icon).to_string(),
                questions: rows
                    .iter()
                    .map(|(key, kind, placeholder)| QuestionDefinition {
                        key: (*key).to_string(),
                        category_id: (*id).to_string(),
                        kind: *kind,
                        placeholder: placeholder.map(str::to_string),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a question and its owning category by key.
    pub fn question(&self, key: &str) -> Option<(&Category, &QuestionDefinition)> {
        self.categories.iter().find_map(|category| {
            category
                .questions
                .iter()
                .find(|q| q.key == key)
                .map(|q| (category, q))
        })
    }

    /// Icon for a category, falling back to a star for unknown ids.
    pub fn category_icon(&self, id: &str) -> &str {
        self.category(id).map_or(FALLBACK_ICON, |c| c.icon.as_str())
    }

    /// All questions in catalog order, paired with their category.
    pub fn questions(&self) -> impl Iterator<Item = (&Category, &QuestionDefinition)> {
        self.categories
            .iter()
            .flat_map(|category| category.questions.iter().map(move |q| (category, q)))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
