//! Timeline assembly.
//!
//! Merges answered preset questions and custom events into one list of
//! display entries, ordered by date. Assembly is a pure function of the
//! catalog, the journal and the translator; it is cheap enough to rerun on
//! every edit.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{Catalog, FALLBACK_ICON};
use crate::i18n::Translate;
use crate::image::ImageRef;
use crate::journal::Journal;

/// Where a timeline entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "id", rename_all = "snake_case")]
pub enum EntryId {
    /// A preset question, by key.
    Question(String),
    /// A custom event, by id.
    Custom(Uuid),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Question(key) => f.write_str(key),
            Self::Custom(id) => write!(f, "{id}"),
        }
    }
}

/// A display-ready timeline entry. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: EntryId,
    pub title: String,
    pub icon: String,
    /// Date text as entered.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    /// Localized category label.
    pub category: String,
}

/// Build the ordered timeline.
///
/// Preset answers come first in catalog order, then eligible custom events in
/// creation order; the list is then stably sorted by [`parse_date`], with
/// unparsable dates ordered as 1970-01-01.
pub fn assemble<T>(catalog: &Catalog, journal: &Journal, translate: &T) -> Vec<TimelineEntry>
where
    T: Translate + ?Sized,
{
    let mut entries = Vec::new();

    for (category, question) in catalog.questions() {
        let Some(answer) = journal.answers.get(&question.key) else {
            continue;
        };
        if !answer.is_present() {
            continue;
        }

        entries.push(TimelineEntry {
            id: EntryId::Question(question.key.clone()),
            title: translate.translate(&format!("questions.{}", question.key)),
            icon: category.icon.clone(),
            date: answer.date().unwrap_or_default().to_string(),
            end_date: answer.end_date().map(str::to_string),
            description: answer.description().map(str::to_string),
            image: journal.images.get(&question.key).cloned(),
            category: translate.translate(&format!("categories.{}", category.id)),
        });
    }
    let preset_count = entries.len();

    let custom_label = translate.translate("customEvent");
    for event in journal.custom_events.iter().filter(|e| e.is_eligible()) {
        entries.push(TimelineEntry {
            id: EntryId::Custom(event.id),
            title: event.title.clone(),
            icon: FALLBACK_ICON.to_string(),
            date: event.date.clone(),
            end_date: non_empty(&event.end_date),
            description: non_empty(&event.description),
            image: event.image.clone(),
            category: custom_label.clone(),
        });
    }

    let mut keyed: Vec<(NaiveDate, TimelineEntry)> = entries
        .into_iter()
        .map(|entry| {
            let key = match parse_date(&entry.date) {
                Some(date) => date,
                None => {
                    debug!(entry = %entry.id, date = %entry.date, "Unparsable date, ordering as epoch");
                    NaiveDate::default()
                }
            };
            (key, entry)
        })
        .collect();
    // Stable: equal dates keep catalog order, then creation order.
    keyed.sort_by_key(|(date, _)| *date);

    debug!(
        preset = preset_count,
        custom = keyed.len() - preset_count,
        "Assembled timeline"
    );

    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Parse a timeline date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM` and `YYYY` (first day of the period) and
/// RFC 3339 timestamps (their calendar date). Returns `None` for anything
/// else.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.date_naive());
    }

    let mut parts = text.split('-');
    let year = parts.next().filter(|y| y.len() == 4)?.parse::<i32>().ok()?;
    let month = match parts.next() {
        Some(m) if (1..=2).contains(&m.len()) => m.parse::<u32>().ok()?,
        Some(_) => return None,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::AnswerField;
    use crate::custom_event::{CustomEvent, EventField};
    use crate::i18n::Locale;

    fn answered(pairs: &[(&str, AnswerField, &str)]) -> Journal {
        let catalog = Catalog::builtin();
        pairs.iter().fold(Journal::default(), |journal, (key, field, value)| {
            journal
                .with_answer_field(&catalog, key, *field, *value)
                .unwrap()
        })
    }

    fn custom(journal: &Journal, title: &str, date: &str, description: &str) -> (Journal, Uuid) {
        let event = CustomEvent::new()
            .with_field(EventField::Title, title)
            .with_field(EventField::Date, date)
            .with_field(EventField::Description, description);
        journal.with_custom_event(event)
    }

    fn ids(entries: &[TimelineEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn test_empty_journal_gives_empty_timeline() {
        let entries = assemble(&Catalog::builtin(), &Journal::default(), &Locale::En);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_birth_university_marathon_order() {
        let journal = answered(&[
            ("birthDate", AnswerField::Date, "1990-05-01"),
            ("university", AnswerField::StartDate, "2012-09-01"),
            ("university", AnswerField::EndDate, "2016-07-01"),
            ("university", AnswerField::Name, "MIT"),
        ]);
        let (journal, marathon) = custom(&journal, "Marathon", "2015-06-01", "Finished first marathon");

        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);

        assert_eq!(
            ids(&entries),
            vec!["birthDate".to_string(), "university".to_string(), marathon.to_string()]
        );

        let university = &entries[1];
        assert_eq!(university.title, "University");
        assert_eq!(university.category, "Education");
        assert_eq!(university.icon, "\u{1f393}");
        assert_eq!(university.date, "2012-09-01");
        assert_eq!(university.end_date.as_deref(), Some("2016-07-01"));
        assert_eq!(university.description.as_deref(), Some("MIT"));

        let run = &entries[2];
        assert_eq!(run.icon, FALLBACK_ICON);
        assert_eq!(run.category, "Custom Event");
        assert_eq!(run.description.as_deref(), Some("Finished first marathon"));
        assert_eq!(run.end_date, None);
    }

    #[test]
    fn test_period_projection_start_date_and_name() {
        let journal = answered(&[
            ("firstJob", AnswerField::StartDate, "2016-08-01"),
            ("firstJob", AnswerField::Name, "Acme / Engineer"),
        ]);
        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "2016-08-01");
        assert_eq!(entries[0].description.as_deref(), Some("Acme / Engineer"));
    }

    #[test]
    fn test_absent_answers_are_filtered() {
        let journal = answered(&[
            ("birthPlace", AnswerField::Description, ""),
            ("highSchool", AnswerField::Name, "No dates"),
            ("marriage", AnswerField::Date, ""),
        ]);
        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_custom_event_needs_title_and_date() {
        let (journal, _) = custom(&Journal::default(), "", "2020-01-01", "no title");
        let (journal, _) = custom(&journal, "No date", "", "");
        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_description_only_answer_orders_first() {
        // Text answers carry no date and order as the epoch.
        let journal = answered(&[
            ("birthDate", AnswerField::Date, "1990-05-01"),
            ("birthPlace", AnswerField::Description, "Beijing"),
        ]);
        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);
        assert_eq!(ids(&entries), vec!["birthPlace", "birthDate"]);
        assert_eq!(entries[0].date, "");
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let journal = answered(&[
            ("marriage", AnswerField::Date, "2018-10-01"),
            ("engagement", AnswerField::Date, "2018-10-01"),
            ("majorMove", AnswerField::Date, "2018-10-01"),
        ]);
        let (journal, first) = custom(&journal, "Honeymoon", "2018-10-01", "");
        let (journal, second) = custom(&journal, "Party", "2018-10-01", "");

        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);
        // Catalog order, not edit order, then custom creation order.
        assert_eq!(
            ids(&entries),
            vec![
                "engagement".to_string(),
                "marriage".to_string(),
                "majorMove".to_string(),
                first.to_string(),
                second.to_string(),
            ]
        );
    }

    #[test]
    fn test_chronological_not_lexical() {
        let journal = answered(&[
            ("awards", AnswerField::Date, "2020-1-15"),
            ("fitness", AnswerField::Date, "2020-10-01"),
            ("countries", AnswerField::Date, "2020-02"),
        ]);
        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);
        assert_eq!(ids(&entries), vec!["awards", "countries", "fitness"]);
    }

    #[test]
    fn test_unparsable_dates_order_as_epoch() {
        let journal = answered(&[
            ("birthDate", AnswerField::Date, "1969-12-31"),
            ("marriage", AnswerField::Date, "someday"),
            ("firstHome", AnswerField::Date, "1971-01-01"),
        ]);
        let entries = assemble(&Catalog::builtin(), &journal, &Locale::En);
        assert_eq!(ids(&entries), vec!["birthDate", "marriage", "firstHome"]);
        assert_eq!(entries[1].date, "someday");
    }

    #[test]
    fn test_images_follow_question_key() {
        let catalog = Catalog::builtin();
        let image = ImageRef::from_bytes(&mime::IMAGE_PNG, b"img");
        let journal = answered(&[("marriage", AnswerField::Date, "2018-10-01")])
            .with_image(&catalog, "marriage", image.clone())
            .unwrap()
            .with_image(&catalog, "birthDate", image.clone())
            .unwrap();

        let entries = assemble(&catalog, &journal, &Locale::En);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].image, Some(image));
    }

    #[test]
    fn test_labels_follow_locale() {
        let journal = answered(&[("birthDate", AnswerField::Date, "1990-05-01")]);
        let (journal, _) = custom(&journal, "Marathon", "2015-06-01", "");
        let catalog = Catalog::builtin();

        let zh = assemble(&catalog, &journal, &Locale::Zh);
        assert_eq!(zh[0].title, "出生日期");
        assert_eq!(zh[0].category, "出生信息");
        assert_eq!(zh[1].category, "自定义事件");
        // Custom titles are never translated
        assert_eq!(zh[1].title, "Marathon");
    }

    #[test]
    fn test_injected_translator() {
        let journal = answered(&[("birthDate", AnswerField::Date, "1990-05-01")]);
        let translate = |key: &str| format!("<{key}>");
        let entries = assemble(&Catalog::builtin(), &journal, &translate);
        assert_eq!(entries[0].title, "<questions.birthDate>");
        assert_eq!(entries[0].category, "<categories.birth>");
    }

    #[test]
    fn test_deterministic_and_pure() {
        let journal = answered(&[
            ("birthDate", AnswerField::Date, "1990-05-01"),
            ("university", AnswerField::StartDate, "2012-09-01"),
        ]);
        let (journal, _) = custom(&journal, "Marathon", "2015-06-01", "");
        let snapshot = journal.clone();
        let catalog = Catalog::builtin();

        let first = assemble(&catalog, &journal, &Locale::En);
        let second = assemble(&catalog, &journal, &Locale::En);
        assert_eq!(first, second);
        assert_eq!(journal, snapshot);
    }

    #[test]
    fn test_no_op_edit_is_idempotent() {
        let catalog = Catalog::builtin();
        let journal = answered(&[("marriage", AnswerField::Date, "2018-10-01")]);
        let before = serde_json::to_string(&assemble(&catalog, &journal, &Locale::En)).unwrap();

        let edited = journal
            .with_answer_field(&catalog, "marriage", AnswerField::Date, "2018-10-01")
            .unwrap();
        let after = serde_json::to_string(&assemble(&catalog, &edited, &Locale::En)).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_parse_date_formats() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(parse_date("1990-05-01"), d(1990, 5, 1));
        assert_eq!(parse_date(" 1990-5-1 "), d(1990, 5, 1));
        assert_eq!(parse_date("1990-05"), d(1990, 5, 1));
        assert_eq!(parse_date("1990"), d(1990, 1, 1));
        assert_eq!(parse_date("2021-03-04T10:00:00+08:00"), d(2021, 3, 4));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("05/01/1990"), None);
        assert_eq!(parse_date("1990-13"), None);
        assert_eq!(parse_date("90"), None);
        assert_eq!(parse_date("1990-02-30"), None);
    }
}
