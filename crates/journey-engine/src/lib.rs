//! journey-engine: Headless engine for the life journey journal
//!
//! This crate provides the core logic behind the journal, including:
//! - The preset question catalog and typed answers
//! - Custom events and immutable journal state
//! - Timeline assembly (merge, project, sort)
//! - Locale tables, the access gate and file persistence
//! - Document export

pub mod answer;
pub mod catalog;
pub mod config;
pub mod custom_event;
pub mod export;
pub mod gate;
pub mod i18n;
pub mod image;
pub mod journal;
pub mod persistence;
pub mod timeline;

// Re-export commonly used types
pub use answer::{AnswerError, AnswerField, AnswerValue};
pub use catalog::{Catalog, CatalogError, Category, QuestionDefinition, QuestionType};
pub use config::{resolve_data_dir, Config, ConfigError};
pub use custom_event::{CustomEvent, EventField};
pub use export::{export_filename, export_timeline, render_timeline, ExportError};
pub use gate::{Gate, GateError, GateSetup};
pub use i18n::{Locale, Translate};
pub use image::{ImageError, ImageRef};
pub use journal::{Journal, JournalError};
pub use persistence::{JournalStore, PersistenceError};
pub use timeline::{assemble, parse_date, EntryId, TimelineEntry};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
