//! Timeline document export.
//!
//! Renders an assembled timeline as a Markdown document. Images are embedded
//! as data URLs so the file is self-contained.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::i18n::Translate;
use crate::persistence::atomic_write;
use crate::timeline::TimelineEntry;

/// Default wrap width for descriptions.
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Suffix appended to the sanitized user name.
const FILENAME_SUFFIX: &str = "_life_journey.md";

/// Errors that can occur when exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the timeline document.
pub fn render_timeline<T>(
    user_name: &str,
    entries: &[TimelineEntry],
    translate: &T,
    width: usize,
) -> String
where
    T: Translate + ?Sized,
{
    let mut doc = String::new();
    let _ = writeln!(doc, "# {user_name}{}", translate.translate("journeyOf"));

    if entries.is_empty() {
        let _ = writeln!(doc, "\n{}", translate.translate("noEvents"));
        return doc;
    }

    for entry in entries {
        let _ = writeln!(doc, "\n## {} {}\n", entry.icon, entry.title);

        let when = match (&entry.end_date, entry.date.is_empty()) {
            (_, true) => None,
            (Some(end), false) => Some(format!("`{} \u{2192} {end}`", entry.date)),
            (None, false) => Some(format!("`{}`", entry.date)),
        };
        match when {
            Some(when) => {
                let _ = writeln!(doc, "{when} \u{b7} {}", entry.category);
            }
            None => {
                let _ = writeln!(doc, "{}", entry.category);
            }
        }

        if let Some(description) = &entry.description {
            let _ = writeln!(doc, "\n{}", textwrap::fill(description, width.max(1)));
        }

        if let Some(image) = &entry.image {
            let _ = writeln!(doc, "\n![{}]({})", entry.title, image.as_str());
        }
    }

    let _ = writeln!(doc, "\n---\n\n\u{2728} {}", translate.translate("journeyContinues"));
    doc
}

/// File name for an export, derived from the user's name.
pub fn export_filename(user_name: &str) -> String {
    let cleaned: String = user_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect();

    let stem = if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "journey".to_string()
    } else {
        cleaned
    };
    format!("{stem}{FILENAME_SUFFIX}")
}

/// Render and write the timeline document into `dir`.
///
/// Returns the path written.
pub fn export_timeline<T>(
    dir: &Path,
    user_name: &str,
    entries: &[TimelineEntry],
    translate: &T,
    width: usize,
) -> Result<PathBuf, ExportError>
where
    T: Translate + ?Sized,
{
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(user_name));
    let doc = render_timeline(user_name, entries, translate, width);
    atomic_write(&path, doc.as_bytes())?;

    info!(path = %path.display(), entries = entries.len(), "Exported timeline");
    Ok(path)
}
