//! Journal persistence.
//!
//! The journal is stored as a single JSON document that is overwritten
//! wholesale on every save, using atomic writes and a schema version. The
//! gate phrase lives in a separate file next to it.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::journal::Journal;

/// Current schema version for the journal file.
const CURRENT_SCHEMA_VERSION: u32 = 1;

/// File name of the journal document.
pub const JOURNAL_FILE: &str = "journal.json";

/// File name of the gate phrase.
pub const GATE_FILE: &str = "gate";

/// Error type for persistence operations.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid journal data: {0}")]
    InvalidData(String),

    #[error("Unsupported schema version: {0} (max supported: {1})")]
    UnsupportedSchema(u32, u32),
}

/// On-disk format with schema versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JournalFile {
    schema_version: u32,
    #[serde(flatten)]
    journal: Journal,
}

/// Manages the journal and gate files in one directory.
pub struct JournalStore {
    base_path: PathBuf,
}

impl JournalStore {
    /// Create a new `JournalStore`.
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Save the journal, stamping `last_saved`.
    ///
    /// A blank journal is only written when it replaces an existing file;
    /// returns whether anything was saved.
    pub fn save(&self, journal: &Journal) -> Result<bool, PersistenceError> {
        if journal.is_blank() && !self.journal_path().exists() {
            return Ok(false);
        }

        let mut journal = journal.clone();
        journal.last_saved = Some(Utc::now());

        let file = JournalFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            journal,
        };
        let json = serde_json::to_string_pretty(&file)?;
        atomic_write(&self.journal_path(), json.as_bytes())?;

        info!(path = %self.journal_path().display(), "Saved journal");
        Ok(true)
    }

    /// Load the journal strictly, surfacing parse and schema errors.
    pub fn load_strict(&self) -> Result<Option<Journal>, PersistenceError> {
        let path = self.journal_path();
        if !path.exists() {
            return Ok(None);
        }

        // Invalid UTF-8 surfaces as a JSON error
        let content = fs::read(&path)?;

        // Check the schema version before deserializing the body
        let raw: serde_json::Value = serde_json::from_slice(&content)?;
        let version_u64 = raw
            .get("schema_version")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| PersistenceError::InvalidData("missing schema_version".to_string()))?;
        let version = u32::try_from(version_u64)
            .map_err(|_| PersistenceError::InvalidData("schema_version too large".to_string()))?;

        if version > CURRENT_SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedSchema(
                version,
                CURRENT_SCHEMA_VERSION,
            ));
        }

        let file: JournalFile = serde_json::from_value(raw)?;
        Ok(Some(file.journal))
    }

    /// Load the journal.
    ///
    /// A missing file gives an empty journal. Corrupted or unsupported data is
    /// logged and treated as no prior state; only I/O errors are returned.
    pub fn load(&self) -> Result<Journal, PersistenceError> {
        match self.load_strict() {
            Ok(journal) => Ok(journal.unwrap_or_default()),
            Err(PersistenceError::Io(e)) => Err(PersistenceError::Io(e)),
            Err(e) => {
                warn!(path = %self.journal_path().display(), error = %e, "Ignoring corrupted journal");
                Ok(Journal::default())
            }
        }
    }

    /// The stored gate phrase, if any.
    pub fn load_gate(&self) -> Result<Option<String>, PersistenceError> {
        let path = self.gate_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    /// Store the gate phrase, replacing any previous one.
    pub fn save_gate(&self, phrase: &str) -> Result<(), PersistenceError> {
        atomic_write(&self.gate_path(), phrase.as_bytes())?;
        Ok(())
    }

    /// Remove the gate phrase.
    pub fn clear_gate(&self) -> Result<(), PersistenceError> {
        let path = self.gate_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn journal_path(&self) -> PathBuf {
        self.base_path.join(JOURNAL_FILE)
    }

    fn gate_path(&self) -> PathBuf {
        self.base_path.join(GATE_FILE)
    }
}

/// Write content atomically using temp file + fsync + rename.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    // Generate unique temp filename using timestamp and process ID
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let pid = std::process::id();

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file");
    let tmp_name = format!("{file_name}.{timestamp}.{pid}.tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let mut file = File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        // Best-effort cleanup
        let _ = fs::remove_file(&tmp_path);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::AnswerField;
    use crate::catalog::Catalog;
    use crate::custom_event::EventField;
    use tempfile::TempDir;

    fn setup_test_store() -> (TempDir, JournalStore) {
        let temp = TempDir::new().unwrap();
        let store = JournalStore::new(temp.path().join("data")).unwrap();
        (temp, store)
    }

    fn sample_journal() -> Journal {
        let catalog = Catalog::builtin();
        let journal = Journal::default()
            .with_user_name("Ada")
            .with_answer_field(&catalog, "birthDate", AnswerField::Date, "1990-05-01")
            .unwrap();
        let (journal, id) = journal.with_custom_event_added();
        journal
            .with_custom_event_field(id, EventField::Title, "Marathon")
            .unwrap()
    }

    #[test]
    fn test_new_creates_directory() {
        let temp = TempDir::new().unwrap();
        let _store = JournalStore::new(temp.path().join("nested").join("dir")).unwrap();
        assert!(temp.path().join("nested").join("dir").exists());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_temp, store) = setup_test_store();
        let journal = sample_journal();

        assert!(store.save(&journal).unwrap());
        let loaded = store.load().unwrap();

        assert_eq!(loaded.user_name, "Ada");
        assert_eq!(loaded.answers, journal.answers);
        assert_eq!(loaded.custom_events, journal.custom_events);
        assert!(loaded.last_saved.is_some());
    }

    #[test]
    fn test_save_skips_blank_journal() {
        let (temp, store) = setup_test_store();

        assert!(!store.save(&Journal::default()).unwrap());
        assert!(!temp.path().join("data").join(JOURNAL_FILE).exists());
    }

    #[test]
    fn test_save_blank_replaces_existing() {
        let (_temp, store) = setup_test_store();

        store.save(&sample_journal()).unwrap();
        assert!(store.save(&Journal::default()).unwrap());

        let loaded = store.load().unwrap();
        assert!(loaded.is_blank());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let (_temp, store) = setup_test_store();

        store.save(&sample_journal()).unwrap();
        store.save(&Journal::default().with_user_name("Grace")).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.user_name, "Grace");
        assert!(loaded.answers.is_empty());
        assert!(loaded.custom_events.is_empty());
    }

    #[test]
    fn test_load_missing_is_default() {
        let (_temp, store) = setup_test_store();
        assert_eq!(store.load().unwrap(), Journal::default());
        assert!(store.load_strict().unwrap().is_none());
    }

    #[test]
    fn test_load_corrupted_is_default() {
        let (_temp, store) = setup_test_store();
        fs::write(store.journal_path(), "not valid json").unwrap();

        assert!(matches!(store.load_strict(), Err(PersistenceError::Json(_))));
        assert_eq!(store.load().unwrap(), Journal::default());
    }

    #[test]
    fn test_load_non_utf8_is_default() {
        let (_temp, store) = setup_test_store();
        fs::write(store.journal_path(), [0xff, 0xfe, b'{', b'}']).unwrap();

        assert!(matches!(store.load_strict(), Err(PersistenceError::Json(_))));
        assert_eq!(store.load().unwrap(), Journal::default());

        // The next save replaces the bad file
        store.save(&Journal::default().with_user_name("Ada")).unwrap();
        assert_eq!(store.load().unwrap().user_name, "Ada");
    }

    #[test]
    fn test_load_unsupported_schema() {
        let (_temp, store) = setup_test_store();
        fs::write(
            store.journal_path(),
            r#"{"schema_version": 999, "userName": "Future"}"#,
        )
        .unwrap();

        assert!(matches!(
            store.load_strict(),
            Err(PersistenceError::UnsupportedSchema(999, 1))
        ));
        assert_eq!(store.load().unwrap(), Journal::default());
    }

    #[test]
    fn test_load_missing_schema_version() {
        let (_temp, store) = setup_test_store();
        fs::write(store.journal_path(), r#"{"userName": "Old"}"#).unwrap();

        assert!(matches!(
            store.load_strict(),
            Err(PersistenceError::InvalidData(_))
        ));
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let (_temp, store) = setup_test_store();
        fs::write(
            store.journal_path(),
            r#"{"schema_version": 1, "userName": "Ada"}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.user_name, "Ada");
        assert!(loaded.answers.is_empty());
        assert!(loaded.images.is_empty());
    }

    #[test]
    fn test_serialized_json_format() {
        let (_temp, store) = setup_test_store();
        store.save(&sample_journal()).unwrap();

        let content = fs::read_to_string(store.journal_path()).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(raw["schema_version"], 1);
        assert_eq!(raw["userName"], "Ada");
        assert_eq!(raw["formData"]["birthDate"]["type"], "date");
        assert_eq!(raw["customEvents"][0]["title"], "Marathon");
        assert!(raw["lastSaved"].is_string());
    }

    #[test]
    fn test_gate_roundtrip() {
        let (_temp, store) = setup_test_store();

        assert!(store.load_gate().unwrap().is_none());
        store.save_gate("open sesame").unwrap();
        assert_eq!(store.load_gate().unwrap().as_deref(), Some("open sesame"));

        store.clear_gate().unwrap();
        assert!(store.load_gate().unwrap().is_none());
        // Clearing twice is fine
        store.clear_gate().unwrap();
    }

    #[test]
    fn test_gate_empty_file_is_none() {
        let (_temp, store) = setup_test_store();
        fs::write(store.gate_path(), "").unwrap();
        assert!(store.load_gate().unwrap().is_none());
    }

    #[test]
    fn test_atomic_write_no_temp_files_on_success() {
        let (temp, store) = setup_test_store();
        store.save(&sample_journal()).unwrap();
        store.save_gate("pw").unwrap();

        for entry in fs::read_dir(temp.path().join("data")).unwrap() {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "Found temp file: {}", name);
        }
    }
}
