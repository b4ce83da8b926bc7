//! Local access gate.
//!
//! A plaintext phrase compared for equality before the journal is shown.
//! This keeps casual onlookers out; it is not a security boundary.

use thiserror::Error;

/// Errors from setting or checking the gate phrase.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Phrases do not match")]
    Mismatch,

    #[error("Wrong phrase")]
    WrongPhrase,

    #[error("A phrase is already set")]
    AlreadySet,

    #[error("No phrase is set")]
    NotSet,
}

impl GateError {
    /// Translation key for the user-facing message, when the locale tables
    /// have one.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            Self::Mismatch => Some("passwordMismatch"),
            Self::WrongPhrase => Some("wrongPassword"),
            Self::AlreadySet | Self::NotSet => None,
        }
    }
}

/// What setting the gate produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateSetup {
    /// A phrase was chosen and should be stored.
    Store(String),
    /// The user skipped; nothing is stored.
    Skipped,
}

/// Gate state derived from what is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Nothing stored yet; the user may choose a phrase or skip.
    Setup,
    /// A phrase is stored and must be entered.
    Locked(String),
}

impl Gate {
    pub fn from_stored(stored: Option<String>) -> Self {
        match stored {
            Some(phrase) if !phrase.is_empty() => Self::Locked(phrase),
            _ => Self::Setup,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    /// Choose a phrase. An empty phrase skips the gate.
    pub fn set(&self, phrase: &str, confirm: &str) -> Result<GateSetup, GateError> {
        if self.is_locked() {
            return Err(GateError::AlreadySet);
        }
        if phrase.is_empty() {
            return Ok(GateSetup::Skipped);
        }
        if phrase != confirm {
            return Err(GateError::Mismatch);
        }
        Ok(GateSetup::Store(phrase.to_string()))
    }

    /// Check an entered phrase. An unset gate is always open.
    pub fn unlock(&self, input: Option<&str>) -> Result<(), GateError> {
        match self {
            Self::Setup => Ok(()),
            Self::Locked(phrase) if input == Some(phrase.as_str()) => Ok(()),
            Self::Locked(_) => Err(GateError::WrongPhrase),
        }
    }

    /// Replace the stored phrase after checking the current one.
    pub fn change(&self, current: &str, phrase: &str, confirm: &str) -> Result<GateSetup, GateError> {
        match self {
            Self::Setup => Err(GateError::NotSet),
            Self::Locked(_) => {
                self.unlock(Some(current))?;
                Self::Setup.set(phrase, confirm)
            }
        }
    }
}
