//! Error types for data files and saves.

use std::path::PathBuf;

use qc_core::QcError;

use crate::diagnostics::{Diagnostic, Severity};

/// Alias for `Result<T, DataError>`.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while reading or writing game files.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A required data file does not exist.
    #[error("missing data file: {}", .0.display())]
    MissingFile(PathBuf),

    /// The file system refused a read or write.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A data file exists but holds nothing usable.
    #[error("corrupted data: {0}")]
    Corrupted(String),

    /// A data file has malformed or inconsistent blocks.
    #[error("invalid data in {}: {}", .file.display(), summarize(.diagnostics))]
    InvalidFormat {
        /// The offending file.
        file: PathBuf,
        /// Every problem found, in source order.
        diagnostics: Vec<Diagnostic>,
    },

    /// No save file exists for the character.
    #[error("character not found: {0}")]
    CharacterNotFound(String),

    /// A save file could not be turned into a valid character.
    #[error("invalid save data: {0}")]
    InvalidSaveData(String),

    /// A core rule was violated.
    #[error(transparent)]
    Core(#[from] QcError),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    match errors.as_slice() {
        [] => "no errors".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_message() {
        let err = DataError::InvalidFormat {
            file: PathBuf::from("quests.txt"),
            diagnostics: vec![
                Diagnostic::error(0..3, "missing key REWARD_XP"),
                Diagnostic::warning(4..5, "unknown key COLOR"),
                Diagnostic::error(6..9, "duplicate quest id"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "invalid data in quests.txt: missing key REWARD_XP (and 1 more)"
        );
    }

    #[test]
    fn core_errors_pass_through() {
        let err = DataError::from(QcError::CharacterDead);
        assert_eq!(err.to_string(), "character is dead");
    }
}
