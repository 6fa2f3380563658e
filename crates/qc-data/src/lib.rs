//! Flat-text file formats for Quest Chronicles.
//!
//! Quest and item datasets are blank-line separated blocks of `KEY: VALUE`
//! lines. Parsing collects every problem in a file as a span-carrying
//! [`Diagnostic`] before giving up, so `qc check` can report them all at
//! once. Character saves use the same line format, one file per character.

pub mod blocks;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod items;
pub mod quests;
pub mod save;

use std::path::Path;

pub use defaults::{ITEMS_FILE, QUESTS_FILE, create_default_data_files};
pub use diagnostics::{Diagnostic, Severity, render_diagnostics};
pub use error::{DataError, DataResult};
pub use items::{load_items, parse_items};
pub use quests::{load_quests, parse_quests};
pub use save::{delete_character, list_saved_characters, load_character, save_character};

/// The result of parsing a data file: the value built from the valid
/// blocks, plus every problem found along the way.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    /// Definitions parsed from the valid blocks.
    pub value: T,
    /// Errors and warnings, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// The parsed value, or [`DataError::InvalidFormat`] if any errors were
    /// found.
    pub fn into_result(self, file: &Path) -> DataResult<T> {
        if self.has_errors() {
            Err(DataError::InvalidFormat {
                file: file.to_path_buf(),
                diagnostics: self.diagnostics,
            })
        } else {
            Ok(self.value)
        }
    }
}

/// Read a data file, rejecting missing and blank files.
pub(crate) fn read_data_file(path: &Path) -> DataResult<String> {
    if !path.exists() {
        return Err(DataError::MissingFile(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path).map_err(|e| defaults::io_error(path, e))?;
    if source.trim().is_empty() {
        return Err(DataError::Corrupted(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(source)
}
