use std::path::Path;

use qc_data::{DataError, Diagnostic};
use qc_session::SessionConfig;

pub fn run(config: &SessionConfig) -> Result<(), String> {
    let quests = check_file(&config.quests_path(), |src| {
        qc_data::parse_quests(src).diagnostics
    })?;
    let items = check_file(&config.items_path(), |src| {
        qc_data::parse_items(src).diagnostics
    })?;

    if quests && items {
        println!("  All checks passed for {}/", config.data_dir().display());
        Ok(())
    } else {
        Err("data files contain errors".into())
    }
}

/// Parse one file and print its diagnostics. Returns true if it has no
/// errors.
fn check_file(
    path: &Path,
    diagnose: impl Fn(&str) -> Vec<Diagnostic>,
) -> Result<bool, String> {
    if !path.exists() {
        return Err(DataError::MissingFile(path.to_path_buf()).to_string());
    }
    let source = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    if source.trim().is_empty() {
        eprintln!("  {} is empty", path.display());
        return Ok(false);
    }

    let diagnostics = diagnose(&source);
    super::print_diagnostics(&source, path, &diagnostics);
    Ok(!diagnostics
        .iter()
        .any(|d| d.severity == qc_data::Severity::Error))
}
