pub mod check;
pub mod delete;
pub mod init;
pub mod list;
pub mod new;
pub mod play;
pub mod quests;
pub mod show;

use std::path::Path;

use qc_data::{DataError, Diagnostic, Severity, render_diagnostics};

/// Turn a data error into a CLI message, printing any diagnostics it carries
/// to stderr first.
fn report(err: DataError) -> String {
    if let DataError::InvalidFormat { file, diagnostics } = &err {
        let source = std::fs::read_to_string(file).unwrap_or_default();
        print_diagnostics(&source, file, diagnostics);
    }
    err.to_string()
}

/// Print diagnostics to stderr using ariadne, followed by a count line.
fn print_diagnostics(source: &str, file: &Path, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let filename = file.display().to_string();
    let rendered = render_diagnostics(source, &filename, diagnostics);
    eprint!("{rendered}");

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}
