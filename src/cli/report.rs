//! Report formatting and printing utilities.
//!
//! Separate from the command logic so locgrub can be used as a library
//! without printing side effects.

use std::io::{self, Write};

use colored::Colorize;

use super::run::{CommandResult, CommandSummary};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result to stdout.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print a command result to a custom writer. Useful for testing.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    if verbose {
        for note in &result.notes {
            let _ = writeln!(writer, "{}", note.dimmed());
        }
    }

    for error in &result.errors {
        let _ = writeln!(writer, "{}", error.red());
    }

    match &result.summary {
        CommandSummary::Update {
            files_written,
            dirs_scanned,
        } => {
            if result.errors.is_empty() {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!(
                        "Updated {} locale {} in {} module {}",
                        files_written,
                        plural_word(*files_written, "file", "files"),
                        dirs_scanned,
                        plural_word(*dirs_scanned, "dir", "dirs"),
                    )
                    .green()
                );
            } else {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    FAILURE_MARK.red(),
                    "Nothing written: fix the violations above and re-run".red()
                );
            }
        }
        CommandSummary::Check {
            stale_dirs,
            dirs_scanned,
        } => {
            for dir in stale_dirs {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    FAILURE_MARK.red(),
                    format!("Translations must be fixed for folder: {}", dir).red()
                );
            }
            if result.errors.is_empty() && stale_dirs.is_empty() {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    SUCCESS_MARK.green(),
                    format!(
                        "Checked {} module {} - locale files are up to date",
                        dirs_scanned,
                        plural_word(*dirs_scanned, "dir", "dirs"),
                    )
                    .green()
                );
            }
        }
        CommandSummary::Init { path } => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", path.display()).green()
            );
        }
    }
}

fn plural_word<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
