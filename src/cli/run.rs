//! Command dispatch and orchestration.
//!
//! Each command loads the configuration, scans the requested roots and
//! folds per-directory outcomes into a [`CommandResult`]. Nothing is
//! written while any directory still has rule violations: writes happen
//! only after the whole run is clean, so a failing run never leaves
//! half-updated locale files behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};

use super::args::{Arguments, CheckCommand, Command, UpdateCommand};
use super::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, Configuration, default_config_json, load_config};
use crate::core::PluralResolver;
use crate::locale::{Tokens, locale_file_path, merge_tokens, read_locale_tokens, write_locale_file};
use crate::scan::{DirOutcome, find_module_dirs, grub_dir};

/// Per-command summary for reporting.
#[derive(Debug)]
pub enum CommandSummary {
    Update {
        files_written: usize,
        dirs_scanned: usize,
    },
    Check {
        stale_dirs: Vec<String>,
        dirs_scanned: usize,
    },
    Init {
        path: PathBuf,
    },
}

/// Result of running a locgrub command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Rule violations, grouped under per-directory headers.
    pub errors: Vec<String>,
    /// Informational lines shown in verbose mode.
    pub notes: Vec<String>,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if !self.errors.is_empty() {
            return ExitStatus::Failure;
        }
        match &self.summary {
            CommandSummary::Check { stale_dirs, .. } if !stale_dirs.is_empty() => {
                ExitStatus::Failure
            }
            _ => ExitStatus::Success,
        }
    }
}

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Update(cmd)) => update(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

/// Merged locale-file contents for every scanned directory and language,
/// plus everything needed to report on the scan.
struct ScanSummary {
    /// (locale file path, previous tokens, merged tokens) per dir/language.
    files: Vec<(PathBuf, Tokens, Tokens)>,
    errors: Vec<String>,
    notes: Vec<String>,
    dirs_scanned: usize,
}

fn scan_roots(roots: &[PathBuf], config: &Configuration) -> Result<ScanSummary> {
    let resolver = PluralResolver::new(config.i18next_plural, &config.languages);
    let dirs = find_module_dirs(roots, config)?;

    let mut notes = vec!["Dirs for i18n:".to_string()];
    notes.extend(dirs.iter().map(|dir| format!("  {}", dir.display())));

    let mut errors = Vec::new();
    let mut files = Vec::new();
    for dir in &dirs {
        match grub_dir(dir, config, &resolver)? {
            DirOutcome::Violations(batch) => {
                errors.push(format!("Errors found in {}:", dir.display()));
                errors.extend(batch);
            }
            DirOutcome::Tokens(tokens) => {
                for language in &config.languages {
                    let mut extracted = tokens.get(language).cloned().unwrap_or_default();
                    extracted.sort();
                    extracted.dedup();

                    let path = locale_file_path(dir, &config.i18n_dir_name, language);
                    let old = read_locale_tokens(&path)?;
                    if old.is_none() {
                        notes.push(format!("File {} not found", path.display()));
                    }
                    let old = old.unwrap_or_default();
                    let merged = merge_tokens(&extracted, &old);
                    files.push((path, old, merged));
                }
            }
        }
    }

    Ok(ScanSummary {
        files,
        errors,
        notes,
        dirs_scanned: dirs.len(),
    })
}

fn update(cmd: UpdateCommand) -> Result<CommandResult> {
    let config = load_config(&cmd.common.config)?;
    let scan = scan_roots(&cmd.dirs, &config)?;

    let files_written = if scan.errors.is_empty() {
        for (path, _, merged) in &scan.files {
            write_locale_file(path, merged)?;
        }
        scan.files.len()
    } else {
        0
    };

    Ok(CommandResult {
        summary: CommandSummary::Update {
            files_written,
            dirs_scanned: scan.dirs_scanned,
        },
        errors: scan.errors,
        notes: scan.notes,
    })
}

fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let config = load_config(&cmd.common.config)?;
    let scan = scan_roots(&cmd.dirs, &config)?;

    let mut stale_dirs: Vec<String> = scan
        .files
        .iter()
        .filter(|(_, old, merged)| old != merged)
        .filter_map(|(path, _, _)| {
            path.parent()
                .map(|i18n_dir| i18n_dir.display().to_string())
        })
        .collect();
    stale_dirs.sort();
    stale_dirs.dedup();

    Ok(CommandResult {
        summary: CommandSummary::Check {
            stale_dirs,
            dirs_scanned: scan.dirs_scanned,
        },
        errors: scan.errors,
        notes: scan.notes,
    })
}

fn init() -> Result<CommandResult> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }
    fs::write(path, default_config_json()?)?;

    Ok(CommandResult {
        summary: CommandSummary::Init {
            path: path.to_path_buf(),
        },
        errors: Vec::new(),
        notes: Vec::new(),
    })
}
