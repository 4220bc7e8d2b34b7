//! Directory discovery and the per-directory scan driver.
//!
//! Discovery is entirely glob-driven: `includeDirs` patterns select the
//! module directories under each scanned root, and each file rule's
//! `include`/`exclude` patterns select the files inside a module
//! directory. Scanning is synchronous and file-at-a-time; the only state
//! shared across files is the per-language token accumulator owned by
//! the run.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;

use crate::config::Configuration;
use crate::core::{PluralResolver, TokensByLanguage, create_grubber, empty_tokens};

/// Result of scanning one module directory: either the concatenated
/// per-language token lists, or every rule violation found in its files.
#[derive(Debug)]
pub enum DirOutcome {
    Tokens(TokensByLanguage),
    Violations(Vec<String>),
}

/// Module directories selected by `includeDirs` under the given roots,
/// sorted and deduplicated for a deterministic scan order.
pub fn find_module_dirs(roots: &[PathBuf], config: &Configuration) -> Result<Vec<PathBuf>> {
    let excludes = compile_patterns(&config.exclude_dirs)?;

    let mut dirs = Vec::new();
    for root in roots {
        for pattern in &config.include_dirs {
            let full = root.join(pattern);
            let entries = glob::glob(&full.to_string_lossy())
                .with_context(|| format!("Invalid glob pattern: \"{}\"", pattern))?;
            for entry in entries {
                let path = entry.context("Failed to read directory entry")?;
                if !path.is_dir() {
                    continue;
                }
                let relative = path.strip_prefix(root).unwrap_or(&path);
                if excludes.iter().any(|p| p.matches_path(relative)) {
                    continue;
                }
                dirs.push(path);
            }
        }
    }

    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}

/// Runs every configured grubber over every matching file of one module
/// directory.
///
/// Violations do not abort the scan: every file is read and every
/// violation collected, so one pass reports the complete picture.
pub fn grub_dir(
    dir: &Path,
    config: &Configuration,
    resolver: &PluralResolver,
) -> Result<DirOutcome> {
    let mut tokens = empty_tokens(&config.languages);
    let mut violations: Vec<String> = Vec::new();

    for rule in &config.file_rules {
        let files = find_rule_files(dir, &rule.include, &rule.exclude)?;

        let mut grubbers = Vec::new();
        for (name, grubber_config) in &rule.grubbers {
            grubbers.push(create_grubber(name, grubber_config, dir, resolver)?);
        }

        for file in &files {
            let text = fs::read_to_string(file)
                .with_context(|| format!("Failed to read source file: {}", file.display()))?;
            for grubber in &grubbers {
                match grubber.grub(&text, &config.languages) {
                    Ok(extracted) => {
                        for language in &config.languages {
                            if let (Some(list), Some(found)) =
                                (tokens.get_mut(language), extracted.get(language))
                            {
                                list.extend(found.iter().cloned());
                            }
                        }
                    }
                    Err(batch) => violations.extend(batch.0),
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(DirOutcome::Tokens(tokens))
    } else {
        Ok(DirOutcome::Violations(violations))
    }
}

/// Files matched by one file rule inside a module directory, sorted.
fn find_rule_files(dir: &Path, include: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = compile_patterns(exclude)?;

    let mut files = Vec::new();
    for pattern in include {
        let full = dir.join(pattern);
        let entries = glob::glob(&full.to_string_lossy())
            .with_context(|| format!("Invalid glob pattern: \"{}\"", pattern))?;
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?;
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(dir).unwrap_or(&path);
            if excludes.iter().any(|p| p.matches_path(relative)) {
                continue;
            }
            files.push(path);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern: \"{}\"", pattern))
        })
        .collect()
}
