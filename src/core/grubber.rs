//! The grubber seam: extraction strategies constructed by name.
//!
//! A grubber scans one unit of source text and yields the extracted
//! translation tokens per output language. Key-rule violations never
//! abort a scan mid-file; they are collected and surfaced as one batch so
//! the caller sees the complete picture.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::plural::{PluralResolver, PluralVersion};
use crate::core::regexp::RegexpGrubber;
use crate::core::rules::RuleConfig;

/// Extracted token lists per output language. Duplicates are preserved;
/// deduplication happens once per language after all files are merged.
pub type TokensByLanguage = HashMap<String, Vec<String>>;

/// Creates an empty token list for every output language.
pub fn empty_tokens(languages: &[String]) -> TokensByLanguage {
    languages
        .iter()
        .map(|language| (language.clone(), Vec::new()))
        .collect()
}

/// All key-rule violations found in one unit of source text.
///
/// A non-empty batch means the file failed extraction; no partial token
/// set is returned for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationBatch(pub Vec<String>);

impl fmt::Display for ViolationBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("\n"))
    }
}

impl std::error::Error for ViolationBatch {}

pub trait Grubber {
    /// Scans `text` and returns the extracted tokens per language, or the
    /// batch of rule violations found along the way.
    fn grub(
        &self,
        text: &str,
        languages: &[String],
    ) -> Result<TokensByLanguage, ViolationBatch>;
}

/// Per-grubber configuration as written under `fileRules[].grubbers`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GrubberConfig {
    /// Named-capture patterns with groups `token` and `plural`.
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleConfig>,
}

/// Constructs an extraction strategy by its configured name.
///
/// `"regexp"` is the only known kind; anything else is a configuration
/// error and fails before any file is read.
pub fn create_grubber<'r>(
    name: &str,
    config: &GrubberConfig,
    scan_dir: &Path,
    resolver: &'r PluralResolver,
) -> Result<Box<dyn Grubber + 'r>> {
    match name {
        "regexp" => Ok(Box::new(RegexpGrubber::new(config, scan_dir, resolver)?)),
        other => bail!("Unknown grubber kind: \"{}\"", other),
    }
}

/// Validates a grubber entry without scanning anything: the kind must be
/// known and its patterns must compile. Used for fail-fast configuration
/// checking at load time.
pub fn validate_grubber_config(name: &str, config: &GrubberConfig) -> Result<()> {
    let resolver = PluralResolver::new(PluralVersion::Disabled, &[]);
    create_grubber(name, config, Path::new("."), &resolver).map(|_| ())
}
