//! Pattern-based token extraction.
//!
//! Scans source text with named-capture patterns. A `token` capture is a
//! direct key literal, validated against the configured naming rules; a
//! `plural` capture is a pluralizable base key, expanded into suffixed
//! variants per language. The literal comment directive
//! `locale-ignore-next` discards the following match entirely.
//!
//! Patterns run on the non-backtracking `regex` engine, so a malformed
//! pattern against a large file cannot degenerate into catastrophic
//! backtracking. Each configured pattern compiles separately (the engine
//! rejects duplicate group names inside one alternation); their match
//! streams are merged leftmost-first, non-overlapping, with ties on start
//! position going to the earlier-configured pattern.

use std::path::Path;

use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::core::grubber::{
    Grubber, GrubberConfig, TokensByLanguage, ViolationBatch, empty_tokens,
};
use crate::core::plural::PluralResolver;
use crate::core::rules::{Rule, resolve_rules, validate};

/// Comment directive that suppresses the next pattern match.
pub const IGNORE_SENTINEL: &str = "locale-ignore-next";

/// One pattern match, in source order after merging all pattern streams.
#[derive(Debug)]
struct PatternMatch {
    start: usize,
    end: usize,
    /// Pattern precedence: 0 is the sentinel, configured patterns follow.
    pattern: usize,
    token: Option<String>,
    plural: Option<String>,
    ignore: bool,
}

pub struct RegexpGrubber<'r> {
    patterns: Vec<Regex>,
    sentinel: Regex,
    rules: Vec<Rule>,
    resolver: &'r PluralResolver,
}

impl<'r> RegexpGrubber<'r> {
    pub fn new(
        config: &GrubberConfig,
        scan_dir: &Path,
        resolver: &'r PluralResolver,
    ) -> Result<Self> {
        if config.patterns.is_empty() {
            bail!("regexp grubber requires at least one pattern");
        }
        let patterns = config
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid grubber pattern: \"{}\"", pattern))
            })
            .collect::<Result<Vec<_>>>()?;
        let sentinel = Regex::new(&regex::escape(IGNORE_SENTINEL))
            .context("Failed to compile the ignore sentinel")?;

        Ok(Self {
            patterns,
            sentinel,
            rules: resolve_rules(&config.rules, scan_dir),
            resolver,
        })
    }

    /// Collects every match of every pattern (sentinel included), then
    /// keeps the leftmost non-overlapping subset in source order.
    fn collect_matches(&self, text: &str) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        for found in self.sentinel.find_iter(text) {
            matches.push(PatternMatch {
                start: found.start(),
                end: found.end(),
                pattern: 0,
                token: None,
                plural: None,
                ignore: true,
            });
        }
        for (index, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                matches.push(PatternMatch {
                    start: whole.start(),
                    end: whole.end(),
                    pattern: index + 1,
                    token: caps.name("token").map(|m| m.as_str().to_string()),
                    plural: caps.name("plural").map(|m| m.as_str().to_string()),
                    ignore: false,
                });
            }
        }

        matches.sort_by_key(|m| (m.start, m.pattern));

        let mut selected = Vec::new();
        let mut scanned_to = 0;
        for m in matches {
            if m.start >= scanned_to {
                scanned_to = m.end;
                selected.push(m);
            }
        }
        selected
    }
}

/// Fixed per-language suppression: plural categories that do not exist
/// for a language are dropped from its token list.
fn is_suppressed(language: &str, key: &str) -> bool {
    match language {
        "en" => key.ends_with("_few") || key.ends_with("_many"),
        "ru" => key.ends_with("_other"),
        _ => false,
    }
}

impl Grubber for RegexpGrubber<'_> {
    fn grub(
        &self,
        text: &str,
        languages: &[String],
    ) -> std::result::Result<TokensByLanguage, ViolationBatch> {
        let mut tokens = empty_tokens(languages);
        let mut violations: Vec<String> = Vec::new();
        let mut skip_next = false;

        for m in self.collect_matches(text) {
            if m.ignore {
                skip_next = true;
                continue;
            }
            if skip_next {
                skip_next = false;
                continue;
            }

            if let Some(key) = &m.token {
                let report = validate(key, &self.rules);
                if !report.is_clean() {
                    let names = report
                        .violations
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    violations.push(format!(
                        "Rules are violated in key: {} [{}], possible fix: {}",
                        key,
                        names,
                        report.fix.as_deref().unwrap_or_default(),
                    ));
                }
                for language in languages {
                    if is_suppressed(language, key) {
                        continue;
                    }
                    if let Some(list) = tokens.get_mut(language) {
                        list.push(key.clone());
                    }
                }
            }

            if let Some(base) = &m.plural {
                for language in languages {
                    let Some(list) = tokens.get_mut(language) else {
                        continue;
                    };
                    for variant in self.resolver.expand(base, language) {
                        if !is_suppressed(language, &variant) {
                            list.push(variant);
                        }
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(tokens)
        } else {
            Err(ViolationBatch(violations))
        }
    }
}
