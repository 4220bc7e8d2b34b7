//! Plural category resolution and suffix expansion.
//!
//! Languages distinguish different numbers of plural categories. Each
//! category is represented by a sample cardinal number (English: `[1, 2]`
//! for "one"/"other", Russian: `[1, 2, 5]` for "one"/"few"/"many"). The
//! suffixing convention applied when expanding a pluralizable token is
//! selected by a process-wide [`PluralVersion`].

use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};

/// Sample-number sets per language group, mirroring the i18next plural
/// resolver data. Order within a set is the category order.
const PLURAL_SETS: &[(&[&str], &[u32])] = &[
    (
        &[
            "ach", "ak", "am", "arn", "br", "fil", "fr", "gun", "ln", "mfe", "mg", "mi", "oc",
            "pt", "tg", "ti", "tl", "tr", "uz", "wa",
        ],
        &[1, 2],
    ),
    (
        &[
            "af", "an", "ast", "az", "bg", "bn", "ca", "da", "de", "el", "en", "eo", "es", "et",
            "eu", "fi", "fo", "fur", "fy", "gl", "gu", "ha", "hi", "hu", "hy", "ia", "is", "it",
            "kk", "kn", "ku", "lb", "mk", "ml", "mn", "mr", "nb", "ne", "nl", "nn", "no", "pa",
            "rm", "sco", "se", "si", "so", "sq", "sv", "sw", "ta", "te", "tk", "ur", "yo",
        ],
        &[1, 2],
    ),
    (
        &[
            "ay", "bo", "cgg", "fa", "ht", "id", "ja", "jbo", "ka", "km", "ko", "ky", "lo", "ms",
            "sah", "su", "th", "tt", "ug", "vi", "wo", "zh",
        ],
        &[1],
    ),
    (&["be", "bs", "cnr", "dz", "hr", "ru", "sr", "uk"], &[1, 2, 5]),
    (&["cs", "csb", "pl", "sk"], &[1, 2, 5]),
    (&["ar"], &[0, 1, 2, 3, 11, 100]),
    (&["cy"], &[1, 2, 3, 8]),
    (&["ga"], &[1, 2, 3, 7, 11]),
    (&["gd"], &[1, 2, 3, 20]),
    (&["he", "iw"], &[1, 2, 20, 21]),
    (&["jv"], &[0, 1]),
    (&["kw"], &[1, 2, 3, 4]),
    (&["lt"], &[1, 2, 10]),
    (&["lv"], &[1, 2, 0]),
    (&["mnk"], &[0, 1, 2]),
    (&["mt"], &[1, 2, 11, 20]),
    (&["or"], &[2, 1]),
    (&["ro"], &[1, 2, 20]),
    (&["sl"], &[5, 1, 2, 3]),
];

fn lookup_numbers(language: &str) -> Option<&'static [u32]> {
    PLURAL_SETS
        .iter()
        .find(|(languages, _)| languages.contains(&language))
        .map(|(_, numbers)| *numbers)
}

/// Pluralization scheme version, fixed once per run.
///
/// Matches the `i18nextPlural` configuration field: `"v1"` through `"v4"`,
/// or `false` to disable plural expansion entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluralVersion {
    V1,
    V2,
    V3,
    V4,
    #[default]
    Disabled,
}

impl PluralVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralVersion::V1 => "v1",
            PluralVersion::V2 => "v2",
            PluralVersion::V3 => "v3",
            PluralVersion::V4 => "v4",
            PluralVersion::Disabled => "false",
        }
    }
}

impl fmt::Display for PluralVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for PluralVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Tag(String),
            Flag(bool),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(false) => Ok(PluralVersion::Disabled),
            Raw::Flag(true) => Err(DeError::custom(
                "i18nextPlural must be \"v1\", \"v2\", \"v3\", \"v4\" or false",
            )),
            Raw::Tag(tag) => match tag.as_str() {
                "v1" => Ok(PluralVersion::V1),
                "v2" => Ok(PluralVersion::V2),
                "v3" => Ok(PluralVersion::V3),
                "v4" => Ok(PluralVersion::V4),
                other => Err(DeError::custom(format!(
                    "i18nextPlural must be \"v1\", \"v2\", \"v3\", \"v4\" or false, got \"{}\"",
                    other
                ))),
            },
        }
    }
}

impl Serialize for PluralVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PluralVersion::Disabled => serializer.serialize_bool(false),
            version => serializer.serialize_str(version.as_str()),
        }
    }
}

/// Resolves plural categories per language and expands pluralizable tokens.
///
/// Category sets are locale metadata, not scan state: the resolver is built
/// once per run, pre-resolving every configured output language, and is
/// read-only afterwards. Languages absent from the table (or any language
/// when expansion is disabled) degrade to pass-through, never an error.
#[derive(Debug, Clone)]
pub struct PluralResolver {
    version: PluralVersion,
    numbers: HashMap<String, &'static [u32]>,
}

impl PluralResolver {
    pub fn new(version: PluralVersion, languages: &[String]) -> Self {
        let mut numbers = HashMap::new();
        if version != PluralVersion::Disabled {
            for language in languages {
                if let Some(set) = lookup_numbers(language) {
                    numbers.insert(language.clone(), set);
                }
            }
        }
        Self { version, numbers }
    }

    /// The ordered plural category samples for a language, if known.
    pub fn resolve(&self, language: &str) -> Option<&'static [u32]> {
        self.numbers.get(language).copied()
    }

    /// Expands a pluralizable base token into its suffixed variants for one
    /// language.
    ///
    /// Unknown languages pass the token through unchanged. Two-category
    /// languages get the base plus a single `_other` (v4) or `_plural`
    /// suffix. Other category counts walk the category set:
    ///
    /// - v4: sample 1 keeps the base, 2 maps to `_few`, 5 to `_other`;
    ///   any other sample contributes nothing.
    /// - v3: positional `_<index>` suffixes.
    /// - v2: the bare base for single-category languages, otherwise
    ///   `_<sample>` suffixes.
    /// - v1: contributes nothing per category.
    pub fn expand(&self, token: &str, language: &str) -> Vec<String> {
        let Some(numbers) = self.resolve(language) else {
            return vec![token.to_string()];
        };

        if numbers.len() == 2 {
            let suffix = if self.version == PluralVersion::V4 {
                "_other"
            } else {
                "_plural"
            };
            return vec![token.to_string(), format!("{token}{suffix}")];
        }

        let mut expanded = Vec::new();
        for (index, &number) in numbers.iter().enumerate() {
            match self.version {
                PluralVersion::V4 => match number {
                    1 => expanded.push(token.to_string()),
                    2 => expanded.push(format!("{token}_few")),
                    5 => expanded.push(format!("{token}_other")),
                    _ => {}
                },
                PluralVersion::V3 => expanded.push(format!("{token}_{index}")),
                PluralVersion::V2 => {
                    if numbers.len() == 1 {
                        expanded.push(token.to_string());
                    } else {
                        expanded.push(format!("{token}_{number}"));
                    }
                }
                PluralVersion::V1 | PluralVersion::Disabled => {}
            }
        }
        expanded
    }
}
