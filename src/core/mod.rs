//! Core extraction engine.
//!
//! Leaf-first: plural category resolution and suffix expansion
//! ([`plural`]), key naming rules ([`rules`]), the grubber seam
//! ([`grubber`]) and the pattern-based extractor ([`regexp`]). The engine
//! is synchronous and file-at-a-time; all configuration (rules, plural
//! version, patterns) is fixed before the first file is scanned.

pub mod grubber;
pub mod plural;
pub mod regexp;
pub mod rules;

pub use grubber::{
    Grubber, GrubberConfig, TokensByLanguage, ViolationBatch, create_grubber, empty_tokens,
    validate_grubber_config,
};
pub use plural::{PluralResolver, PluralVersion};
pub use regexp::IGNORE_SENTINEL;
pub use rules::{KeyReport, Rule, RuleConfig, RuleKind, normalize, resolve_rules, validate};
