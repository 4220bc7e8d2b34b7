//! Locgrub - translation-key extraction and locale-file maintenance
//!
//! Locgrub is a CLI tool and library that scans project sources for
//! translation-key literals, reconciles them against previously generated
//! locale files, and emits updated per-language JSON dictionaries. Keys
//! are validated against configurable naming rules and pluralizable keys
//! are expanded per language.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core extraction engine (rules, plurals, pattern grubbers)
//! - `locale`: Locale dictionary files (flatten, merge, read/write)
//! - `scan`: Directory discovery and the per-directory scan driver
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod locale;
pub mod scan;
pub mod utils;
