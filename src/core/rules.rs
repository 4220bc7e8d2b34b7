//! Key naming rules: validation and auto-fix.
//!
//! A rule list is configured per grubber and applied to every extracted
//! key. Rules are pure transforms; a key satisfies a rule iff applying it
//! is a no-op. Validation runs all rules cumulatively in a fixed order
//! (non-namespace rules first, namespace rules last) and reports both the
//! violated rule names and the fully fixed key.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::module_name;

/// Rule category tag as it appears in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RuleKind {
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "namespace")]
    Namespace,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::CamelCase => write!(f, "camelCase"),
            RuleKind::Namespace => write!(f, "namespace"),
        }
    }
}

/// A rule entry as written in the configuration file: either a bare
/// category tag (`"camelCase"`) or a parameterized object
/// (`{ "ruleKey": "namespace", "namespace": "app" }`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RuleConfig {
    Tag(RuleKind),
    WithOptions {
        #[serde(rename = "ruleKey")]
        rule_key: RuleKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        namespace: Option<String>,
    },
}

impl RuleConfig {
    pub fn kind(&self) -> RuleKind {
        match self {
            RuleConfig::Tag(kind) => *kind,
            RuleConfig::WithOptions { rule_key, .. } => *rule_key,
        }
    }
}

/// A fully materialized rule, ready to apply to keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    CamelCase,
    /// Prefix keys with the given namespace segment when absent.
    Namespace(String),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::CamelCase => RuleKind::CamelCase,
            Rule::Namespace(_) => RuleKind::Namespace,
        }
    }
}

/// Materializes configured rule entries for one scanned directory.
///
/// Namespace rules without an explicit value default to the directory's
/// module name, itself normalized by the non-namespace rules. The default
/// is resolved in two phases (derive the value first, then build the rule
/// instance) so the namespace rule never feeds back into itself.
pub fn resolve_rules(configs: &[RuleConfig], scan_dir: &Path) -> Vec<Rule> {
    let plain: Vec<Rule> = configs
        .iter()
        .filter(|config| config.kind() != RuleKind::Namespace)
        .map(|config| match config.kind() {
            RuleKind::CamelCase => Rule::CamelCase,
            RuleKind::Namespace => unreachable!("namespace rules are filtered out"),
        })
        .collect();

    let mut rules = plain.clone();
    for config in configs
        .iter()
        .filter(|config| config.kind() == RuleKind::Namespace)
    {
        let explicit = match config {
            RuleConfig::WithOptions { namespace, .. } => namespace.clone(),
            RuleConfig::Tag(_) => None,
        };
        let value = explicit.unwrap_or_else(|| normalize(&module_name(scan_dir), &plain));
        rules.push(Rule::Namespace(value));
    }
    rules
}

/// Applies a single rule to a key.
pub fn apply_rule(rule: &Rule, key: &str) -> String {
    match rule {
        Rule::CamelCase => key
            .split('.')
            .filter_map(camel_case_segment)
            .collect::<Vec<_>>()
            .join("."),
        Rule::Namespace(namespace) => {
            let segments: Vec<&str> = key.split('.').filter(|s| !s.is_empty()).collect();
            if namespace.is_empty() || segments.first() == Some(&namespace.as_str()) {
                segments.join(".")
            } else {
                let mut prefixed = vec![namespace.as_str()];
                prefixed.extend(segments);
                prefixed.join(".")
            }
        }
    }
}

/// Camel-cases one dot-delimited segment: invalid characters are stripped,
/// hyphen/underscore/space-delimited words are merged, leading/trailing
/// delimiters vanish. Returns `None` when nothing survives.
fn camel_case_segment(segment: &str) -> Option<String> {
    let mut out = String::new();
    let mut at_boundary = false;
    for c in segment.chars() {
        if c == '-' || c == '_' || c == ' ' {
            if !out.is_empty() {
                at_boundary = true;
            }
            continue;
        }
        if !c.is_alphanumeric() {
            continue;
        }
        if at_boundary {
            out.extend(c.to_uppercase());
            at_boundary = false;
        } else if out.is_empty() {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Rule violations for a key, with the fix already computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReport {
    /// Violated rules, in evaluation order.
    pub violations: Vec<RuleKind>,
    /// The key after applying every rule. `None` for empty input.
    pub fix: Option<String>,
}

impl KeyReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Non-namespace rules in configured order, then namespace rules in
/// configured order. Namespace prefixing must see the other rules'
/// output, so it always evaluates last.
fn evaluation_order(rules: &[Rule]) -> Vec<&Rule> {
    let (namespaced, plain): (Vec<&Rule>, Vec<&Rule>) = rules
        .iter()
        .partition(|rule| rule.kind() == RuleKind::Namespace);
    plain.into_iter().chain(namespaced).collect()
}

/// Validates a key against a rule list.
///
/// Each rule in evaluation order is checked against, then applied to, the
/// running result of the previous rules; a rule is violated iff applying
/// it changes the key. The fix is that cumulative result. An empty key
/// reports no violations and no fix.
pub fn validate(key: &str, rules: &[Rule]) -> KeyReport {
    if key.is_empty() {
        return KeyReport {
            violations: Vec::new(),
            fix: None,
        };
    }

    let mut violations = Vec::new();
    let mut fixed = key.to_string();
    for rule in evaluation_order(rules) {
        let applied = apply_rule(rule, &fixed);
        if applied != fixed {
            violations.push(rule.kind());
        }
        fixed = applied;
    }
    KeyReport {
        violations,
        fix: Some(fixed),
    }
}

/// Applies every rule once, in evaluation order, and returns the final key.
pub fn normalize(key: &str, rules: &[Rule]) -> String {
    evaluation_order(rules)
        .into_iter()
        .fold(key.to_string(), |key, rule| apply_rule(rule, &key))
}
