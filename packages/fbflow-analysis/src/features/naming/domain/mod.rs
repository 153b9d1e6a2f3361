//! Naming rules and the suggestion generator

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::models::{ArtifactKind, Severity};
use crate::shared::text::split_words;

/// Event names the runtime defines; exempt from the SNAKE_CASE rule
pub const RESERVED_EVENTS: [&str; 2] = ["INIT", "INITO"];

/// Class of name a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NameClass {
    Cat,
    SubApp,
    BasicFb,
    CompositeFb,
    Function,
    Adapter,
    Event,
    Structure,
    Enum,
    Alias,
    Array,
    InterfaceVar,
    InternalVar,
    Folder,
}

impl NameClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cat => "CAT",
            Self::SubApp => "SubApp",
            Self::BasicFb => "BasicFB",
            Self::CompositeFb => "CompositeFB",
            Self::Function => "Function",
            Self::Adapter => "Adapter",
            Self::Event => "Event",
            Self::Structure => "Structure",
            Self::Enum => "Enum",
            Self::Alias => "Alias",
            Self::Array => "Array",
            Self::InterfaceVar => "InterfaceVar",
            Self::InternalVar => "InternalVar",
            Self::Folder => "Folder",
        }
    }

    /// Name class for a declared artifact's own name
    pub fn for_artifact(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::Cat => Self::Cat,
            ArtifactKind::SubApp => Self::SubApp,
            ArtifactKind::BasicFb => Self::BasicFb,
            ArtifactKind::CompositeFb => Self::CompositeFb,
            ArtifactKind::Function => Self::Function,
            ArtifactKind::Adapter => Self::Adapter,
            ArtifactKind::Structure => Self::Structure,
            ArtifactKind::Enum => Self::Enum,
            ArtifactKind::Array => Self::Array,
            ArtifactKind::Alias => Self::Alias,
        }
    }
}

/// One naming rule: the accepting pattern plus how to describe a violation
pub struct NamingRule {
    pub convention: &'static str,
    pub severity: Severity,
    pub pattern: Regex,
    pub example: &'static str,
}

static RULES: Lazy<BTreeMap<NameClass, NamingRule>> = Lazy::new(|| {
    let rule = |convention, severity, pattern: &str, example| NamingRule {
        convention,
        severity,
        pattern: Regex::new(pattern).expect("valid naming regex"),
        example,
    };
    BTreeMap::from([
        (
            NameClass::Cat,
            rule("PascalCase", Severity::Error, r"^[A-Z][a-zA-Z0-9]*$", "AnalogInput"),
        ),
        (
            NameClass::SubApp,
            rule("PascalCase", Severity::Error, r"^[A-Z][a-zA-Z0-9]*$", "MotorGroup"),
        ),
        (
            NameClass::BasicFb,
            rule("camelCase", Severity::Error, r"^[a-z][a-zA-Z0-9]*$", "scaleValue"),
        ),
        (
            NameClass::CompositeFb,
            rule("camelCase", Severity::Error, r"^[a-z][a-zA-Z0-9]*$", "motorControl"),
        ),
        (
            NameClass::Function,
            rule("camelCase", Severity::Error, r"^[a-z][a-zA-Z0-9]*$", "clampRange"),
        ),
        (
            NameClass::Adapter,
            rule("IPascalCase", Severity::Error, r"^I[A-Z][a-zA-Z0-9]*$", "IMotorControl"),
        ),
        (
            NameClass::Event,
            rule("SNAKE_CASE", Severity::Error, r"^[A-Z_]+$", "START_MOTOR"),
        ),
        (
            NameClass::Structure,
            rule("strPascalCase", Severity::Error, r"^str[A-Z][a-zA-Z0-9]*$", "strMotorData"),
        ),
        (
            NameClass::Enum,
            rule("ePascalCase", Severity::Error, r"^e[A-Z][a-zA-Z0-9]*$", "eMotorState"),
        ),
        (
            NameClass::Alias,
            rule("aPascalCase", Severity::Warning, r"^a[A-Z][a-zA-Z0-9]*$", "aPressure"),
        ),
        (
            NameClass::Array,
            rule("arrPascalCase", Severity::Warning, r"^arr[A-Z][a-zA-Z0-9]*$", "arrSetpoints"),
        ),
        (
            NameClass::InterfaceVar,
            rule("PascalCase", Severity::Error, r"^[A-Z][a-zA-Z0-9]*$", "ScaledValue"),
        ),
        (
            NameClass::InternalVar,
            rule("camelCase", Severity::Warning, r"^[a-z][a-zA-Z0-9]*$", "lastValue"),
        ),
        (
            NameClass::Folder,
            rule("PascalCase", Severity::Warning, r"^[A-Z][a-zA-Z0-9]*$", "MotorControl"),
        ),
    ])
});

/// Rule for a name class; every class has one
pub fn rule_for(class: NameClass) -> &'static NamingRule {
    &RULES[&class]
}

/// Does `name` satisfy its class's rule?
pub fn is_valid(name: &str, class: NameClass) -> bool {
    if class == NameClass::Event && RESERVED_EVENTS.contains(&name) {
        return true;
    }
    rule_for(class).pattern.is_match(name)
}

/// Rebuild `name` in its class's target convention
///
/// Returns `None` when the rebuilt name equals the input (nothing useful to
/// suggest) or the input has no letters to work with.
pub fn suggest(name: &str, class: NameClass) -> Option<String> {
    let words = split_words(name);
    if words.is_empty() {
        return None;
    }
    let candidate = match class {
        NameClass::Cat
        | NameClass::SubApp
        | NameClass::InterfaceVar
        | NameClass::Folder => pascal(&words),
        NameClass::BasicFb
        | NameClass::CompositeFb
        | NameClass::Function
        | NameClass::InternalVar => camel(&words),
        NameClass::Adapter => prefixed("I", &words),
        NameClass::Event => snake_upper(&words),
        NameClass::Structure => prefixed("str", &words),
        NameClass::Enum => prefixed("e", &words),
        NameClass::Alias => prefixed("a", &words),
        NameClass::Array => prefixed("arr", &words),
    };
    if candidate == name {
        None
    } else {
        Some(candidate)
    }
}

/// Capitalize one word; all-caps words are title-cased so "START" joins a
/// PascalCase name as "Start", not "START"
fn cap(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest: String = chars.collect();
    let rest = if word.len() > 1 && word.chars().all(|c| c.is_uppercase() || c.is_numeric()) {
        rest.to_lowercase()
    } else {
        rest
    };
    format!("{}{}", first.to_uppercase(), rest)
}

fn pascal(words: &[String]) -> String {
    words.iter().map(|w| cap(w)).collect()
}

fn camel(words: &[String]) -> String {
    let mut out = words[0].to_lowercase();
    for word in &words[1..] {
        out.push_str(&cap(word));
    }
    out
}

fn snake_upper(words: &[String]) -> String {
    words
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Prefix conventions: drop a leading word equal to the prefix, then prepend
fn prefixed(prefix: &str, words: &[String]) -> String {
    let body = if words[0].eq_ignore_ascii_case(prefix) && words.len() > 1 {
        pascal(&words[1..])
    } else {
        pascal(words)
    };
    format!("{}{}", prefix, body)
}
