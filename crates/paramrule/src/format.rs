//! Rule-specific placeholder substitution.
//!
//! By the time a template reaches a formatter, `:parameter` has already been
//! replaced with the field's display name. Formatters fill in what only the
//! rule argument knows: `:list`, `:other`, `:min` and `:max`.

use crate::value::{bounds, describe, literal, split_arguments};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A template rewriter: `(argument, template) -> message`.
pub type Formatter = fn(&Value, &str) -> String;

static BUILTIN: OnceLock<FormatterRegistry> = OnceLock::new();

/// Registry of per-rule formatters.
///
/// Rules without a formatter keep their template unchanged.
#[derive(Clone)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Formatter>,
}

impl FormatterRegistry {
    /// A registry with no formatters.
    pub fn empty() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// An owned registry holding every built-in formatter.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, formatter) in BUILTIN_FORMATTERS {
            registry.register(*name, *formatter);
        }
        registry
    }

    /// The process-wide built-in registry.
    pub fn builtin() -> &'static FormatterRegistry {
        BUILTIN.get_or_init(Self::with_builtins)
    }

    /// Register (or replace) a formatter, returning the one it replaced.
    pub fn register(&mut self, name: impl Into<String>, formatter: Formatter) -> Option<Formatter> {
        self.formatters.insert(name.into(), formatter)
    }

    /// Builder-style [`FormatterRegistry::register`].
    pub fn with(mut self, name: impl Into<String>, formatter: Formatter) -> Self {
        self.register(name, formatter);
        self
    }

    /// Rewrite `template` for `rule`.
    pub fn format(&self, rule: &str, argument: &Value, template: &str) -> String {
        match self.formatters.get(rule) {
            Some(formatter) => formatter(argument, template),
            None => template.to_string(),
        }
    }

    /// Whether a rule has a formatter.
    pub fn contains(&self, rule: &str) -> bool {
        self.formatters.contains_key(rule)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.formatters.keys().collect();
        names.sort_unstable();
        f.debug_struct("FormatterRegistry")
            .field("formatters", &names)
            .finish()
    }
}

const BUILTIN_FORMATTERS: &[(&str, Formatter)] = &[
    ("in", format_in),
    ("equal", format_equal),
    ("min", format_min),
    ("min_length", format_min),
    ("max", format_max),
    ("max_length", format_max),
    ("between", format_between),
    ("between_length", format_between),
];

fn format_in(list: &Value, template: &str) -> String {
    let mut elements: Vec<String> = split_arguments(list).iter().map(describe).collect();

    let stringified = if elements.len() > 2 {
        let last = elements.pop().unwrap_or_default();
        format!("{} and {}", elements.join(", "), last)
    } else {
        elements.join(", ")
    };

    template.replace(":list", &stringified)
}

fn format_equal(other: &Value, template: &str) -> String {
    template.replace(":other", &literal(other))
}

fn format_min(min: &Value, template: &str) -> String {
    template.replace(":min", &literal(min))
}

fn format_max(max: &Value, template: &str) -> String {
    template.replace(":max", &literal(max))
}

fn format_between(range: &Value, template: &str) -> String {
    let items = split_arguments(range);
    let (min, max) = match bounds(&items) {
        Some((min, max)) => (literal(min), literal(max)),
        None => (String::new(), String::new()),
    };
    template.replace(":min", &min).replace(":max", &max)
}
