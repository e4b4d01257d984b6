//! Default message templates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Key of the template used when a rule has none of its own.
pub const DEFAULT_KEY: &str = "default";

const FALLBACK: &str = "The :parameter parameter is invalid.";

static BUILTIN: OnceLock<MessageCatalog> = OnceLock::new();

const BUILTIN_MESSAGES: &[(&str, &str)] = &[
    (DEFAULT_KEY, FALLBACK),
    ("isset", "The :parameter parameter is required"),
    ("required", "The :parameter parameter should be assigned a value."),
    ("numeric", "The :parameter parameter must be a numeric."),
    ("digits", "The :parameter parameter must be entirely digit characters."),
    ("alpha", "The :parameter parameter may only contain letters."),
    ("alpha_num", "The :parameter parameter may only contain letters and numbers."),
    ("alpha_dash", "The :parameter parameter may only contain letters, numbers, dashes and underscores."),
    ("alpha_space", "The :parameter parameter may only contain letters and whitespace."),
    ("alpha_num_space", "The :parameter parameter may only contain letters, numbers and whitespace."),
    ("alpha_dash_space", "The :parameter parameter may only contain letters, numbers, dashes, underscores and whitespace."),
    ("iso_latin_alpha", "The :parameter parameter may only contain iso-latin letters."),
    ("iso_latin_alpha_num", "The :parameter parameter may only contain iso-latin letters and numbers."),
    ("iso_latin_alpha_dash", "The :parameter parameter may only contain iso-latin letters, numbers, dashes and underscores."),
    ("iso_latin_alpha_space", "The :parameter parameter may only contain iso-latin letters and whitespace."),
    ("iso_latin_alpha_num_space", "The :parameter parameter may only contain iso-latin letters, numbers and whitespace."),
    ("iso_latin_alpha_dash_space", "The :parameter parameter may only contain iso-latin letters, numbers, dashes, underscores and whitespace."),
    ("in", "The :parameter parameter only accept one of the following values: :list."),
    ("equal", "The :parameter parameter must be equal to :other."),
    ("min", "The :parameter parameter must be at least :min."),
    ("max", "The :parameter parameter may not be greater than :max."),
    ("min_length", "The :parameter parameter must be at least :min characters."),
    ("max_length", "The :parameter parameter may not be greater than :max characters."),
    ("between", "The :parameter parameter must be between :min and :max."),
    ("between_length", "The :parameter parameter must be between :min and :max characters."),
    ("email", "The :parameter parameter must be a valid email address."),
    ("regex", "The :parameter parameter format is invalid."),
    ("boolean", "The :parameter parameter field must be true or false."),
    ("integer", "The :parameter parameter must be an integer."),
    ("ip", "The :parameter parameter must be a valid IP address."),
    ("ipv4", "The :parameter parameter must be a valid IPv4 address."),
    ("ipv6", "The :parameter parameter must be a valid IPv6 address."),
    ("url", "The :parameter parameter must be an URL format."),
];

/// Rule name to message template.
///
/// Serializes as a flat JSON object, so a host application can keep its
/// wording next to the rest of its configuration:
///
/// ```json
/// { "default": "The :parameter parameter is invalid.", "min": "..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// A catalog with only the generic fallback.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// An owned catalog with every built-in template.
    pub fn with_defaults() -> Self {
        let templates = BUILTIN_MESSAGES
            .iter()
            .map(|(rule, template)| (rule.to_string(), template.to_string()))
            .collect();
        Self { templates }
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static MessageCatalog {
        BUILTIN.get_or_init(Self::with_defaults)
    }

    /// Set the template for a rule (use [`DEFAULT_KEY`] for the fallback).
    pub fn set(&mut self, rule: impl Into<String>, template: impl Into<String>) -> &mut Self {
        self.templates.insert(rule.into(), template.into());
        self
    }

    /// Builder-style [`MessageCatalog::set`].
    pub fn with(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.set(rule, template);
        self
    }

    /// Overlay another catalog; its templates win.
    pub fn extend(&mut self, other: MessageCatalog) {
        self.templates.extend(other.templates);
    }

    /// The rule's own template, if it has one.
    pub fn get(&self, rule: &str) -> Option<&str> {
        self.templates.get(rule).map(String::as_str)
    }

    /// The rule's template, falling back to the default template.
    pub fn template(&self, rule: &str) -> &str {
        self.get(rule)
            .or_else(|| self.get(DEFAULT_KEY))
            .unwrap_or(FALLBACK)
    }

    /// Rule names with a template of their own.
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.templates
            .keys()
            .map(String::as_str)
            .filter(|rule| *rule != DEFAULT_KEY)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
