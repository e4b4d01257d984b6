//! Rule declarations handed to a validation call.

use crate::error::{Reject, Result};
use crate::value::is_truthy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Rule name that skips a field when its value is absent or `null`.
pub const NULLABLE: &str = "nullable";

/// Rule name whose argument is a [`Callback`] invoked directly.
pub const CALLBACK: &str = "callback";

/// A custom rule. Receives the field value and the [`Reject`] marker it
/// uses to report failure.
pub type Callback = Arc<dyn Fn(&Value, Reject) -> Result<()> + Send + Sync>;

/// Field display names used for `:parameter`.
pub type AliasMap = HashMap<String, String>;

/// Argument attached to a rule.
#[derive(Clone)]
pub enum RuleArg {
    /// Plain argument, interpreted by the rule.
    Value(Value),
    /// Invocable argument for the `callback` rule.
    Callback(Callback),
}

impl RuleArg {
    /// Wrap a closure as a callback argument.
    pub fn callback<F>(callback: F) -> Self
    where
        F: Fn(&Value, Reject) -> Result<()> + Send + Sync + 'static,
    {
        RuleArg::Callback(Arc::new(callback))
    }

    /// The plain argument, if this is not a callback.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            RuleArg::Value(value) => Some(value),
            RuleArg::Callback(_) => None,
        }
    }
}

impl fmt::Debug for RuleArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleArg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            RuleArg::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// The ordered rules of one field.
///
/// Rules keep the order of their first declaration; declaring a rule again
/// replaces its argument in place.
#[derive(Debug, Clone)]
pub struct FieldRules {
    field: String,
    rules: Vec<(String, RuleArg)>,
}

impl FieldRules {
    /// Start declaring rules for `field`.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    /// Add a rule with its argument.
    pub fn rule(self, name: impl Into<String>, argument: impl Into<Value>) -> Self {
        self.with_arg(name, RuleArg::Value(argument.into()))
    }

    /// Add a flag-style rule switched on (`required`, `email`, ...).
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.rule(name, true)
    }

    /// Skip every rule of this field when its value is absent or `null`.
    pub fn nullable(self) -> Self {
        self.rule(NULLABLE, true)
    }

    /// Add a `callback` rule.
    pub fn callback<F>(self, callback: F) -> Self
    where
        F: Fn(&Value, Reject) -> Result<()> + Send + Sync + 'static,
    {
        self.with_arg(CALLBACK, RuleArg::callback(callback))
    }

    /// Add a rule with an explicit [`RuleArg`].
    pub fn with_arg(mut self, name: impl Into<String>, argument: RuleArg) -> Self {
        self.set(name, argument);
        self
    }

    /// Add or replace a rule in place.
    pub fn set(&mut self, name: impl Into<String>, argument: RuleArg) {
        let name = name.into();
        match self.rules.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = argument,
            None => self.rules.push((name, argument)),
        }
    }

    /// The field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Argument of a rule, if declared.
    pub fn get(&self, name: &str) -> Option<&RuleArg> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, argument)| argument)
    }

    /// Whether `nullable` is declared with a truthy argument.
    pub fn is_nullable(&self) -> bool {
        self.get(NULLABLE)
            .and_then(RuleArg::as_value)
            .is_some_and(is_truthy)
    }

    /// Declared rules in order, including `nullable`.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleArg)> {
        self.rules
            .iter()
            .map(|(name, argument)| (name.as_str(), argument))
    }

    /// Number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn merge(&mut self, other: FieldRules) {
        for (name, argument) in other.rules {
            self.set(name, argument);
        }
    }
}

/// Ordered field declarations for one validation call.
///
/// ```rust
/// use paramrule::{FieldRules, RuleSet};
///
/// let rules = RuleSet::new()
///     .field(FieldRules::new("amount").flag("required").rule("min", 10))
///     .field(FieldRules::new("locale").nullable().rule("in", "vn,en"));
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Declaring a field again merges its rules into the
    /// existing entry.
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.add(rules);
        self
    }

    /// Add a field in place.
    pub fn add(&mut self, rules: FieldRules) {
        match self.fields.iter_mut().find(|f| f.field == rules.field) {
            Some(existing) => existing.merge(rules),
            None => self.fields.push(rules),
        }
    }

    /// Rules of a field, if declared.
    pub fn get(&self, field: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.iter()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldRules> for RuleSet {
    fn from_iter<I: IntoIterator<Item = FieldRules>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rules in iter {
            set.add(rules);
        }
        set
    }
}

/// Custom templates per field and rule, taking precedence over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageOverrides {
    messages: HashMap<String, HashMap<String, String>>,
}

impl MessageOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template for `field`'s `rule`.
    pub fn set(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        template: impl Into<String>,
    ) -> &mut Self {
        self.messages
            .entry(field.into())
            .or_default()
            .insert(rule.into(), template.into());
        self
    }

    /// Builder-style [`MessageOverrides::set`].
    pub fn with(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.set(field, rule, template);
        self
    }

    /// The template for `field`'s `rule`; empty templates count as unset.
    pub fn get(&self, field: &str, rule: &str) -> Option<&str> {
        self.messages
            .get(field)?
            .get(rule)
            .map(String::as_str)
            .filter(|template| !template.is_empty())
    }

    /// Whether no override is set.
    pub fn is_empty(&self) -> bool {
        self.messages.values().all(HashMap::is_empty)
    }
}
