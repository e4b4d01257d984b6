//! The validation engine.
//!
//! [`Validator`] walks a [`RuleSet`] field by field and rule by rule, in
//! declaration order, and stops at the first failure. Nothing is collected:
//! the caller learns about exactly one violation per call.

use crate::error::{ConfigError, Error, InvalidRequest, Reject, Result};
use crate::format::{Formatter, FormatterRegistry};
use crate::messages::MessageCatalog;
use crate::rules::{Predicate, RuleRegistry};
use crate::ruleset::{AliasMap, FieldRules, MessageOverrides, RuleArg, RuleSet, CALLBACK, NULLABLE};
use crate::value::describe;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static SHARED: OnceLock<Validator> = OnceLock::new();

/// Something that owns a parameter map, typically a gateway request.
///
/// ## Example
///
/// ```rust
/// use paramrule::prelude::*;
/// use serde_json::{json, Map, Value};
///
/// struct PurchaseRequest {
///     parameters: Map<String, Value>,
/// }
///
/// impl ParameterSource for PurchaseRequest {
///     fn parameters(&self) -> Map<String, Value> {
///         self.parameters.clone()
///     }
///
///     fn parametric_converter(&self) -> AliasMap {
///         AliasMap::from([("vnp_Amount".to_string(), "amount".to_string())])
///     }
/// }
///
/// let mut parameters = Map::new();
/// parameters.insert("vnp_Amount".into(), json!(5));
/// let request = PurchaseRequest { parameters };
///
/// let rules = RuleSet::new().field(FieldRules::new("vnp_Amount").rule("min", 10));
/// let error = request.validate_with_rules(&rules).unwrap_err();
/// assert_eq!(error.to_string(), "The amount parameter must be at least 10.");
/// ```
pub trait ParameterSource {
    /// The parameters to validate.
    fn parameters(&self) -> Map<String, Value>;

    /// Default display names for this source's fields.
    fn parametric_converter(&self) -> AliasMap {
        AliasMap::new()
    }

    /// Validate this source's parameters with the shared [`Validator`].
    fn validate_with_rules(&self, rules: &RuleSet) -> Result<()> {
        Validator::new().validate_source(self, rules, &MessageOverrides::new(), &AliasMap::new())
    }
}

impl ParameterSource for Map<String, Value> {
    fn parameters(&self) -> Map<String, Value> {
        self.clone()
    }
}

/// Evaluates rule sets against parameter maps.
///
/// Cloning is cheap: registries and the message catalog are shared.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Arc<RuleRegistry>,
    formatters: Arc<FormatterRegistry>,
    messages: Arc<MessageCatalog>,
    aliases: Arc<AliasMap>,
}

impl Validator {
    /// A validator using the built-in rules, formatters and messages.
    pub fn new() -> Self {
        SHARED.get_or_init(|| ValidatorBuilder::new().build()).clone()
    }

    /// Start configuring a validator.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// The predicate registry in use.
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// The formatter registry in use.
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// The message catalog in use.
    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Validate `data` against `rules`.
    ///
    /// `overrides` replaces default templates per field and rule; `aliases`
    /// supplies display names and wins over the validator's own aliases.
    #[tracing::instrument(level = "debug", skip_all, fields(field_count = rules.len()))]
    pub fn validate(
        &self,
        data: &Map<String, Value>,
        rules: &RuleSet,
        overrides: &MessageOverrides,
        aliases: &AliasMap,
    ) -> Result<()> {
        self.run(data, rules, overrides, &self.aliases, aliases)
    }

    /// [`Validator::validate`] without overrides or aliases.
    pub fn check(&self, data: &Map<String, Value>, rules: &RuleSet) -> Result<()> {
        self.validate(data, rules, &MessageOverrides::new(), &AliasMap::new())
    }

    /// Validate the parameters of a [`ParameterSource`].
    ///
    /// The source's converter supplies display names on top of the
    /// validator's own; `aliases` wins over both.
    #[tracing::instrument(level = "debug", skip_all, fields(field_count = rules.len()))]
    pub fn validate_source<S>(
        &self,
        source: &S,
        rules: &RuleSet,
        overrides: &MessageOverrides,
        aliases: &AliasMap,
    ) -> Result<()>
    where
        S: ParameterSource + ?Sized,
    {
        let data = source.parameters();
        let mut defaults = AliasMap::clone(&self.aliases);
        defaults.extend(source.parametric_converter());
        self.run(&data, rules, overrides, &defaults, aliases)
    }

    fn run(
        &self,
        data: &Map<String, Value>,
        rules: &RuleSet,
        overrides: &MessageOverrides,
        defaults: &AliasMap,
        aliases: &AliasMap,
    ) -> Result<()> {
        for field in rules.iter() {
            let key = field.field();
            let value = data.get(key).unwrap_or(&Value::Null);

            if value.is_null() && field.is_nullable() {
                tracing::debug!(field = key, "skipping null nullable field");
                continue;
            }

            let display = aliases
                .get(key)
                .or_else(|| defaults.get(key))
                .map_or(key, String::as_str);

            self.run_field(field, value, display, overrides)?;
        }
        Ok(())
    }

    fn run_field(
        &self,
        field: &FieldRules,
        value: &Value,
        display: &str,
        overrides: &MessageOverrides,
    ) -> Result<()> {
        let key = field.field();

        for (rule, argument) in field.rules().filter(|(rule, _)| *rule != NULLABLE) {
            tracing::trace!(field = key, rule, "evaluating rule");

            match (rule == CALLBACK, argument) {
                (true, RuleArg::Callback(callback)) => {
                    callback(value, Reject).map_err(|error| match error {
                        Error::Invalid(invalid) => Error::Invalid(invalid.or_locate(key, CALLBACK)),
                        other => other,
                    })?;
                }
                (true, RuleArg::Value(other)) => {
                    return Err(config_error(ConfigError::NotCallable {
                        field: key.to_string(),
                        description: describe(other),
                    }));
                }
                (false, RuleArg::Callback(_)) => {
                    return Err(config_error(ConfigError::UnexpectedCallback {
                        field: key.to_string(),
                        rule: rule.to_string(),
                    }));
                }
                (false, RuleArg::Value(argument)) => {
                    let predicate = self.rules.get(rule).ok_or_else(|| {
                        config_error(ConfigError::UnknownRule {
                            field: key.to_string(),
                            rule: rule.to_string(),
                            registry: std::any::type_name::<RuleRegistry>(),
                        })
                    })?;

                    if !predicate(value, argument) {
                        let message = self.render(key, display, rule, argument, overrides);
                        tracing::debug!(field = key, rule, %message, "validation failed");
                        return Err(InvalidRequest::for_rule(key, rule, message).into());
                    }
                }
            }
        }
        Ok(())
    }

    fn render(
        &self,
        field: &str,
        display: &str,
        rule: &str,
        argument: &Value,
        overrides: &MessageOverrides,
    ) -> String {
        let template = overrides
            .get(field, rule)
            .unwrap_or_else(|| self.messages.template(rule));
        let template = template.replace(":parameter", display);
        self.formatters.format(rule, argument, &template)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn config_error(error: ConfigError) -> Error {
    tracing::warn!(%error, "invalid rule set");
    Error::Config(error)
}

/// Builder for a [`Validator`] with custom rules, messages or aliases.
///
/// Anything not configured falls back to the built-ins.
///
/// ```rust
/// use paramrule::prelude::*;
/// use serde_json::{json, Map};
///
/// let validator = Validator::builder()
///     .rule("vnd_amount", |value, _| value.as_u64().is_some_and(|n| n % 1000 == 0))
///     .message("vnd_amount", "The :parameter parameter must be a multiple of 1000 VND.")
///     .alias("vnp_Amount", "amount")
///     .build();
///
/// let mut data = Map::new();
/// data.insert("vnp_Amount".into(), json!(1500));
/// let rules = RuleSet::new().field(FieldRules::new("vnp_Amount").flag("vnd_amount"));
///
/// let error = validator.check(&data, &rules).unwrap_err();
/// assert_eq!(error.to_string(), "The amount parameter must be a multiple of 1000 VND.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidatorBuilder {
    rules: Option<RuleRegistry>,
    formatters: Option<FormatterRegistry>,
    messages: Option<MessageCatalog>,
    aliases: AliasMap,
}

impl ValidatorBuilder {
    /// A builder starting from the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the predicate registry.
    pub fn rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Replace the formatter registry.
    pub fn formatters(mut self, formatters: FormatterRegistry) -> Self {
        self.formatters = Some(formatters);
        self
    }

    /// Replace the message catalog.
    pub fn messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Register an extra predicate.
    pub fn rule(mut self, name: impl Into<String>, predicate: Predicate) -> Self {
        self.rules
            .get_or_insert_with(|| RuleRegistry::builtin().clone())
            .register(name, predicate);
        self
    }

    /// Register an extra formatter.
    pub fn formatter(mut self, name: impl Into<String>, formatter: Formatter) -> Self {
        self.formatters
            .get_or_insert_with(|| FormatterRegistry::builtin().clone())
            .register(name, formatter);
        self
    }

    /// Set one message template.
    pub fn message(mut self, rule: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages
            .get_or_insert_with(|| MessageCatalog::builtin().clone())
            .set(rule, template);
        self
    }

    /// Set a default display name for a field.
    pub fn alias(mut self, field: impl Into<String>, display: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), display.into());
        self
    }

    /// Add several default display names.
    pub fn aliases(mut self, aliases: HashMap<String, String>) -> Self {
        self.aliases.extend(aliases);
        self
    }

    /// Finish configuration.
    pub fn build(self) -> Validator {
        Validator {
            rules: Arc::new(self.rules.unwrap_or_else(|| RuleRegistry::builtin().clone())),
            formatters: Arc::new(
                self.formatters
                    .unwrap_or_else(|| FormatterRegistry::builtin().clone()),
            ),
            messages: Arc::new(self.messages.unwrap_or_else(|| MessageCatalog::builtin().clone())),
            aliases: Arc::new(self.aliases),
        }
    }
}
