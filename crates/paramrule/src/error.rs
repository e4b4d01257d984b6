//! Error types signalled by the validation engine.
//!
//! Two kinds of failure are kept strictly apart:
//!
//! - [`InvalidRequest`] means the *data* broke a rule. Its message is fully
//!   rendered and meant to be shown to whoever supplied the parameters.
//! - [`ConfigError`] means the *rule set* itself is wrong (unknown rule name,
//!   callback rule without a callable). It is a programming mistake and should
//!   be treated as a bug, not surfaced to end users.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure produced by a validation call.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A value failed a rule, or a callback rejected it.
    #[error(transparent)]
    Invalid(#[from] InvalidRequest),

    /// The rule set could not be evaluated.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Build a validation failure carrying only a message.
    ///
    /// The engine fills in the field and rule when the error leaves a
    /// callback without them.
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Invalid(InvalidRequest::new(message))
    }

    /// Whether this is a data-validation failure.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::Invalid(_))
    }

    /// Whether this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// The rendered message of a validation failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Invalid(invalid) => Some(&invalid.message),
            Error::Config(_) => None,
        }
    }
}

/// A rendered validation failure.
///
/// `Display` yields the bare message so it can be handed to callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidRequest {
    /// Human-readable message with every placeholder substituted
    pub message: String,
    /// The field that failed, when known
    pub field: Option<String>,
    /// The rule that failed, when known
    pub rule: Option<String>,
}

impl InvalidRequest {
    /// Create a failure with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            rule: None,
        }
    }

    /// Create a failure for a specific field and rule.
    pub fn for_rule(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
            rule: Some(rule.into()),
        }
    }

    pub(crate) fn or_locate(mut self, field: &str, rule: &str) -> Self {
        if self.field.is_none() {
            self.field = Some(field.to_string());
        }
        if self.rule.is_none() {
            self.rule = Some(rule.to_string());
        }
        self
    }
}

/// Internal error structure for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
}

/// Wrapper for the error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

/// Serializes to the gateway-facing error format:
///
/// ```json
/// {
///   "error": {
///     "type": "invalid_request",
///     "message": "The amount parameter must be at least 10.",
///     "field": "amount",
///     "rule": "min"
///   }
/// }
/// ```
impl Serialize for InvalidRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let wrapper = ErrorWrapper {
            error: ErrorBody {
                error_type: "invalid_request".to_string(),
                message: self.message.clone(),
                field: self.field.clone(),
                rule: self.rule.clone(),
            },
        };
        wrapper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InvalidRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wrapper = ErrorWrapper::deserialize(deserializer)?;
        Ok(Self {
            message: wrapper.error.message,
            field: wrapper.error.field,
            rule: wrapper.error.rule,
        })
    }
}

/// A rule set that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No predicate is registered under the rule name.
    #[error("no `{rule}` validator registered in {registry} (used by field `{field}`)")]
    UnknownRule {
        field: String,
        rule: String,
        registry: &'static str,
    },

    /// The `callback` rule was given something that cannot be invoked.
    #[error("the `callback` rule of field `{field}` must be a callable, got {description}")]
    NotCallable { field: String, description: String },

    /// A callable was given to a rule that expects a plain argument.
    #[error("the `{rule}` rule of field `{field}` does not accept a callable argument")]
    UnexpectedCallback { field: String, rule: String },
}

/// Marker handed to `callback` rules.
///
/// A callback reports a failed value by returning `Err(reject.with(..))`;
/// it never needs to know how the engine represents failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reject;

impl Reject {
    /// Build the validation failure for `message`.
    pub fn with(self, message: impl Into<String>) -> Error {
        Error::invalid(message)
    }
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid_request")
    }
}
