//! # paramrule
//!
//! Declarative, fail-fast validation of flat request parameters, meant to
//! run before a gateway request ever touches the network.
//!
//! Each field gets an ordered list of named rules. Rules run in the order
//! they were declared and the first failure aborts the whole call with a
//! rendered, human-readable message.
//!
//! ## Example
//!
//! ```rust
//! use paramrule::prelude::*;
//! use serde_json::{json, Map, Value};
//!
//! let mut data = Map::new();
//! data.insert("country".into(), json!("fr"));
//!
//! let rules = RuleSet::new()
//!     .field(FieldRules::new("country").flag("required").rule("in", "us,uk,de"))
//!     .field(FieldRules::new("locale").nullable().rule("in", "vn,en"));
//!
//! let error = Validator::new().check(&data, &rules).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "The country parameter only accept one of the following values: us, uk and de."
//! );
//! ```
//!
//! ## Rules
//!
//! - presence: `isset`, `required`
//! - type and format: `numeric`, `digits`, `integer`, `boolean`, `email`,
//!   `ip`, `ipv4`, `ipv6`, `url`, `regex`
//! - character classes: `alpha`, `alpha_num`, `alpha_dash`, `alpha_space`,
//!   `alpha_num_space`, `alpha_dash_space` and their ASCII-only
//!   `iso_latin_*` counterparts
//! - bounds: `min`, `max`, `min_length`, `max_length`, `between`,
//!   `between_length`
//! - sets: `in`, `equal`
//!
//! Two names are reserved: `nullable` skips a field whose value is absent or
//! `null`, and `callback` runs a closure that decides for itself.
//!
//! ## Errors
//!
//! [`Error::Invalid`] carries a message meant for the caller.
//! [`Error::Config`] means the rule set is broken (unknown rule, callback
//! without a callable) and should be treated as a bug.

mod engine;
mod error;
mod format;
mod messages;
mod rules;
mod ruleset;
pub mod value;

pub use engine::{ParameterSource, Validator, ValidatorBuilder};
pub use error::{ConfigError, Error, InvalidRequest, Reject, Result};
pub use format::{Formatter, FormatterRegistry};
pub use messages::{MessageCatalog, DEFAULT_KEY};
pub use rules::{compile_pattern, Predicate, RuleRegistry};
pub use ruleset::{
    AliasMap, Callback, FieldRules, MessageOverrides, RuleArg, RuleSet, CALLBACK, NULLABLE,
};

/// Prelude module for validation
pub mod prelude {
    pub use crate::engine::{ParameterSource, Validator, ValidatorBuilder};
    pub use crate::error::{ConfigError, Error, InvalidRequest, Reject};
    pub use crate::ruleset::{AliasMap, FieldRules, MessageOverrides, RuleArg, RuleSet};
}
