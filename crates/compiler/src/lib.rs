//! Compiles JSON Schema documents into specialized validation procedures.
//!
//! - Supports drafts 4, 6, 7, 2019-09 and 2020-12, detected from `$schema` or set explicitly.
//! - Resolves `$ref`/`$dynamicRef` across a registry of schema resources, including ones
//!   supplied at compile time via [`ValidationOptions::with_resource`].
//! - Produces a [`Validator`] that is a pure function of `(schema, options, instance)`: no
//!   interpretation of the schema happens during validation.
//! - Custom keywords and format validators can be plugged in without forking the crate.
//!
//! # Validation
//!
//! For a one-off check, use [`is_valid`]:
//!
//! ```rust
//! use serde_json::json;
//!
//! let schema = json!({"type": "string"});
//! let instance = json!("Hello, world!");
//!
//! assert!(schema_compiler::is_valid(&schema, &instance));
//! ```
//!
//! When the same schema is used to validate many instances, compile it once with
//! [`validator_for`] and reuse the result:
//!
//! ```rust
//! use serde_json::json;
//!
//! let schema = json!({"type": "string"});
//! let validator = schema_compiler::validator_for(&schema)
//!     .expect("Invalid schema");
//!
//! assert!(validator.is_valid(&json!("Hello, world!")));
//! assert!(!validator.is_valid(&json!(42)));
//!
//! // Iterate over every error produced by the top-level schema.
//! let instance = json!(42);
//! if let Err(errors) = validator.validate(&instance) {
//!     for error in errors {
//!         eprintln!("Error: {error}");
//!         eprintln!("Location: {}", error.instance_path);
//!     }
//! }
//! ```
//!
//! # Configuration
//!
//! [`options`] returns a builder for [`ValidationOptions`]. Use it to pin the draft, register
//! remote resources, or swap in custom formats and keywords instead of relying on
//! auto-detection from `$schema`:
//!
//! ```rust
//! use schema_compiler::Draft;
//! use serde_json::json;
//!
//! let schema = json!({"type": "string"});
//! let validator = schema_compiler::options()
//!     .with_draft(Draft::Draft7)
//!     .build(&schema)
//!     .expect("Invalid schema");
//! ```
//!
//! See [`ValidationOptions`] for the full set of knobs.
//!
//! # Reference Resolution
//!
//! `$ref` and `$dynamicRef` are resolved entirely at compile time against an in-memory
//! registry: the schema being compiled, any resources pre-registered with
//! [`ValidationOptions::with_resource`]/[`with_resources`][ValidationOptions::with_resources],
//! and, when supplied, a custom [`Retrieve`] implementation for fetching resources that are not
//! known upfront (a remote schema store, the local filesystem, etc.). Resolution never happens
//! during validation.
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use schema_compiler::Resource;
//! use serde_json::json;
//!
//! let extra = Resource::from_contents(json!({"type": "integer"}))?;
//!
//! let validator = schema_compiler::options()
//!     .with_resource("urn:example:int", extra)
//!     .build(&json!({"$ref": "urn:example:int"}))?;
//!
//! assert!(validator.is_valid(&json!(42)));
//! assert!(!validator.is_valid(&json!("42")));
//! # Ok(())
//! # }
//! ```
//!
//! # Output Styles
//!
//! The `basic` output format from JSON Schema draft 2019-09 is available via [`Validator::apply`]:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use schema_compiler::BasicOutput;
//! use serde_json::json;
//!
//! let schema = json!({"title": "string value", "type": "string"});
//! let instance = json!("some string");
//! let validator = schema_compiler::validator_for(&schema)?;
//!
//! let output: BasicOutput = validator.apply(&instance).basic();
//! let output_json = serde_json::to_value(output)?;
//!
//! assert_eq!(
//!     output_json,
//!     json!({
//!         "valid": true,
//!         "annotations": [
//!             {
//!                 "keywordLocation": "",
//!                 "instanceLocation": "",
//!                 "annotations": {"title": "string value"}
//!             }
//!         ]
//!     })
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Keywords
//!
//! Implement [`Keyword`] and register a factory with [`ValidationOptions::with_keyword`] to
//! extend validation beyond the standard vocabulary:
//!
//! ```rust
//! use schema_compiler::{
//!     paths::{JsonPointer, JsonPointerNode},
//!     ErrorIterator, Keyword, ValidationError,
//! };
//! use serde_json::{json, Map, Value};
//! use std::iter::once;
//!
//! struct EvenNumberValidator;
//!
//! impl Keyword for EvenNumberValidator {
//!     fn validate<'instance>(
//!         &self,
//!         instance: &'instance Value,
//!         instance_path: &JsonPointerNode,
//!     ) -> ErrorIterator<'instance> {
//!         if let Value::Number(n) = instance {
//!             if n.as_u64().map_or(false, |n| n % 2 == 0) {
//!                 return Box::new(None.into_iter());
//!             }
//!         }
//!         let error = ValidationError::custom(
//!             JsonPointer::default(),
//!             instance_path.into(),
//!             instance,
//!             "Number must be even",
//!         );
//!         Box::new(once(error))
//!     }
//!
//!     fn is_valid(&self, instance: &Value) -> bool {
//!         instance.as_u64().map_or(false, |n| n % 2 == 0)
//!     }
//! }
//!
//! fn even_number_validator_factory<'a>(
//!     _parent: &'a Map<String, Value>,
//!     value: &'a Value,
//!     _path: JsonPointer,
//! ) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
//!     if value.as_bool() == Some(true) {
//!         Ok(Box::new(EvenNumberValidator))
//!     } else {
//!         Err(ValidationError::custom(
//!             JsonPointer::default(),
//!             JsonPointer::default(),
//!             value,
//!             "The 'even-number' keyword must be set to true",
//!         ))
//!     }
//! }
//!
//! let schema = json!({"even-number": true, "type": "integer"});
//! let validator = schema_compiler::options()
//!     .with_keyword("even-number", even_number_validator_factory)
//!     .build(&schema)
//!     .expect("Invalid schema");
//!
//! assert!(validator.is_valid(&json!(2)));
//! assert!(!validator.is_valid(&json!(3)));
//! assert!(!validator.is_valid(&json!("not a number")));
//! ```
//!
//! # Custom Formats
//!
//! Register a `fn(&str) -> bool` (or a closure) with [`ValidationOptions::with_format`] for a
//! domain-specific `format` name:
//!
//! ```rust
//! use serde_json::json;
//!
//! fn ends_with_42(s: &str) -> bool {
//!     s.ends_with("42!")
//! }
//!
//! # fn main() {
//! let schema = json!({"type": "string", "format": "ends-with-42"});
//! let validator = schema_compiler::options()
//!     .with_format("ends-with-42", ends_with_42)
//!     .build(&schema)
//!     .expect("Invalid schema");
//!
//! assert!(validator.is_valid(&json!("Hello42!")));
//! assert!(!validator.is_valid(&json!("Hello43!")));
//! assert!(!validator.is_valid(&json!(42)));
//! # }
//! ```
//!
//! Custom format validators only run against string instances, and only when format assertion
//! is enabled for the active draft (see [`ValidationOptions::should_validate_formats`]).
mod compiler;
mod content_encoding;
mod content_media_type;
mod ecma;
pub mod error;
mod keywords;
mod node;
pub mod output;
pub mod paths;
pub mod primitive_type;
pub(crate) mod properties;
mod retriever;
mod validator;

mod options;

pub use error::{ErrorIterator, ValidationError};
pub use keywords::custom::Keyword;
pub use options::{Coerce, CoerceTypes, ValidationOptions};
pub use output::BasicOutput;
#[allow(deprecated)]
pub use retriever::{SchemaResolver, SchemaResolverError};
pub use validator::Validator;

pub use referencing::{Draft, Resource, Retrieve};

use serde_json::Value;

/// Create a default [`ValidationOptions`] for configuring JSON Schema validation.
///
/// Shortcut for [`ValidationOptions::default`].
#[must_use]
pub fn options() -> ValidationOptions {
    Validator::options()
}

/// Compile `schema` into a reusable [`Validator`] using default options.
///
/// The draft is auto-detected from `$schema`, falling back to the latest supported draft.
///
/// # Errors
///
/// Returns [`ValidationError`] if `schema` is not a valid JSON Schema document (for example, an
/// invalid `pattern` regex, or a `$ref` that cannot be parsed as a URI reference).
pub fn validator_for(schema: &Value) -> Result<Validator, ValidationError<'static>> {
    Validator::new(schema)
}

/// Validate `instance` against `schema` in one step. Equivalent to
/// `validator_for(schema).expect("Invalid schema").is_valid(instance)`.
///
/// # Panics
///
/// Panics if `schema` is not a valid JSON Schema document. Use [`validator_for`] if the schema
/// is not known to be valid ahead of time.
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let validator = validator_for(schema).expect("Invalid schema");
    validator.is_valid(instance)
}

#[cfg(test)]
pub(crate) mod tests_util {
    use super::Validator;
    use crate::ValidationError;
    use serde_json::Value;

    pub(crate) fn is_not_valid_with(validator: &Validator, instance: &Value) {
        assert!(
            !validator.is_valid(instance),
            "{instance} should not be valid (via is_valid)"
        );
        assert!(
            validator.validate(instance).is_err(),
            "{instance} should not be valid (via validate)"
        );
        assert!(
            !validator.apply(instance).basic().is_valid(),
            "{instance} should not be valid (via apply)"
        );
    }

    pub(crate) fn is_not_valid(schema: &Value, instance: &Value) {
        let validator = Validator::new(schema).unwrap();
        is_not_valid_with(&validator, instance)
    }

    pub(crate) fn is_not_valid_with_draft(
        draft: crate::Draft,
        schema: &Value,
        instance: &Value,
    ) {
        let validator = Validator::options()
            .with_draft(draft)
            .build(schema)
            .unwrap();
        is_not_valid_with(&validator, instance)
    }

    pub(crate) fn expect_errors(schema: &Value, instance: &Value, errors: &[&str]) {
        assert_eq!(
            Validator::new(schema)
                .expect("Should be a valid schema")
                .validate(instance)
                .expect_err(&format!("{instance} should not be valid"))
                .map(|e| e.to_string())
                .collect::<Vec<String>>(),
            errors
        )
    }

    pub(crate) fn is_valid_with(validator: &Validator, instance: &Value) {
        if let Err(mut errors) = validator.validate(instance) {
            let first = errors.next().expect("Errors iterator is empty");
            panic!(
                "{instance} should be valid (via validate). Error: {first} at {}",
                first.instance_path
            );
        }
        assert!(
            validator.is_valid(instance),
            "{instance} should be valid (via is_valid)"
        );
        assert!(
            validator.apply(instance).basic().is_valid(),
            "{instance} should be valid (via apply)"
        );
    }

    pub(crate) fn is_valid(schema: &Value, instance: &Value) {
        let validator = Validator::new(schema).unwrap();
        is_valid_with(&validator, instance);
    }

    pub(crate) fn is_valid_with_draft(draft: crate::Draft, schema: &Value, instance: &Value) {
        let validator = Validator::options()
            .with_draft(draft)
            .build(schema)
            .unwrap();
        is_valid_with(&validator, instance)
    }

    pub(crate) fn validate(schema: &Value, instance: &Value) -> ValidationError<'static> {
        let validator = Validator::new(schema).unwrap();
        validator
            .validate(instance)
            .expect_err("Should be an error")
            .next()
            .expect("Should be an error")
            .into_owned()
    }

    pub(crate) fn assert_schema_path(schema: &Value, instance: &Value, expected: &str) {
        let error = validate(schema, instance);
        assert_eq!(error.schema_path.to_string(), expected)
    }

    pub(crate) fn assert_schema_paths(schema: &Value, instance: &Value, expected: &[&str]) {
        let validator = Validator::new(schema).unwrap();
        let errors = validator.validate(instance).expect_err("Should be an error");
        for (error, schema_path) in errors.zip(expected) {
            assert_eq!(error.schema_path.to_string(), *schema_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid, Draft, Validator};
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_is_valid() {
        let schema = json!({"minLength": 5});
        let valid = json!("foobar");
        let invalid = json!("foo");
        assert!(is_valid(&schema, &valid));
        assert!(!is_valid(&schema, &invalid));
    }

    #[test_case(Draft::Draft4)]
    #[test_case(Draft::Draft6)]
    #[test_case(Draft::Draft7)]
    fn meta_schemas(draft: Draft) {
        for schema in [json!({"enum": [0, 0.0]}), json!({"enum": []})] {
            assert!(Validator::options()
                .with_draft(draft)
                .build(&schema)
                .is_ok())
        }
    }

    #[test]
    fn incomplete_escape_in_pattern() {
        let schema = json!({"pattern": "\\u"});
        assert!(Validator::new(&schema).is_err())
    }
}
