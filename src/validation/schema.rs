use super::coerce::TypedValue;
use super::result::SchemaValidationFailure;
use jsonschema::Draft;
use jsonschema::error::{TypeKind, ValidationErrorKind};
use serde_json::Value;

/// Checks a typed value against a schema and explains every violation.
pub trait SchemaConformance {
    fn check(&self, value: &TypedValue, schema: &Value) -> Vec<SchemaValidationFailure>;
}

/// Conformance engine backed by the `jsonschema` crate.
///
/// Covers everything the schema states: types, `enum`, bounds, `pattern`,
/// `format`, array and object keywords. Parsed OpenAPI schemas use the 3.1
/// vocabulary, which is JSON Schema draft 2020-12.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaEngine;

impl SchemaConformance for JsonSchemaEngine {
    fn check(&self, value: &TypedValue, schema: &Value) -> Vec<SchemaValidationFailure> {
        let validator = match jsonschema::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true)
            .build(schema)
        {
            Ok(validator) => validator,
            Err(e) => {
                tracing::warn!(error = %e, "Parameter schema does not compile, skipping conformance check");
                return vec![];
            }
        };

        let instance = Value::from(value);
        validator
            .iter_errors(&instance)
            .map(|error| {
                let reason = match &error.kind {
                    ValidationErrorKind::Type {
                        kind: TypeKind::Single(expected),
                    } => format!(
                        "expected {}, but got {}",
                        expected,
                        json_type_name(&error.instance)
                    ),
                    _ => error.to_string(),
                };
                SchemaValidationFailure::new(reason, error.instance_path.to_string())
            })
            .collect()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
