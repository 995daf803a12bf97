//! Conversion of decoded string tokens into typed values.

use super::decode::DecodedValue;
use crate::contract::{ObjectShape, ParamSchema};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// A header value after type conversion
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Array(Vec<TypedValue>),
    Object(IndexMap<String, TypedValue>),
}

/// Whole numbers in this range are rendered as JSON integers.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<&TypedValue> for Value {
    fn from(value: &TypedValue) -> Self {
        match value {
            TypedValue::String(s) => Value::String(s.clone()),
            TypedValue::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                Value::from(*n as i64)
            }
            TypedValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            TypedValue::Boolean(b) => Value::Bool(*b),
            TypedValue::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            TypedValue::Object(props) => Value::Object(
                props
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A token that does not parse as its declared primitive kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionFailure {
    pub kind: &'static str,
    pub token: String,
    /// Position inside an array value
    pub index: Option<usize>,
}

impl fmt::Display for CoercionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "the array item at index {} ('{}') is not a valid {}",
                index, self.token, self.kind
            ),
            None => write!(f, "'{}' is not a valid {}", self.token, self.kind),
        }
    }
}

/// Convert one token to the primitive kind declared by `schema`.
///
/// Containers and untyped schemas keep the token as a string.
pub fn coerce_token(token: &str, schema: &ParamSchema) -> Result<TypedValue, CoercionFailure> {
    let failure = |kind| CoercionFailure {
        kind,
        token: token.to_string(),
        index: None,
    };

    match schema {
        ParamSchema::Number => parse_number(token)
            .map(TypedValue::Number)
            .ok_or_else(|| failure("number")),
        ParamSchema::Integer => token
            .parse::<i64>()
            .map(|n| TypedValue::Number(n as f64))
            .map_err(|_| failure("integer")),
        ParamSchema::Boolean => match token {
            "true" => Ok(TypedValue::Boolean(true)),
            "false" => Ok(TypedValue::Boolean(false)),
            _ => Err(failure("boolean")),
        },
        ParamSchema::Any
        | ParamSchema::String
        | ParamSchema::Array(_)
        | ParamSchema::Object(_) => Ok(TypedValue::String(token.to_string())),
    }
}

/// Type a token by its own literal form: `true`/`false`, a number, or a string.
pub fn infer_token(token: &str) -> TypedValue {
    match token {
        "true" => TypedValue::Boolean(true),
        "false" => TypedValue::Boolean(false),
        _ => parse_number(token)
            .map(TypedValue::Number)
            .unwrap_or_else(|| TypedValue::String(token.to_string())),
    }
}

/// Base-10 real numbers only; `inf` and `NaN` are rejected.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Convert a decoded value against its schema.
///
/// A scalar fails as a whole. An array reports every element that fails,
/// in order. Object properties never fail here: a value that does not
/// convert to its declared kind keeps its literal type so that the schema
/// check can report the mismatch against the whole object.
pub fn coerce(
    decoded: &DecodedValue,
    schema: &ParamSchema,
) -> Result<TypedValue, Vec<CoercionFailure>> {
    match (decoded, schema) {
        (DecodedValue::Scalar(token), _) => coerce_token(token, schema).map_err(|f| vec![f]),
        (DecodedValue::Sequence(tokens), ParamSchema::Array(items)) => {
            coerce_sequence(tokens, items)
        }
        (DecodedValue::Sequence(tokens), _) => Ok(TypedValue::Array(
            tokens.iter().map(|t| infer_token(t)).collect(),
        )),
        (DecodedValue::Mapping(pairs), ParamSchema::Object(shape)) => {
            Ok(coerce_mapping(pairs, Some(shape)))
        }
        (DecodedValue::Mapping(pairs), _) => Ok(coerce_mapping(pairs, None)),
    }
}

fn coerce_sequence(
    tokens: &[String],
    items: &ParamSchema,
) -> Result<TypedValue, Vec<CoercionFailure>> {
    let mut values = Vec::with_capacity(tokens.len());
    let mut failures = vec![];

    for (index, token) in tokens.iter().enumerate() {
        match coerce_token(token, items) {
            Ok(value) => values.push(value),
            Err(failure) => failures.push(CoercionFailure {
                index: Some(index),
                ..failure
            }),
        }
    }

    if failures.is_empty() {
        Ok(TypedValue::Array(values))
    } else {
        Err(failures)
    }
}

fn coerce_mapping(pairs: &[(String, String)], shape: Option<&ObjectShape>) -> TypedValue {
    let props = pairs
        .iter()
        .map(|(key, token)| {
            let declared = shape.and_then(|s| s.properties.get(key));
            let value = match declared {
                Some(schema) => coerce_token(token, schema).unwrap_or_else(|_| infer_token(token)),
                None => infer_token(token),
            };
            (key.clone(), value)
        })
        .collect();

    TypedValue::Object(props)
}
