//! Structural decoding of `simple`-style header values.

use crate::contract::ParamSchema;
use std::fmt;

/// A header value split into the shape its schema asks for, before any
/// type conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Scalar(String),
    Sequence(Vec<String>),
    /// Key/value pairs in the order they were sent
    Mapping(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// A non-exploded object needs `key,value` pairs
    UnpairedObjectTokens(usize),
    /// An exploded object needs `key=value` tokens
    MalformedKeyValue(String),
    /// Arrays of arrays or objects have no `simple` serialization
    NestedContainer,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::UnpairedObjectTokens(count) => write!(
                f,
                "an object must be encoded as 'key,value' pairs, but {} comma separated token(s) were sent",
                count
            ),
            DecodeFailure::MalformedKeyValue(token) => write!(
                f,
                "an exploded object must be encoded as 'key=value' tokens, but '{}' is not one",
                token
            ),
            DecodeFailure::NestedContainer => {
                write!(f, "arrays of arrays or objects cannot be encoded in a header")
            }
        }
    }
}

/// Split a raw header value according to the `simple` style.
///
/// `explode` only changes how objects are encoded; arrays are always a
/// plain comma separated list. Decoding is driven by the schema's shape only,
/// property names are not consulted here.
pub fn decode(raw: &str, schema: &ParamSchema, explode: bool) -> Result<DecodedValue, DecodeFailure> {
    match schema {
        ParamSchema::Array(items) => {
            if items.is_composite() {
                return Err(DecodeFailure::NestedContainer);
            }
            Ok(DecodedValue::Sequence(
                raw.split(',').map(str::to_string).collect(),
            ))
        }
        ParamSchema::Object(_) if explode => decode_exploded_object(raw),
        ParamSchema::Object(_) => decode_object(raw),
        ParamSchema::Any
        | ParamSchema::String
        | ParamSchema::Number
        | ParamSchema::Integer
        | ParamSchema::Boolean => Ok(DecodedValue::Scalar(raw.to_string())),
    }
}

/// `milk,123,sugar,true`
fn decode_object(raw: &str) -> Result<DecodedValue, DecodeFailure> {
    let tokens: Vec<&str> = raw.split(',').collect();
    if tokens.len() % 2 != 0 {
        return Err(DecodeFailure::UnpairedObjectTokens(tokens.len()));
    }

    Ok(DecodedValue::Mapping(
        tokens
            .chunks(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect(),
    ))
}

/// `milk=123,sugar=true`
fn decode_exploded_object(raw: &str) -> Result<DecodedValue, DecodeFailure> {
    raw.split(',')
        .map(|token| match token.split_once('=') {
            Some((key, value)) if !value.contains('=') => {
                Ok((key.to_string(), value.to_string()))
            }
            _ => Err(DecodeFailure::MalformedKeyValue(token.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(DecodedValue::Mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ObjectShape;

    fn object() -> ParamSchema {
        ParamSchema::Object(ObjectShape::default())
    }

    fn pairs(items: &[(&str, &str)]) -> DecodedValue {
        DecodedValue::Mapping(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_scalar_passes_through() {
        let decoded = decode("two", &ParamSchema::Number, false).unwrap();
        assert_eq!(decoded, DecodedValue::Scalar("two".to_string()));

        let decoded = decode("a,b", &ParamSchema::String, true).unwrap();
        assert_eq!(decoded, DecodedValue::Scalar("a,b".to_string()));
    }

    #[test]
    fn test_array_ignores_explode() {
        let schema = ParamSchema::Array(Box::new(ParamSchema::Number));
        let expected = DecodedValue::Sequence(vec!["1".into(), "2".into(), "3".into()]);

        assert_eq!(decode("1,2,3", &schema, false).unwrap(), expected);
        assert_eq!(decode("1,2,3", &schema, true).unwrap(), expected);
    }

    #[test]
    fn test_empty_array_value_is_one_empty_element() {
        let schema = ParamSchema::Array(Box::new(ParamSchema::String));
        assert_eq!(
            decode("", &schema, false).unwrap(),
            DecodedValue::Sequence(vec![String::new()])
        );
    }

    #[test]
    fn test_nested_array_cannot_be_decoded() {
        let schema = ParamSchema::Array(Box::new(object()));
        assert_eq!(decode("a,b", &schema, false), Err(DecodeFailure::NestedContainer));
    }

    #[test]
    fn test_object_pairs() {
        assert_eq!(
            decode("milk,123,sugar,true", &object(), false).unwrap(),
            pairs(&[("milk", "123"), ("sugar", "true")])
        );
    }

    #[test]
    fn test_object_odd_token_count() {
        assert_eq!(
            decode("I am not an object", &object(), false),
            Err(DecodeFailure::UnpairedObjectTokens(1))
        );
        assert_eq!(
            decode("milk,1,sugar", &object(), false),
            Err(DecodeFailure::UnpairedObjectTokens(3))
        );
    }

    #[test]
    fn test_exploded_object() {
        assert_eq!(
            decode("milk=123,sugar=true", &object(), true).unwrap(),
            pairs(&[("milk", "123"), ("sugar", "true")])
        );
        assert_eq!(decode("milk=", &object(), true).unwrap(), pairs(&[("milk", "")]));
    }

    #[test]
    fn test_exploded_object_malformed_tokens() {
        assert_eq!(
            decode("milk=123,sugar", &object(), true),
            Err(DecodeFailure::MalformedKeyValue("sugar".to_string()))
        );
        assert_eq!(
            decode("milk=1=2", &object(), true),
            Err(DecodeFailure::MalformedKeyValue("milk=1=2".to_string()))
        );
    }
}
