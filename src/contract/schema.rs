use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Guards against `$ref` cycles such as a schema that refers to itself.
const MAX_REF_DEPTH: usize = 32;

/// Schema of a parameter value, reduced to the shapes a serialized
/// parameter can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSchema {
    /// No usable `type`; values pass through as strings
    Any,
    String,
    Number,
    Integer,
    Boolean,
    Array(Box<ParamSchema>),
    Object(ObjectShape),
}

/// Declared properties of an object value; the rest of the object's
/// constraints are left to the conformance engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    pub properties: IndexMap<String, ParamSchema>,
}

impl ParamSchema {
    /// Build a schema from its JSON form, resolving local `$ref`s against `document`.
    pub fn from_json(value: &Value, document: &Value) -> Self {
        build(value, document, 0)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParamSchema::Any => "any",
            ParamSchema::String => "string",
            ParamSchema::Number => "number",
            ParamSchema::Integer => "integer",
            ParamSchema::Boolean => "boolean",
            ParamSchema::Array(_) => "array",
            ParamSchema::Object(_) => "object",
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ParamSchema::Array(_) | ParamSchema::Object(_))
    }
}

/// Copy of `schema` with every local `$ref` replaced by its target, so the
/// result can be compiled on its own.
///
/// Unresolvable and overly deep references become the empty schema.
pub(crate) fn inline_refs(schema: &Value, document: &Value) -> Value {
    inline(schema, document, 0)
}

fn inline(value: &Value, document: &Value, depth: usize) -> Value {
    match value {
        Value::Object(obj) => {
            if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
                if depth >= MAX_REF_DEPTH {
                    tracing::warn!(reference, "Schema reference depth exceeded");
                    return Value::Object(Map::new());
                }
                return match resolve_pointer(document, reference) {
                    Some(target) => inline(target, document, depth + 1),
                    None => {
                        tracing::warn!(reference, "Unresolvable schema reference");
                        Value::Object(Map::new())
                    }
                };
            }
            Value::Object(
                obj.iter()
                    .map(|(key, v)| (key.clone(), inline(v, document, depth)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(
            items.iter().map(|v| inline(v, document, depth)).collect(),
        ),
        other => other.clone(),
    }
}

/// Look up a local reference (`#/components/...`) inside the document.
pub(crate) fn resolve_pointer<'a>(document: &'a Value, reference: &str) -> Option<&'a Value> {
    let pointer = reference.strip_prefix('#')?;
    document.pointer(pointer)
}

fn build(value: &Value, document: &Value, depth: usize) -> ParamSchema {
    if depth > MAX_REF_DEPTH {
        tracing::warn!("Schema reference depth exceeded, treating schema as untyped");
        return ParamSchema::Any;
    }

    // Boolean schemas (`true` / `false`) carry no shape.
    let Some(obj) = value.as_object() else {
        return ParamSchema::Any;
    };

    if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        return match resolve_pointer(document, reference) {
            Some(target) => build(target, document, depth + 1),
            None => {
                tracing::warn!(reference, "Unresolvable schema reference");
                ParamSchema::Any
            }
        };
    }

    match declared_type(obj) {
        Some("string") => ParamSchema::String,
        Some("number") => ParamSchema::Number,
        Some("integer") => ParamSchema::Integer,
        Some("boolean") => ParamSchema::Boolean,
        Some("array") => build_array(obj, document, depth),
        Some("object") => ParamSchema::Object(build_object(obj, document, depth)),
        None if obj.contains_key("properties") => {
            ParamSchema::Object(build_object(obj, document, depth))
        }
        None if obj.contains_key("items") => build_array(obj, document, depth),
        _ => ParamSchema::Any,
    }
}

/// OpenAPI 3.1 allows `type: [string, "null"]`; the first non-null entry wins.
fn declared_type(obj: &Map<String, Value>) -> Option<&str> {
    match obj.get("type")? {
        Value::String(t) => Some(t.as_str()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null"),
        _ => None,
    }
}

fn build_array(obj: &Map<String, Value>, document: &Value, depth: usize) -> ParamSchema {
    let items = obj
        .get("items")
        .map(|items| build(items, document, depth + 1))
        .unwrap_or(ParamSchema::Any);
    ParamSchema::Array(Box::new(items))
}

fn build_object(obj: &Map<String, Value>, document: &Value, depth: usize) -> ObjectShape {
    let properties = obj
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, schema)| (name.clone(), build(schema, document, depth + 1)))
                .collect()
        })
        .unwrap_or_default();

    ObjectShape { properties }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_kinds() {
        let doc = json!({});
        assert_eq!(ParamSchema::from_json(&json!({"type": "string"}), &doc), ParamSchema::String);
        assert_eq!(ParamSchema::from_json(&json!({"type": "number"}), &doc), ParamSchema::Number);
        assert_eq!(ParamSchema::from_json(&json!({"type": "integer"}), &doc), ParamSchema::Integer);
        assert_eq!(ParamSchema::from_json(&json!({"type": "boolean"}), &doc), ParamSchema::Boolean);
        assert_eq!(ParamSchema::from_json(&json!({}), &doc), ParamSchema::Any);
        assert_eq!(ParamSchema::from_json(&json!(true), &doc), ParamSchema::Any);
    }

    #[test]
    fn test_nullable_type_list() {
        let doc = json!({});
        let schema = ParamSchema::from_json(&json!({"type": ["null", "number"]}), &doc);
        assert_eq!(schema, ParamSchema::Number);
    }

    #[test]
    fn test_object_with_properties() {
        let doc = json!({});
        let schema = ParamSchema::from_json(
            &json!({
                "type": "object",
                "required": ["milk"],
                "additionalProperties": false,
                "properties": {
                    "milk": {"type": "number"},
                    "sugar": {"type": "boolean"}
                }
            }),
            &doc,
        );

        let ParamSchema::Object(shape) = schema else {
            panic!("expected object schema");
        };
        assert_eq!(shape.properties.get("milk"), Some(&ParamSchema::Number));
        assert_eq!(shape.properties.get("sugar"), Some(&ParamSchema::Boolean));
    }

    #[test]
    fn test_array_items_and_inferred_shapes() {
        let doc = json!({});
        let schema = ParamSchema::from_json(&json!({"items": {"type": "boolean"}}), &doc);
        assert_eq!(schema, ParamSchema::Array(Box::new(ParamSchema::Boolean)));

        let schema = ParamSchema::from_json(&json!({"type": "array"}), &doc);
        assert_eq!(schema, ParamSchema::Array(Box::new(ParamSchema::Any)));

        let schema = ParamSchema::from_json(&json!({"properties": {}}), &doc);
        assert!(matches!(schema, ParamSchema::Object(_)));
    }

    #[test]
    fn test_local_reference() {
        let doc = json!({
            "components": {
                "schemas": {
                    "Cups": {"type": "array", "items": {"$ref": "#/components/schemas/Cup"}},
                    "Cup": {"type": "integer"}
                }
            }
        });
        let schema = ParamSchema::from_json(&json!({"$ref": "#/components/schemas/Cups"}), &doc);
        assert_eq!(schema, ParamSchema::Array(Box::new(ParamSchema::Integer)));
    }

    #[test]
    fn test_cyclic_and_missing_references() {
        let doc = json!({
            "components": {"schemas": {"Loop": {"$ref": "#/components/schemas/Loop"}}}
        });
        let schema = ParamSchema::from_json(&json!({"$ref": "#/components/schemas/Loop"}), &doc);
        assert_eq!(schema, ParamSchema::Any);

        let schema = ParamSchema::from_json(&json!({"$ref": "#/components/schemas/Nope"}), &doc);
        assert_eq!(schema, ParamSchema::Any);
    }

    #[test]
    fn test_inline_refs() {
        let doc = json!({
            "components": {
                "schemas": {
                    "Cup": {"type": "integer", "minimum": 1},
                    "Loop": {"$ref": "#/components/schemas/Loop"}
                }
            }
        });
        let schema = json!({
            "type": "array",
            "maxItems": 3,
            "items": {"$ref": "#/components/schemas/Cup"}
        });

        assert_eq!(
            inline_refs(&schema, &doc),
            json!({
                "type": "array",
                "maxItems": 3,
                "items": {"type": "integer", "minimum": 1}
            })
        );
        assert_eq!(
            inline_refs(&json!({"$ref": "#/components/schemas/Loop"}), &doc),
            json!({})
        );
        assert_eq!(
            inline_refs(&json!({"$ref": "#/components/schemas/Nope"}), &doc),
            json!({})
        );
    }
}
