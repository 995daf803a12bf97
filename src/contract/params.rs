use super::schema::{ParamSchema, inline_refs, resolve_pointer};
use oas3::spec::{ObjectOrReference, Operation, Parameter, PathItem};
use serde_json::Value;

/// A declared parameter of one operation
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    /// `path`, `query`, `header` or `cookie`
    pub location: String,
    pub required: bool,
    /// Shape used to decode and convert the raw value
    pub schema: ParamSchema,
    /// Declared schema with local references inlined, for conformance checks
    pub schema_json: Value,
    pub style: String,
    pub explode: bool,
}

impl ParameterSpec {
    pub fn is_header(&self) -> bool {
        self.location == "header"
    }

    /// Case-insensitive name comparison, as used for header parameters.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether `other` declares the same parameter. Header names ignore case.
    fn same_parameter(&self, other: &ParameterSpec) -> bool {
        self.location == other.location
            && if self.is_header() {
                self.matches_name(&other.name)
            } else {
                self.name == other.name
            }
    }

    fn from_oas(param: &Parameter, document: &Value) -> Self {
        let location = format!("{:?}", param.location).to_lowercase();

        let style = param
            .style
            .as_ref()
            .map(|s| format!("{:?}", s).to_lowercase())
            .unwrap_or_else(|| default_style(&location).to_string());

        // Only the `form` style explodes by default.
        let explode = param.explode.unwrap_or(style == "form");

        let schema_json = param
            .schema
            .as_ref()
            .and_then(|schema| serde_json::to_value(schema).ok())
            .map(|schema| inline_refs(&schema, document))
            .unwrap_or_else(|| Value::Object(Default::default()));

        Self {
            name: param.name.clone(),
            location,
            required: param.required.unwrap_or(false),
            schema: ParamSchema::from_json(&schema_json, document),
            schema_json,
            style,
            explode,
        }
    }
}

fn default_style(location: &str) -> &'static str {
    match location {
        "query" | "cookie" => "form",
        _ => "simple",
    }
}

/// Collect the parameters that apply to an operation.
///
/// Path-level parameters come first; an operation-level parameter with the
/// same name and location replaces its path-level counterpart. Header names
/// are compared without regard to case.
pub(crate) fn collect_parameters(
    path_item: &PathItem,
    operation: Option<&Operation>,
    document: &Value,
) -> Vec<ParameterSpec> {
    let mut params: Vec<ParameterSpec> = path_item
        .parameters
        .iter()
        .filter_map(|p| resolve_parameter(p, document))
        .collect();

    if let Some(op) = operation {
        for param in op
            .parameters
            .iter()
            .filter_map(|p| resolve_parameter(p, document))
        {
            match params
                .iter_mut()
                .find(|p| p.same_parameter(&param))
            {
                Some(existing) => *existing = param,
                None => params.push(param),
            }
        }
    }

    params
}

fn resolve_parameter(
    param_ref: &ObjectOrReference<Parameter>,
    document: &Value,
) -> Option<ParameterSpec> {
    match param_ref {
        ObjectOrReference::Object(param) => Some(ParameterSpec::from_oas(param, document)),
        ObjectOrReference::Ref { .. } => {
            let raw = serde_json::to_value(param_ref).ok()?;
            let reference = raw.get("$ref").and_then(Value::as_str)?;

            let Some(target) = resolve_pointer(document, reference) else {
                tracing::warn!(reference, "Unresolvable parameter reference");
                return None;
            };

            match serde_json::from_value::<Parameter>(target.clone()) {
                Ok(param) => Some(ParameterSpec::from_oas(&param, document)),
                Err(e) => {
                    tracing::warn!(reference, error = %e, "Referenced parameter is malformed");
                    None
                }
            }
        }
    }
}
