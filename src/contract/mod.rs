mod params;
mod router;
mod schema;

pub use params::ParameterSpec;
pub use schema::{ObjectShape, ParamSchema};

use crate::error::Result;
use crate::loader;
use oas3::OpenApiV3Spec;
use oas3::spec::{Operation, PathItem};
use router::{PathRouter, PathTemplate};
use serde_json::Value;
use std::path::Path;

const METHODS: [&str; 8] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "HEAD", "TRACE",
];

/// One parsed OpenAPI document, bound for request validation.
///
/// The model is read-only once built and can be shared between threads.
#[derive(Debug, Clone)]
pub struct ContractModel {
    spec: OpenApiV3Spec,
    /// JSON rendering of `spec`, used to follow `$ref` pointers
    document: Value,
    router: PathRouter,
}

impl ContractModel {
    pub fn new(spec: OpenApiV3Spec) -> Result<Self> {
        let document = serde_json::to_value(&spec)?;

        let templates = spec
            .paths
            .iter()
            .flat_map(|paths| paths.keys())
            .map(|template| PathTemplate::compile(template))
            .collect::<Result<Vec<_>>>()?;

        let base_paths = document
            .get("servers")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|server| server.get("url").and_then(Value::as_str))
            .filter_map(router::server_base_path)
            .collect();

        Ok(Self {
            spec,
            document,
            router: PathRouter::new(templates, base_paths),
        })
    }

    /// Load and bind an OpenAPI document from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(loader::load_openapi(path)?)
    }

    /// Parse and bind an OpenAPI document held in memory
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::new(loader::parse_openapi(content)?)
    }

    pub fn spec(&self) -> &OpenApiV3Spec {
        &self.spec
    }

    /// Resolve a concrete request path and method to the declared operation.
    ///
    /// Returns `None` when no path template matches. A matching path item
    /// without an operation for `method` resolves with its path-level
    /// parameters only.
    pub fn resolve(&self, method: &str, path: &str) -> Option<ResolvedOperation> {
        let template = self.router.find(path)?;
        let path_item = self.path_item(template)?;
        let method = method.to_uppercase();
        let operation = operation_for(path_item, &method);

        Some(ResolvedOperation {
            template: template.to_string(),
            operation_id: operation.and_then(|op| op.operation_id.clone()),
            parameters: params::collect_parameters(path_item, operation, &self.document),
            method,
        })
    }

    /// Every declared operation, in path order
    pub fn operations(&self) -> Vec<ResolvedOperation> {
        let mut operations = vec![];

        for (template, path_item) in self.spec.paths.iter().flatten() {
            for method in METHODS {
                if let Some(op) = operation_for(path_item, method) {
                    operations.push(ResolvedOperation {
                        template: template.clone(),
                        method: method.to_string(),
                        operation_id: op.operation_id.clone(),
                        parameters: params::collect_parameters(path_item, Some(op), &self.document),
                    });
                }
            }
        }

        operations
    }

    fn path_item(&self, template: &str) -> Option<&PathItem> {
        self.spec.paths.as_ref()?.get(template)
    }
}

fn operation_for<'a>(path_item: &'a PathItem, method: &str) -> Option<&'a Operation> {
    let op_option = match method {
        "GET" => &path_item.get,
        "POST" => &path_item.post,
        "PUT" => &path_item.put,
        "DELETE" => &path_item.delete,
        "PATCH" => &path_item.patch,
        "OPTIONS" => &path_item.options,
        "HEAD" => &path_item.head,
        "TRACE" => &path_item.trace,
        _ => &None,
    };
    op_option.as_ref()
}

/// An operation matched for a request, with its effective parameters
#[derive(Debug, Clone)]
pub struct ResolvedOperation {
    pub template: String,
    pub method: String,
    pub operation_id: Option<String>,
    pub parameters: Vec<ParameterSpec>,
}

impl ResolvedOperation {
    pub fn header_parameters(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(|p| p.is_header())
    }
}
