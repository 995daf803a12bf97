mod coerce;
mod decode;
mod headers;
mod result;
mod schema;
mod validator;

pub use coerce::{CoercionFailure, TypedValue, coerce, coerce_token, infer_token};
pub use decode::{DecodeFailure, DecodedValue, decode};
pub use headers::{DeclaredHeader, HeaderResolution, SentValue, resolve_headers};
pub use result::{SchemaValidationFailure, ValidationError, ValidationResult};
pub use schema::{JsonSchemaEngine, SchemaConformance};
pub use validator::Validator;

use serde::Serialize;

/// Kind of problem found in the request headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorType {
    RouteNotFound,
    MissingRequiredParameter,
    UndeclaredParameter,
    DecodeFailure,
    PrimitiveCoercionFailure,
    SchemaConformanceFailure,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorType::RouteNotFound => write!(f, "Route not found"),
            ErrorType::MissingRequiredParameter => write!(f, "Required parameter missing"),
            ErrorType::UndeclaredParameter => write!(f, "Undeclared parameter"),
            ErrorType::DecodeFailure => write!(f, "Decode failure"),
            ErrorType::PrimitiveCoercionFailure => write!(f, "Parameter type mismatch"),
            ErrorType::SchemaConformanceFailure => write!(f, "Schema conformance failure"),
        }
    }
}
