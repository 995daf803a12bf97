use super::ErrorType;
use serde::Serialize;

/// One finding of the schema conformance engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaValidationFailure {
    pub reason: String,
    /// Pointer to the offending part of the value (`/milk`, `/2`); empty for the root
    pub location: String,
}

impl SchemaValidationFailure {
    pub fn new(reason: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            location: location.into(),
        }
    }
}

/// A single reported problem with the request headers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub error_type: ErrorType,
    pub message: String,
    pub parameter_name: String,
    /// Longer explanation of what was wrong
    pub reason: String,
    pub schema_validation_errors: Vec<SchemaValidationFailure>,
}

impl ValidationError {
    pub fn new(
        error_type: ErrorType,
        parameter_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            message: message.into(),
            parameter_name: parameter_name.into(),
            reason: String::new(),
            schema_validation_errors: vec![],
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_schema_errors(mut self, failures: Vec<SchemaValidationFailure>) -> Self {
        self.schema_validation_errors = failures;
        self
    }

    pub fn path_not_found(path: &str) -> Self {
        Self::new(
            ErrorType::RouteNotFound,
            "",
            format!("Path '{}' not found", path),
        )
        .with_reason(format!(
            "The request path '{}' does not match any path declared in the contract",
            path
        ))
    }

    pub fn missing(name: &str) -> Self {
        Self::new(
            ErrorType::MissingRequiredParameter,
            name,
            format!("Header parameter '{}' is missing", name),
        )
        .with_reason(format!(
            "The header parameter '{}' is marked as required but was not sent",
            name
        ))
    }

    /// A request header the operation does not declare. Names arrive
    /// lowercased from `http::HeaderMap`, so `name` is lowercase.
    pub fn not_defined(name: &str) -> Self {
        Self::new(
            ErrorType::UndeclaredParameter,
            name,
            format!("Header parameter '{}' is not defined", name),
        )
        .with_reason(format!(
            "The header '{}' is not declared by the operation",
            name
        ))
    }

    pub fn cannot_decode(name: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorType::DecodeFailure,
            name,
            format!("Header parameter '{}' cannot be decoded", name),
        )
        .with_reason(reason)
    }

    /// A primitive token that does not parse as the declared kind
    pub fn not_valid(name: &str, kind: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorType::PrimitiveCoercionFailure,
            name,
            format!("Header parameter '{}' is not a valid {}", name, kind),
        )
        .with_reason(reason)
    }

    pub fn schema_failure(name: &str, failures: Vec<SchemaValidationFailure>) -> Self {
        Self::new(
            ErrorType::SchemaConformanceFailure,
            name,
            format!("Header parameter '{}' failed to validate", name),
        )
        .with_reason(format!(
            "The value of '{}' does not conform to its schema ({} violation(s))",
            name,
            failures.len()
        ))
        .with_schema_errors(failures)
    }

    /// Format the error for terminal output
    pub fn format(&self) -> String {
        let mut parts = vec![self.message.clone()];

        if !self.reason.is_empty() {
            parts.push(format!("({})", self.reason));
        }

        for failure in &self.schema_validation_errors {
            if failure.location.is_empty() {
                parts.push(format!("\n    - {}", failure.reason));
            } else {
                parts.push(format!("\n    - {}: {}", failure.location, failure.reason));
            }
        }

        parts.join(" ")
    }
}

/// Outcome of validating the headers of one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn into_parts(self) -> (bool, Vec<ValidationError>) {
        (self.is_valid, self.errors)
    }
}
