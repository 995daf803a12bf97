use super::coerce::coerce;
use super::decode::decode;
use super::headers::{SentValue, resolve_headers};
use super::result::{ValidationError, ValidationResult};
use super::schema::{JsonSchemaEngine, SchemaConformance};
use crate::config::ValidatorConfig;
use crate::contract::{ContractModel, ParameterSpec};
use http::{HeaderMap, Request};

/// Validates request headers against the header parameters of the
/// operation each request targets.
pub struct Validator<'a, S = JsonSchemaEngine> {
    contract: &'a ContractModel,
    config: ValidatorConfig,
    engine: S,
}

impl<'a> Validator<'a> {
    pub fn new(contract: &'a ContractModel) -> Self {
        Self::with_config(contract, ValidatorConfig::default())
    }

    pub fn with_config(contract: &'a ContractModel, config: ValidatorConfig) -> Self {
        Self {
            contract,
            config,
            engine: JsonSchemaEngine,
        }
    }
}

impl<'a, S: SchemaConformance> Validator<'a, S> {
    /// Swap the schema conformance engine
    pub fn with_engine<T: SchemaConformance>(self, engine: T) -> Validator<'a, T> {
        Validator {
            contract: self.contract,
            config: self.config,
            engine,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate the header parameters of a request.
    ///
    /// The request is only read. Every problem is collected; the one
    /// exception is an unknown path, which is reported on its own.
    pub fn validate_header_params<B>(&self, request: &Request<B>) -> ValidationResult {
        self.validate_headers(
            request.method().as_str(),
            request.uri().path(),
            request.headers(),
        )
    }

    pub fn validate_headers(
        &self,
        method: &str,
        path: &str,
        headers: &HeaderMap,
    ) -> ValidationResult {
        let Some(operation) = self.contract.resolve(method, path) else {
            tracing::debug!(method, path, "No declared path matches request");
            return ValidationResult::from_errors(vec![ValidationError::path_not_found(path)]);
        };

        tracing::debug!(
            method,
            path,
            template = %operation.template,
            "Validating header parameters"
        );

        let declared: Vec<&ParameterSpec> = operation.header_parameters().collect();
        let resolution = resolve_headers(headers, &declared);
        let mut errors = vec![];

        for header in &resolution.declared {
            let param = header.param;
            match &header.value {
                SentValue::Absent if param.required => {
                    errors.push(ValidationError::missing(&param.name));
                }
                SentValue::Absent => {}
                SentValue::Opaque => errors.push(ValidationError::cannot_decode(
                    &param.name,
                    "the value is not valid UTF-8",
                )),
                SentValue::Text(raw) => errors.extend(self.check_parameter(param, raw)),
            }
        }

        if self.config.check_undeclared {
            errors.extend(
                resolution
                    .undeclared
                    .iter()
                    .filter(|name| !self.config.is_allowed(name))
                    .map(|name| ValidationError::not_defined(name)),
            );
        }

        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "Header validation failed");
        }

        ValidationResult::from_errors(errors)
    }

    /// Decode, convert and schema-check one header value.
    fn check_parameter(&self, param: &ParameterSpec, raw: &str) -> Vec<ValidationError> {
        tracing::trace!(name = %param.name, raw, "Checking header parameter");

        if param.style != "simple" {
            tracing::warn!(
                name = %param.name,
                style = %param.style,
                "Headers only support the simple style, decoding as simple"
            );
        }

        let decoded = match decode(raw, &param.schema, param.explode) {
            Ok(decoded) => decoded,
            Err(failure) => {
                return vec![ValidationError::cannot_decode(
                    &param.name,
                    failure.to_string(),
                )];
            }
        };

        let value = match coerce(&decoded, &param.schema) {
            Ok(value) => value,
            Err(failures) => {
                return failures
                    .into_iter()
                    .map(|f| ValidationError::not_valid(&param.name, f.kind, f.to_string()))
                    .collect();
            }
        };

        let failures = self.engine.check(&value, &param.schema_json);
        if failures.is_empty() {
            vec![]
        } else {
            vec![ValidationError::schema_failure(&param.name, failures)]
        }
    }
}
