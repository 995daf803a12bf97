use crate::{
    HornetError, Result,
    cli::OutputFormat,
    config::ValidatorConfig,
    contract::ContractModel,
    validation::{ValidationResult, Validator},
};
use colored::*;
use http::{HeaderName, HeaderValue, Request};
use std::path::Path;

pub struct CheckRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    /// `Name: value` lines
    pub headers: &'a [String],
}

pub fn execute_check(
    openapi_path: &Path,
    request: &CheckRequest<'_>,
    config: ValidatorConfig,
    format: &OutputFormat,
) -> Result<()> {
    let contract = ContractModel::from_file(openapi_path)?;
    let result = run_check(&contract, request, config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(request, &result),
    }

    if !result.is_valid {
        std::process::exit(1);
    }
    Ok(())
}

/// Build the described request and validate its headers
pub fn run_check(
    contract: &ContractModel,
    request: &CheckRequest<'_>,
    config: ValidatorConfig,
) -> Result<ValidationResult> {
    let mut builder = Request::builder()
        .method(request.method.to_uppercase().as_str())
        .uri(request.path);

    for line in request.headers {
        let (name, value) = parse_header_line(line)?;
        builder = builder.header(name, value);
    }

    let http_request = builder
        .body(())
        .map_err(|e| HornetError::ValidationError(format!("Invalid request: {}", e)))?;

    Ok(Validator::with_config(contract, config).validate_header_params(&http_request))
}

/// Parse a `Name: value` header line
pub fn parse_header_line(line: &str) -> Result<(HeaderName, HeaderValue)> {
    let (name, value) = line.split_once(':').ok_or_else(|| {
        HornetError::InvalidHeader(format!("expected 'Name: value', got '{}'", line))
    })?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| HornetError::InvalidHeader(format!("'{}': {}", name.trim(), e)))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|e| HornetError::InvalidHeader(format!("'{}': {}", name, e)))?;

    Ok((name, value))
}

fn print_result(request: &CheckRequest<'_>, result: &ValidationResult) {
    println!(
        "{} {} {}",
        "Validating headers of".bright_blue(),
        request.method.to_uppercase().bold(),
        request.path
    );

    if result.is_valid {
        println!("{}", "✓ Headers are valid".green().bold());
        return;
    }

    println!("{}", "✗ Header errors:".red().bold());
    for error in &result.errors {
        println!("  - {}", error.format().red());
    }
}
