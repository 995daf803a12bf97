use crate::{Result, contract::ContractModel};
use colored::*;
use std::path::Path;

pub fn execute_list(openapi_path: &Path) -> Result<()> {
    let contract = ContractModel::from_file(openapi_path)?;

    println!("{}", "Header parameters:".bright_blue().bold());
    println!();

    for operation in contract.operations() {
        let id = operation
            .operation_id
            .as_deref()
            .map(|id| format!(" ({})", id))
            .unwrap_or_default();
        println!(
            "{} {}{}",
            operation.method.bold(),
            operation.template.cyan(),
            id.dimmed()
        );

        let headers: Vec<_> = operation.header_parameters().collect();
        if headers.is_empty() {
            println!("  {}", "(none)".dimmed());
        }

        for param in headers {
            let required = if param.required {
                "required".yellow()
            } else {
                "optional".normal()
            };
            println!(
                "  - {} [{}] {} explode={}",
                param.name.green(),
                required,
                param.schema.kind(),
                param.explode
            );
        }
        println!();
    }

    Ok(())
}
