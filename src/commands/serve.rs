use crate::{
    HornetError, Result,
    config::ValidatorConfig,
    contract::ContractModel,
    server::{self, AppState},
};
use colored::*;
use std::net::SocketAddr;
use std::path::Path;

pub async fn execute_serve(
    openapi_path: &Path,
    host: &str,
    port: u16,
    config: ValidatorConfig,
) -> Result<()> {
    println!("{}", "Starting header validation server...".bright_blue());
    println!("  OpenAPI: {}", openapi_path.display());
    println!("  Port: {}", port);
    println!();

    let contract = ContractModel::from_file(openapi_path)?;

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| HornetError::ValidationError(format!("Invalid listen address: {}", e)))?;

    server::start_server(addr, AppState::new(contract, config)).await
}
