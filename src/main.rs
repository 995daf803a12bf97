use clap::Parser;
use hornet_headers::{
    ValidatorConfig,
    cli::{Cli, Commands},
    commands::{self, check::CheckRequest},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_telemetry();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            openapi,
            method,
            path,
            headers,
            format,
            allow_headers,
            no_undeclared,
        } => {
            let request = CheckRequest {
                method: &method,
                path: &path,
                headers: &headers,
            };
            let config = build_config(allow_headers, no_undeclared);
            commands::execute_check(&openapi, &request, config, &format)?;
        }
        Commands::List { openapi } => {
            commands::execute_list(&openapi)?;
        }
        Commands::Serve {
            openapi,
            host,
            port,
            allow_headers,
            no_undeclared,
        } => {
            let config = build_config(allow_headers, no_undeclared);
            commands::execute_serve(&openapi, &host, port, config).await?;
        }
    }

    Ok(())
}

fn build_config(allow_headers: Vec<String>, no_undeclared: bool) -> ValidatorConfig {
    let mut config = ValidatorConfig::from_env();
    if no_undeclared {
        config = config.with_undeclared_check(false);
    }
    allow_headers
        .into_iter()
        .fold(config, |config, name| config.allow_header(name))
}
