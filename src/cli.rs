use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hornet-headers")]
#[command(version)]
#[command(about = "Validate HTTP request headers against an OpenAPI contract", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the headers of a single request
    Check {
        /// Path to OpenAPI file
        #[arg(short, long)]
        openapi: PathBuf,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path or URL (e.g., "/vending/drinks")
        #[arg(short, long)]
        path: String,

        /// Request header as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Extra header name that may be sent without being declared (repeatable)
        #[arg(long = "allow-header")]
        allow_headers: Vec<String>,

        /// Do not report headers the operation does not declare
        #[arg(long)]
        no_undeclared: bool,
    },

    /// List header parameters declared by each operation
    List {
        /// Path to OpenAPI file
        #[arg(short, long)]
        openapi: PathBuf,
    },

    /// Start a server that validates the headers of every request
    Serve {
        /// Path to OpenAPI file
        #[arg(short, long)]
        openapi: PathBuf,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port number
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Extra header name that may be sent without being declared (repeatable)
        #[arg(long = "allow-header")]
        allow_headers: Vec<String>,

        /// Do not report headers the operation does not declare
        #[arg(long)]
        no_undeclared: bool,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human readable output
    Text,
    /// JSON validation result
    Json,
}
