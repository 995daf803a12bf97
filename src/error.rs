use thiserror::Error;

#[derive(Error, Debug)]
pub enum HornetError {
    #[error("Failed to load OpenAPI file: {0}")]
    OpenApiLoadError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HornetError>;
