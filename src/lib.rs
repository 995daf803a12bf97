pub mod cli;
pub mod commands;
pub mod config;
pub mod contract;
pub mod error;
pub mod loader;
pub mod server;
pub mod telemetry;
pub mod validation;

pub use config::ValidatorConfig;
pub use contract::ContractModel;
pub use error::{HornetError, Result};
pub use validation::{ValidationError, ValidationResult, Validator};
