use engine_core::QueryError;
use expression_engine::ParamError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render query: {0}")]
    Query(#[from] QueryError),

    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid parameter '{0}', expected NAME=VALUE")]
    InvalidParam(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} mapper file(s) failed the check")]
    CheckFailed(usize),
}
