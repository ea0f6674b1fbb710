use expression_engine::ExpressionError;
use mapper_syntax::MarkupError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error(
        "Mapper root directory is not configured. Call `configure` with the directory holding the mapper files before rendering"
    )]
    ConfigNotSet,

    #[error("Mapper file not found: {}", .0.display())]
    MapperFileNotFound(PathBuf),

    #[error("Query id must look like <FileName>.<QueryId> (e.g. User.getOne), got '{0}'")]
    InvalidQueryId(String),

    #[error("Mapper file name must be alphanumeric (e.g. User), got '{0}'")]
    InvalidFileName(String),

    #[error("Query '{0}' is not defined")]
    QueryNotFound(String),

    #[error("Unsupported tag name: {0}")]
    UnsupportedTag(String),

    /// Reserved. No tag handler raises it.
    #[error("Property '{0}' is not found in tag block")]
    PropertyNotFound(String),

    #[error("Include cycle detected: {}", .chain.join(" -> "))]
    IncludeCycle { chain: Vec<String> },

    #[error("Failed to read mapper file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid mapper markup: {0}")]
    Markup(#[from] MarkupError),

    #[error("Invalid test expression: {0}")]
    Expression(#[from] ExpressionError),
}

pub type Result<T> = std::result::Result<T, QueryError>;
