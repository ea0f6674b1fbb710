use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Malformed test expression '{0}': expected `property operator literal`")]
    MalformedExpression(String),

    #[error("Unknown comparison operator '{operator}' in test expression '{expression}'")]
    UnknownOperator {
        operator: String,
        expression: String,
    },

    #[error("Property '{property}' holds a number but '{literal}' is not one")]
    NonNumericLiteral { property: String, literal: String },
}

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("Parameter record must serialize to an object, got {0}")]
    NotAnObject(&'static str),

    #[error("Failed to serialize parameter record: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExpressionError>;
