use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    #[error("Markup syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("Tag <{0}> is never closed")]
    UnclosedTag(String),

    #[error("Tag <{tag}> is missing the required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    #[error("Invalid <choose> block: {0}")]
    InvalidChoose(String),

    #[error("Invalid UTF-8 in markup: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, MarkupError>;
