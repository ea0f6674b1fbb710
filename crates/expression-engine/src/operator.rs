use serde::Serialize;
use std::{fmt, str::FromStr};

/// Comparison operators allowed in a test expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
}

impl CompareOp {
    pub fn is_ordering(&self) -> bool {
        !matches!(self, CompareOp::Equal | CompareOp::NotEqual)
    }

    pub fn compare<T: PartialOrd + ?Sized>(&self, left: &T, right: &T) -> bool {
        match self {
            CompareOp::Equal => left == right,
            CompareOp::NotEqual => left != right,
            CompareOp::LessThan => left < right,
            CompareOp::LessOrEqual => left <= right,
            CompareOp::GreaterThan => left > right,
            CompareOp::GreaterOrEqual => left >= right,
        }
    }
}

impl FromStr for CompareOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Equal),
            "!=" => Ok(CompareOp::NotEqual),
            "<" => Ok(CompareOp::LessThan),
            "<=" => Ok(CompareOp::LessOrEqual),
            ">" => Ok(CompareOp::GreaterThan),
            ">=" => Ok(CompareOp::GreaterOrEqual),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Equal => write!(f, "=="),
            CompareOp::NotEqual => write!(f, "!="),
            CompareOp::LessThan => write!(f, "<"),
            CompareOp::LessOrEqual => write!(f, "<="),
            CompareOp::GreaterThan => write!(f, ">"),
            CompareOp::GreaterOrEqual => write!(f, ">="),
        }
    }
}
