use crate::error::{QueryError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::{fmt, str::FromStr};

lazy_static! {
    static ref QUERY_ID: Regex =
        Regex::new(r"^([A-Za-z0-9]+)\.([A-Za-z0-9]+)$").expect("valid query id pattern");
    static ref FILE_BASE_NAME: Regex =
        Regex::new(r"^[A-Za-z0-9]+$").expect("valid file name pattern");
}

/// Whether `name` can be the file part of a query id.
pub fn is_valid_file_base_name(name: &str) -> bool {
    FILE_BASE_NAME.is_match(name)
}

/// File name of the mapper backing `file_base_name`.
pub fn mapper_file_name(file_base_name: &str) -> String {
    format!("{file_base_name}.xml")
}

/// `File.local` pair naming one statement inside one mapper file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QueryId {
    /// Base name of the mapper file, without extension.
    pub file: String,
    /// Statement id inside that file.
    pub local: String,
}

impl QueryId {
    pub fn parse(query_id: &str) -> Result<Self> {
        let caps = QUERY_ID
            .captures(query_id)
            .ok_or_else(|| QueryError::InvalidQueryId(query_id.to_string()))?;

        Ok(QueryId {
            file: caps[1].to_string(),
            local: caps[2].to_string(),
        })
    }

    pub fn file_name(&self) -> String {
        mapper_file_name(&self.file)
    }
}

impl FromStr for QueryId {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        QueryId::parse(s)
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.file, self.local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = QueryId::parse("User.findAll").unwrap();

        assert_eq!(id.file, "User");
        assert_eq!(id.local, "findAll");
        assert_eq!(id.file_name(), "User.xml");
        assert_eq!(id.to_string(), "User.findAll");
    }

    #[test]
    fn test_digits_are_allowed() {
        let id: QueryId = "Report2024.q1".parse().unwrap();

        assert_eq!(id.file_name(), "Report2024.xml");
    }

    #[test]
    fn test_file_base_names() {
        assert!(is_valid_file_base_name("User"));
        assert!(is_valid_file_base_name("Report2024"));

        for name in ["", "../x", "a/b", "User.xml", "my_file", "x\n"] {
            assert!(!is_valid_file_base_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_rejects_malformed_ids() {
        for input in [
            "User_findAll",
            "User.find_all",
            "User.find.All",
            ".findAll",
            "User.",
            "",
            "User.findAll\n",
            "../etc.passwd",
            "Us er.findAll",
        ] {
            assert!(
                matches!(QueryId::parse(input), Err(QueryError::InvalidQueryId(s)) if s == input),
                "{input:?} should be rejected"
            );
        }
    }
}
