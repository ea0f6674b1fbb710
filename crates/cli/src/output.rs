use crate::error::CliError;
use engine_core::{MapperStore, QueryResolver};
use mapper_syntax::{Document, InvalidDirective, UnsupportedTag};
use serde::Serialize;

/// Result of checking one mapper file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub statements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unsupported: Vec<UnsupportedTag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid: Vec<InvalidDirective>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.unsupported.is_empty() && self.invalid.is_empty()
    }
}

/// Parse every mapper file under the store root.
pub fn check_files(store: &MapperStore) -> Result<Vec<FileReport>, CliError> {
    let resolver = QueryResolver::new(store);

    let reports = store
        .available_files()?
        .into_iter()
        .map(|file| match resolver.document(&file) {
            Ok(document) => FileReport {
                statements: document.len(),
                unsupported: document.unsupported_tags(),
                invalid: document.invalid_directives(),
                error: None,
                file,
            },
            Err(err) => FileReport {
                statements: 0,
                unsupported: Vec::new(),
                invalid: Vec::new(),
                error: Some(err.to_string()),
                file,
            },
        })
        .collect();

    Ok(reports)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)?;
    println!("{json}");
    Ok(())
}

pub fn print_check_table(reports: &[FileReport]) {
    for report in reports {
        if let Some(err) = &report.error {
            println!("{:<24} FAILED  {err}", report.file);
            continue;
        }
        if report.is_ok() {
            println!("{:<24} ok      {} statement(s)", report.file, report.statements);
            continue;
        }

        println!("{:<24} FAILED", report.file);
        for found in &report.unsupported {
            println!("{:<24}   unsupported <{}> in '{}'", "", found.tag, found.statement);
        }
        for found in &report.invalid {
            println!("{:<24}   {} in '{}'", "", found.error, found.statement);
        }
    }
}

pub fn print_statements(document: &Document) {
    println!("{:<24} {}", "Id", "Kind");
    println!("-----------------------------");
    for statement in document.statements() {
        println!("{:<24} {}", statement.id, statement.kind);
    }
}
