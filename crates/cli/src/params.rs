use crate::error::CliError;
use expression_engine::Params;
use std::{fs, path::Path};

/// Build the parameter bag of a `render` call. Values given on the command
/// line replace those read from the JSON file.
pub fn collect(pairs: &[String], file: Option<&Path>) -> Result<Params, CliError> {
    let mut params = match file {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Params::from_json(serde_json::from_str(&content)?)?
        }
        None => Params::new(),
    };

    for pair in pairs {
        let (name, value) = parse_pair(pair)?;
        params.insert(name, value);
    }

    Ok(params)
}

fn parse_pair(pair: &str) -> Result<(&str, &str), CliError> {
    match pair.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(CliError::InvalidParam(pair.to_string())),
    }
}
