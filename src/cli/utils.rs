use anyhow::Context;
use serde_json::{json, Value};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::database::RowDefinition;

/// Read and parse a row definition file
pub fn load_definition(path: &Path) -> anyhow::Result<RowDefinition> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read row definition {}", path.display()))?;

    RowDefinition::parse(&input)
        .with_context(|| format!("Invalid row definition {}", path.display()))
}

/// Split an `id=<json>` assignment. Values that are not valid JSON are
/// taken as plain strings so `name=Kalle` works without quoting.
pub fn parse_assignment(raw: &str) -> anyhow::Result<(String, Value)> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected id=value, got '{}'", raw))?;

    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("Missing property ID in '{}'", raw);
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((id.to_string(), value))
}

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(object)) = (data, response.as_object_mut()) {
                object.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}
