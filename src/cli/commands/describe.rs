use serde_json::json;
use std::path::Path;

use crate::cli::utils::load_definition;
use crate::cli::OutputFormat;

pub fn handle(file: &Path, output_format: OutputFormat) -> anyhow::Result<()> {
    let definition = load_definition(file)?;

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "row_id": definition.row_id,
                    "columns": definition.columns,
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{:<20} {:<10} {:<9} {:<9} DEFAULT", "COLUMN", "TYPE", "NULLABLE", "READONLY");
            for column in &definition.columns {
                println!(
                    "{:<20} {:<10} {:<9} {:<9} {}",
                    column.id, column.value_type, column.nullable, column.read_only, column.default
                );
            }
        }
    }

    Ok(())
}
