use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::rc::Rc;

use crate::cli::utils::{load_definition, output_error, output_success, parse_assignment};
use crate::cli::OutputFormat;
use crate::database::{ChangeLog, RowItem};
use crate::error::ValidationError;

#[derive(Args)]
pub struct ApplyArgs {
    #[arg(help = "Row definition file (YAML/JSON)")]
    pub file: PathBuf,

    #[arg(long = "set", value_name = "ID=VALUE", help = "Assignment to apply, repeatable")]
    pub assignments: Vec<String>,
}

/// Row state after all assignments were applied
pub struct ApplyOutcome {
    pub row: RowItem,
    pub log: Rc<ChangeLog>,
}

impl ApplyOutcome {
    /// JSON payload merged into the success response
    pub fn to_json(&self) -> Value {
        json!({
            "row_id": self.row.row_id(),
            "row": self.row.to_json(),
            "changes": self.row.changes(),
            "notifications": self.log.to_json(),
        })
    }
}

/// Load the definition and apply each assignment in order, stopping at the first failure
pub fn apply(args: &ApplyArgs) -> anyhow::Result<ApplyOutcome> {
    let definition = load_definition(&args.file)?;
    let log = Rc::new(ChangeLog::new());
    let mut row = definition.build(&log)?;

    for raw in &args.assignments {
        let (id, value) = parse_assignment(raw)?;
        row.set_value(&id, value)
            .map_err(|err| anyhow::Error::new(err).context(format!("Failed to apply '{}'", raw)))?;
    }

    Ok(ApplyOutcome { row, log })
}

pub fn handle(args: ApplyArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let outcome = match apply(&args) {
        Ok(outcome) => outcome,
        Err(err) => {
            if let (OutputFormat::Json, Some(validation)) =
                (&output_format, err.downcast_ref::<ValidationError>())
            {
                output_error(&output_format, &validation.to_string(), Some(validation.error_code()))?;
            }
            return Err(err);
        }
    };

    let ApplyOutcome { row, log } = &outcome;
    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            &format!("Applied {} assignment(s) to row {}", args.assignments.len(), row.row_id()),
            Some(outcome.to_json()),
        ),
        OutputFormat::Text => {
            for property in row.properties() {
                let marker = if property.is_modified() { "*" } else { " " };
                println!("{} {}", marker, property);
            }
            println!();
            for change in log.changes() {
                println!("  {}: {} -> {}", change.property_id, change.old_value, change.new_value);
            }
            output_success(
                &output_format,
                &format!("{} notification(s) for row {}", log.len(), row.row_id()),
                None,
            )
        }
    }
}
