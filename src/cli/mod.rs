pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "column-property")]
#[command(about = "Inspect and edit rows of validated column properties")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply value assignments to a row and show the changes")]
    Apply(commands::apply::ApplyArgs),

    #[command(about = "Show the columns of a row definition")]
    Describe {
        #[arg(help = "Row definition file (YAML/JSON)")]
        file: std::path::PathBuf,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Explicit flags win; otherwise fall back to the configured default
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else if cli.text || !crate::config::config().cli.json_output {
            OutputFormat::Text
        } else {
            OutputFormat::Json
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Apply(args) => commands::apply::handle(args, output_format),
        Commands::Describe { file } => commands::describe::handle(&file, output_format),
    }
}
