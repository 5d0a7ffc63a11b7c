use clap::Parser;
use column_property::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env if present so COLUMN_* overrides apply
    let _ = dotenvy::dotenv();

    let config = column_property::config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting in {:?} mode", config.environment);

    let cli = Cli::parse();

    if let Err(e) = column_property::cli::run(cli) {
        if config.cli.verbose_errors {
            eprintln!("Error: {e:?}");
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }

    Ok(())
}
