//! Catalog loader CLI
//!
//! Loads the character catalog into Postgres, or dumps resolved rows as JSON
//! lines for inspection.

use std::path::PathBuf;

use catalog_loader::{
    error::Result,
    models::Config,
    pipeline,
    services::HttpFetcher,
    storage::{JsonLinesSink, PostgresWriter},
    utils::http,
};
use clap::{Parser, Subcommand};
use env_logger::Target;

/// catalog-loader - SWAPI character catalog loader
#[derive(Parser, Debug)]
#[command(
    name = "catalog-loader",
    version,
    about = "Loads SWAPI characters into a denormalized Postgres table"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "catalog.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `load`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every character and insert it into the database
    Load,

    /// Resolve characters and print them as JSON lines, without a database
    Dump {
        /// Stop after this many listing pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging; `RUST_LOG` wins over `level`.
fn init_logging(level: &str, target: Target) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(target)
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Load);

    let loaded = Config::load(&cli.config);
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        loaded
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|_| "info".to_string())
    };
    // JSON rows own stdout during a dump
    let target = match command {
        Command::Dump { .. } => Target::Stderr,
        _ => Target::Stdout,
    };
    init_logging(&level, target);

    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });
    config.apply_env();

    match command {
        Command::Load => {
            config.validate()?;

            let writer = match PostgresWriter::connect(&config.database).await {
                Ok(writer) => {
                    log::info!("Connected to the database successfully.");
                    writer
                }
                Err(e) => {
                    log::error!(
                        "Failed to connect to the database at {}. Error: {}",
                        config.database.display_target(),
                        e
                    );
                    return Err(e);
                }
            };

            let fetcher = HttpFetcher::new(http::create_async_client(&config.api)?);
            pipeline::run_loader(&config, &fetcher, &writer).await;

            writer.close().await;
            log::info!("Disconnected from the database.");
        }

        Command::Dump { max_pages } => {
            if max_pages.is_some() {
                config.loader.max_pages = max_pages;
            }
            config.validate()?;

            let fetcher = HttpFetcher::new(http::create_async_client(&config.api)?);
            let sink = JsonLinesSink::stdout();
            pipeline::run_loader(&config, &fetcher, &sink).await;
        }

        Command::Validate => pipeline::run_validate(&config)?,
    }

    Ok(())
}
