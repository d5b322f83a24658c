//! Tally batch recalculation tool.
//!
//! Reads a document (header + lines) as JSON, runs one engine operation,
//! and writes the resulting document to stdout. Logs go to stderr.
//!
//! Usage: tally-recalc recalc invoice.json

mod cli;
mod commands;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tally_core::Document;
use tally_shared::{AppConfig, LogConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load_validated().context("Failed to load configuration")?;

    init_tracing(&config.log);
    debug!(precision = ?config.precision, "Configuration loaded");

    let document = read_document(cli.command.file())?;
    let document = commands::run(&cli.command, document, &config.precision)?;
    write_document(&document)
}

fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);

    if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn read_document(path: Option<&PathBuf>) -> Result<Document> {
    let document = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Invalid document in {}", path.display()))?
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            serde_json::from_str(&input).context("Invalid document on stdin")?
        }
    };
    Ok(document)
}

fn write_document(document: &Document) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, document).context("Failed to write document")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
