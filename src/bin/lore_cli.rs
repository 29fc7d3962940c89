//! Lore Linker Command Line Interface
//!
//! Links lore records stored as YAML files in a lore directory.
//!
//! # Usage
//!
//! ```bash
//! # Link one record against a lore directory and print it
//! lore_cli link drafts/nolen2.yaml --lore-dir lore/
//!
//! # Relink every record of a lore directory into another directory
//! lore_cli relink --lore-dir lore/ --out linked/
//!
//! # Show the Name Index
//! lore_cli --format json index --lore-dir lore/
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lore_linker::{
    store::{import_lore_dir, read_lore_file, write_lore_file},
    LinkerConfig, Linker, MemoryStore, RecordService, RecordStore,
};

#[derive(Parser)]
#[command(name = "lore_cli")]
#[command(version = "0.1.0")]
#[command(about = "Turns mentions of lore records into links")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "yaml", value_enum)]
    format: OutputFormat,

    /// Linker configuration file
    #[arg(long, global = true, env = "LORE_LINKER_CONFIG")]
    config: Option<PathBuf>,

    /// Prefix for link targets (overrides the configuration)
    #[arg(long, global = true)]
    href_prefix: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Link a single record file against a lore directory
    Link {
        /// Record file (YAML)
        file: PathBuf,

        /// Lore directory (defaults to `lore_dir` from the configuration)
        #[arg(long)]
        lore_dir: Option<PathBuf>,
    },

    /// Relink every record of a lore directory
    Relink {
        #[arg(long)]
        lore_dir: Option<PathBuf>,

        /// Write linked records here instead of printing them
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the Name Index of a lore directory
    Index {
        #[arg(long)]
        lore_dir: Option<PathBuf>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lore_linker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = run(&cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => LinkerConfig::from_file(path)?,
        None => LinkerConfig::default(),
    };
    if let Some(prefix) = &cli.href_prefix {
        config.href_prefix = prefix.clone();
    }

    match &cli.command {
        Commands::Link { file, lore_dir } => {
            let lore_dir = resolve_lore_dir(lore_dir.as_deref(), &config)?;
            cmd_link(file, &lore_dir, &config, cli.format).await
        }
        Commands::Relink { lore_dir, out } => {
            let lore_dir = resolve_lore_dir(lore_dir.as_deref(), &config)?;
            cmd_relink(&lore_dir, out.as_deref(), &config, cli.format).await
        }
        Commands::Index { lore_dir } => {
            let lore_dir = resolve_lore_dir(lore_dir.as_deref(), &config)?;
            cmd_index(&lore_dir, &config, cli.format).await
        }
    }
}

fn resolve_lore_dir(arg: Option<&Path>, config: &LinkerConfig) -> Result<PathBuf> {
    arg.map(Path::to_path_buf)
        .or_else(|| config.lore_dir.clone())
        .ok_or_else(|| anyhow!("No lore directory: pass --lore-dir or set lore_dir in the config"))
}

/// Load a lore directory into a fresh in-memory service
async fn load_service(lore_dir: &Path, config: &LinkerConfig) -> Result<RecordService<MemoryStore>> {
    let service = RecordService::new(Arc::new(MemoryStore::new()), Linker::from_config(config));
    let summary = import_lore_dir(lore_dir, service.store())
        .await
        .with_context(|| format!("Loading lore directory {:?}", lore_dir))?;

    for path in &summary.failed {
        eprintln!("{}: skipped unreadable record {:?}", "warning".yellow().bold(), path);
    }
    Ok(service)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

async fn cmd_link(
    file: &Path,
    lore_dir: &Path,
    config: &LinkerConfig,
    format: OutputFormat,
) -> Result<()> {
    let service = load_service(lore_dir, config).await?;
    let record = read_lore_file(file)?;
    let linked = service
        .preview(record)
        .await
        .with_context(|| format!("Linking {:?}", file))?;
    print_value(&linked, format)
}

async fn cmd_relink(
    lore_dir: &Path,
    out: Option<&Path>,
    config: &LinkerConfig,
    format: OutputFormat,
) -> Result<()> {
    let service = load_service(lore_dir, config).await?;
    let count = service.relink_all().await?;
    let records = service.store().list().await?;

    match out {
        Some(out) => {
            for record in &records {
                write_lore_file(out, record)?;
            }
            eprintln!(
                "{} {} records into {:?}",
                "Relinked".green().bold(),
                count,
                out
            );
            Ok(())
        }
        None => print_value(&records, format),
    }
}

#[derive(Serialize)]
struct IndexLine<'a> {
    key: &'a str,
    name_id: &'a str,
    #[serde(rename = "type")]
    record_type: String,
    multi: bool,
}

async fn cmd_index(lore_dir: &Path, config: &LinkerConfig, format: OutputFormat) -> Result<()> {
    let service = load_service(lore_dir, config).await?;
    let index = service.name_index().await?;

    let lines: Vec<IndexLine<'_>> = index
        .iter()
        .map(|(key, entry)| IndexLine {
            key,
            name_id: &entry.name_id,
            record_type: entry.record_type.to_string(),
            multi: entry.multi,
        })
        .collect();
    print_value(&lines, format)
}

fn print_value<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}
