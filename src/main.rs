//! Binary entry point for notivault.
//!
//! This binary provides the CLI interface for working with notification
//! CSV archives: inspecting and normalizing existing archives, printing the
//! schema contract, and showing effective configuration.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use notivault::io::codec;
use notivault::io::schema::SchemaVersion;
use notivault::VaultConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Notivault - bulk export/import of notification histories as CSV archives.
#[derive(Parser)]
#[command(name = "notivault")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Decode an archive and report what it contains.
    Inspect {
        /// Path to the CSV archive.
        file: PathBuf,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Re-encode a legacy archive under the canonical schema.
    Convert {
        /// Path to the CSV archive.
        file: PathBuf,

        /// Output path (defaults to `<input>_canonical.csv`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the archive schema contract.
    Schema {
        /// Print every known revision instead of just the canonical one.
        #[arg(long)]
        all: bool,
    },

    /// Show effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match VaultConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "notivault=debug" } else { "notivault=info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the selected command.
fn run_command(cli: Cli, config: VaultConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Inspect { file, format } => cmd_inspect(file, &format),
        Commands::Convert { file, output } => cmd_convert(file, output),
        Commands::Schema { all } => cmd_schema(all),
        Commands::Config => cmd_config(&config),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "notivault", &mut std::io::stdout());
            Ok(())
        },
    }
}

/// Decodes an archive and prints a summary.
fn cmd_inspect(file: PathBuf, format: &str) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let archive = codec::decode(&text)?;

    if format == "json" {
        let summary = serde_json::json!({
            "file": file.display().to_string(),
            "schema": archive.schema,
            "records": archive.records.len(),
            "skippedRows": archive.skipped_rows,
            "totalRows": archive.total_rows(),
            "warnings": archive.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Archive:    {}", file.display());
    println!("Schema:     {}", archive.schema);
    println!("Records:    {}", archive.records.len());
    println!("Skipped:    {}", archive.skipped_rows);
    print_warnings(&archive.warnings);
    Ok(())
}

/// Re-encodes a legacy archive under the canonical schema.
fn cmd_convert(file: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let archive = codec::decode(&text)?;

    let output = output.unwrap_or_else(|| canonical_output_path(&file));
    std::fs::write(&output, codec::encode_to_string(&archive.records))
        .with_context(|| format!("cannot write {}", output.display()))?;

    println!(
        "Converted {} records ({} -> {}) into {}",
        archive.records.len(),
        archive.schema,
        SchemaVersion::CANONICAL,
        output.display()
    );
    if archive.skipped_rows > 0 {
        println!("Dropped {} damaged rows", archive.skipped_rows);
    }
    print_warnings(&archive.warnings);
    Ok(())
}

/// Prints header lines for the schema contract.
fn cmd_schema(all: bool) -> anyhow::Result<()> {
    if all {
        for version in SchemaVersion::all() {
            println!("{version} ({} fields):", version.field_count());
            println!("  {}", version.header_line());
        }
    } else {
        println!("{}", SchemaVersion::CANONICAL.header_line());
    }
    Ok(())
}

/// Prints the effective configuration.
fn cmd_config(config: &VaultConfig) -> anyhow::Result<()> {
    println!("Page size:   {}", config.page_size);
    match config.resolve_export_dir() {
        Ok(dir) => println!("Export dir:  {}", dir.display()),
        Err(_) => println!("Export dir:  (unresolved)"),
    }
    if let Some(path) = VaultConfig::default_config_path() {
        println!("Config file: {}", path.display());
    }
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("Warnings ({}):", warnings.len());
    for warning in warnings.iter().take(10) {
        println!("  - {warning}");
    }
    if warnings.len() > 10 {
        println!("  ... and {} more", warnings.len() - 10);
    }
}

fn canonical_output_path(input: &std::path::Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "archive".to_string(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}_canonical.csv"))
}
