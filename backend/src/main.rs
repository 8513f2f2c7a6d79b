//! Rosterload CLI - validate and import student rosters
//!
//! ```bash
//! rosterload import batch.csv                      # Print accepted records as JSON
//! rosterload import batch.csv --format csv -o out.csv
//! rosterload import batch.csv --existing roster.json
//! rosterload check batch.csv                       # Only report problems
//! rosterload template -o roster-template.csv       # Write the example roster
//! rosterload serve --port 3000                     # Start HTTP server
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use rosterload::{
    import_file, records_to_csv, server::start_server, AppConfig, ImportOptions, ImportOutcome,
    RosterSnapshot, TEMPLATE_CSV,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rosterload")]
#[command(about = "Validate and import student rosters from CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a roster and output the accepted records
    Import {
        /// Input CSV file
        input: PathBuf,

        /// JSON array of already-enrolled students
        #[arg(short, long)]
        existing: Option<PathBuf>,

        /// Input encoding (auto-detect if not specified)
        #[arg(long)]
        encoding: Option<String>,

        /// Output format for accepted records
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report errors and warnings without writing records
    Check {
        /// Input CSV file
        input: PathBuf,

        /// JSON array of already-enrolled students
        #[arg(short, long)]
        existing: Option<PathBuf>,
    },

    /// Write the example roster template
    Template {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides ROSTERLOAD_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            input,
            existing,
            encoding,
            format,
            output,
        } => cmd_import(&input, existing.as_deref(), encoding, format, output.as_deref()),

        Commands::Check { input, existing } => cmd_check(&input, existing.as_deref()),

        Commands::Template { output } => write_output(TEMPLATE_CSV, output.as_deref()),

        Commands::Serve { port } => cmd_serve(port).await,
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

type CmdResult = Result<bool, Box<dyn std::error::Error>>;

fn build_options(existing: Option<&Path>, encoding: Option<String>) -> Result<ImportOptions, Box<dyn std::error::Error>> {
    let snapshot = match existing {
        Some(path) => Some(RosterSnapshot::from_json_file(path)?),
        None => None,
    };
    Ok(ImportOptions { snapshot, encoding })
}

fn cmd_import(
    input: &Path,
    existing: Option<&Path>,
    encoding: Option<String>,
    format: OutputFormat,
    output: Option<&Path>,
) -> CmdResult {
    let options = build_options(existing, encoding)?;
    let report = import_file(input, &options)?;

    print_problems(&report.outcome);
    if !report.outcome.is_accepted() {
        return Ok(false);
    }

    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report.outcome.records)?,
        OutputFormat::Csv => records_to_csv(&report.outcome.records)?,
    };
    write_output(&content, output)
}

fn cmd_check(input: &Path, existing: Option<&Path>) -> CmdResult {
    let options = build_options(existing, None)?;
    let report = import_file(input, &options)?;

    print_problems(&report.outcome);
    Ok(report.outcome.is_accepted())
}

async fn cmd_serve(port: Option<u16>) -> CmdResult {
    let mut config = AppConfig::from_env()?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    start_server(config).await?;
    Ok(true)
}

/// Per-row details; the import pipeline has already logged the summary.
fn print_problems(outcome: &ImportOutcome) {
    for warning in &outcome.warnings {
        eprintln!("⚠️  {}", warning);
    }
    for err in &outcome.errors {
        eprintln!("   - {}", err);
    }
}

fn write_output(content: &str, path: Option<&Path>) -> CmdResult {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(true)
}
