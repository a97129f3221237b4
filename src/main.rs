//! Binary entry point for notion-sync.
//!
//! This binary provides the CLI for importing entry files into a Notion
//! database and exporting the database to a JSON snapshot.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use chrono::Local;
use clap::{Parser, Subcommand};
use notion_sync::io::{load_entries, snapshot_file_name};
use notion_sync::observability;
use notion_sync::{
    ExportReport, ExportService, HttpNotionClient, ImportEvent, ImportOptions, ImportResult,
    ImportService, NotionApi, NotionConfig,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// notion-sync - Push JSON entries into a Notion database and pull it back out.
#[derive(Parser)]
#[command(name = "notion-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Create one page per entry in a JSON file.
    Import {
        /// JSON file holding one entry object or an array of entries.
        file: Option<PathBuf>,

        /// Map entries and print the requests without sending them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Write every database row to a timestamped JSON snapshot.
    Export {
        /// Exact output path.
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<PathBuf>,

        /// Directory for the generated file name.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = observability::init_from_env(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = NotionConfig::load_env_file(cli.env_file.as_deref()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Commands::Import { file, dry_run } => {
            let Some(file) = file else {
                eprintln!("Usage: notion-sync import <FILE> [--dry-run]");
                eprintln!();
                eprintln!("FILE is a JSON file holding one entry object or an array of entries.");
                return ExitCode::FAILURE;
            };
            cmd_import(&file, ImportOptions::default().with_dry_run(dry_run))
        },
        Commands::Export { output, output_dir } => cmd_export(output, output_dir),
    }
}

fn load_config() -> Option<NotionConfig> {
    match NotionConfig::from_env() {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error: {e}");
            None
        },
    }
}

/// Import command.
fn cmd_import(file: &Path, options: ImportOptions) -> ExitCode {
    let Some(config) = load_config() else {
        return ExitCode::FAILURE;
    };

    let batch = match load_entries(file) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        },
    };

    println!("Database ID: {}", config.database_id);
    println!("Processing file: {}", file.display());
    if options.dry_run {
        println!("Dry run: no pages will be created");
    }

    let api: Arc<dyn NotionApi> = Arc::new(HttpNotionClient::new(&config));
    let service = ImportService::new(api, &config);
    let result = service.import_batch(batch, options, Some(&print_import_event));

    print_import_summary(&result);

    if result.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_import_event(event: &ImportEvent<'_>) {
    match event {
        ImportEvent::Started {
            index,
            total,
            entry,
        } => {
            println!();
            println!("[{index}/{total}] Processing: {}", entry.display_name());
        },
        ImportEvent::Created { page, entry, .. } => {
            println!("Page created successfully!");
            println!("  Page ID: {}", page.id);
            println!("  URL: {}", page.url.as_deref().unwrap_or("N/A"));
            println!("  Title: {}", entry.display_name());
        },
        ImportEvent::Mapped { request, .. } => {
            match serde_json::to_string_pretty(request) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("  Could not render request: {e}"),
            }
        },
        ImportEvent::Failed { entry, error, .. } => {
            eprintln!("Failed to create page for {}", entry.display_name());
            eprintln!("  {error}");
        },
    }
}

fn print_import_summary(result: &ImportResult) {
    if result.total <= 1 {
        return;
    }
    println!();
    println!("Batch import completed!");
    println!("  Successful: {}", result.succeeded);
    println!("  Failed: {}", result.failed);
    println!("  Total: {}", result.total);
    for failure in &result.failures {
        println!("  - [{}] {}: {}", failure.index, failure.name, failure.error);
    }
}

/// Export command.
fn cmd_export(output: Option<PathBuf>, output_dir: Option<PathBuf>) -> ExitCode {
    let Some(config) = load_config() else {
        return ExitCode::FAILURE;
    };

    let path = output.unwrap_or_else(|| {
        let name = snapshot_file_name(Local::now());
        output_dir.map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
    });

    println!("Exporting database {}", config.database_id);

    let api: Arc<dyn NotionApi> = Arc::new(HttpNotionClient::new(&config));
    let service = ExportService::new(api, &config);
    let progress = |count: usize| println!("Retrieved {count} pages so far...");

    match service.export_to_file(&path, Some(&progress)) {
        Ok(report) => {
            print_export_summary(&report);
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn print_export_summary(report: &ExportReport) {
    if let Some(error) = &report.fetch_error {
        eprintln!("Warning: export is incomplete: {error}");
    }

    println!();
    println!("Export completed!");
    if let Some(path) = &report.output_path {
        println!("  Output file: {}", path.display());
    }
    println!("  Total pages: {}", report.snapshot.total_pages);
    println!("  File size: {} bytes", report.bytes_written);
    println!("  Export time: {}", report.snapshot.download_time);
    println!(
        "  Complete: {}",
        if report.is_complete() { "yes" } else { "no" }
    );

    if !report.categories.is_empty() {
        println!();
        println!("Category summary:");
        for (category, count) in &report.categories {
            println!("  {category}: {count}");
        }
    }
}
