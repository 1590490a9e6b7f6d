// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, so stdout stays clean for JSON/raw output)
// 2. Parse command-line arguments using clap
// 3. Load every page, run the scanner, parse the schema
// 4. Print the reports and exit with a proper code
//    (0 = every page had a complete recipe, 1 = some did not, 2 = error)
//
// Rust concepts used:
// - async/await: pages (especially URLs) are loaded concurrently
// - Result<T, E>: every fallible step returns a Result and uses `?`
// - Traits: output goes through `impl Write`, so tests can capture it
// =============================================================================

// Module declarations - only the CLI lives in the binary,
// everything else comes from the library half (src/lib.rs)
mod cli;

// anyhow::Result is like std::result::Result but lets us return any error
use anyhow::Result;
// Parser trait enables Cli::parse()
use clap::Parser;
use std::io::{self, Write};
// info! writes a log line to stderr when RUST_LOG allows it
use tracing::info;

use cli::{Cli, Commands};
// The scanner is used through schema::process_document
use schema_extractor::schema::{self, PageReport, PageStatus};
use schema_extractor::source::{self, FetchConfig, Source};

// The #[tokio::main] attribute transforms our async main into a real main function
#[tokio::main]
async fn main() {
    // Log level comes from RUST_LOG (e.g. RUST_LOG=debug), default "info"
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole anyhow context chain
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every page had a complete recipe
//   Ok(1) = at least one page did not
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments (handles --help, --version, etc.)
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { sources, json, raw, fetch } => {
            // clap already rejects --json together with --raw
            let format = if json {
                OutputFormat::Json
            } else if raw {
                OutputFormat::Raw
            } else {
                OutputFormat::Table
            };
            // fetch.into() turns the CLI flags into a FetchConfig
            handle_scan(&sources, format, fetch.into()).await
        }
        Commands::Check { source, json, fetch } => handle_check(&source, json, fetch.into()).await,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
    Raw,
}

// Handles the 'scan' subcommand
// Parameters:
//   args: raw source arguments (paths, URLs, "-")
//   format: how to print the reports
//   config: concurrency / timeout / politeness settings
async fn handle_scan(args: &[String], format: OutputFormat, config: FetchConfig) -> Result<i32> {
    // Classify every argument first, so a bad URL fails before any download
    let sources = parse_sources(args)?;

    info!("Scanning {} page(s)", sources.len());
    let reports = scan_sources(sources, &config).await?;

    print_results(&reports, format)?;

    Ok(exit_code(&reports))
}

// Handles the 'check' subcommand (exactly one page)
async fn handle_check(arg: &str, json: bool, config: FetchConfig) -> Result<i32> {
    let source = Source::parse(arg)?;
    let reports = scan_sources(vec![source], &config).await?;

    if json {
        print_results(&reports, OutputFormat::Json)?;
    } else {
        for report in &reports {
            println!("{}: {}", report.source, report.status);
            if let Some(message) = &report.message {
                println!("   {}", message);
            }
        }
    }

    Ok(exit_code(&reports))
}

fn parse_sources(args: &[String]) -> Result<Vec<Source>> {
    // collect::<Result<Vec<_>>>() stops at the first bad argument
    let sources = args.iter().map(|arg| Source::parse(arg)).collect::<Result<Vec<_>>>()?;

    // stdin can only be read once
    let stdin_count = sources.iter().filter(|s| **s == Source::Stdin).count();
    if stdin_count > 1 {
        anyhow::bail!("'-' (stdin) can only be given once");
    }

    Ok(sources)
}

// Loads every source and turns it into a report
async fn scan_sources(sources: Vec<Source>, config: &FetchConfig) -> Result<Vec<PageReport>> {
    // Loading is concurrent; the results come back in argument order
    let loaded = source::load_all(sources, config).await?;

    // Scanning is pure CPU work on bytes we already hold, so it runs inline
    let reports = loaded
        .into_iter()
        .map(|(source, result)| {
            let name = source.to_string();
            match result {
                Ok(html) => schema::process_document(&name, &html),
                Err(e) => PageReport::failed(name, PageStatus::DownloadFailed, format!("{:#}", e)),
            }
        })
        .collect::<Vec<_>>();

    // Count how many pages carried a complete recipe
    let extracted = reports.iter().filter(|r| r.is_ok()).count();
    info!("Extracted {} of {} page(s)", extracted, reports.len());

    Ok(reports)
}

fn exit_code(reports: &[PageReport]) -> i32 {
    if reports.iter().all(PageReport::is_ok) {
        0
    } else {
        1
    }
}

// Prints the reports to stdout in the chosen format
fn print_results(reports: &[PageReport], format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_results(&mut out, reports, format)
}

fn write_results(out: &mut impl Write, reports: &[PageReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json_output = serde_json::to_string_pretty(reports)?;
            writeln!(out, "{}", json_output)?;
        }
        OutputFormat::Raw => {
            // Pages without a block print nothing
            for block in reports.iter().filter_map(|r| r.schema.as_deref()) {
                writeln!(out, "{}", block)?;
            }
        }
        OutputFormat::Table => write_table(out, reports)?,
    }
    Ok(())
}

// Human-readable table plus a short summary
fn write_table(out: &mut impl Write, reports: &[PageReport]) -> io::Result<()> {
    writeln!(out, "{:<50} {:<20} {:<12} {:<30}", "SOURCE", "STATUS", "BYTES", "RECIPE")?;
    writeln!(out, "{}", "=".repeat(112))?;

    for report in reports {
        let source_display = truncate(&report.source, 47);
        let bytes = report
            .window
            .map(|(start, end)| (end - start).to_string())
            .unwrap_or_else(|| "-".to_string());
        let recipe_name = report.recipe.as_ref().and_then(schema::title).unwrap_or_default();

        writeln!(
            out,
            "{:<50} {:<20} {:<12} {:<30}",
            source_display, report.status, bytes, recipe_name
        )?;
    }

    writeln!(out)?;

    let ok_count = reports.iter().filter(|r| r.is_ok()).count();
    writeln!(out, "Summary:")?;
    writeln!(out, "   Extracted: {}", ok_count)?;
    writeln!(out, "   Missing:   {}", reports.len() - ok_count)?;
    writeln!(out, "   Total:     {}", reports.len())?;
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why write_results(out: &mut impl Write, ...) instead of println!?
//    - println! always goes to stdout, which tests cannot see
//    - Writing into `impl Write` lets the real program pass stdout and the
//      tests pass a Vec<u8>
//    - writeln! returns io::Result, so `?` reports a closed pipe as an error
//
// 2. Why does main() call std::process::exit?
//    - The exit code tells scripts and CI whether every page had a recipe
// -----------------------------------------------------------------------------
