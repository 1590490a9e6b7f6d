// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). The `env` feature lets
// each loading option also come from an environment variable, so the tool
// can be configured in CI without touching the command line.
// =============================================================================

// Parser: the top-level struct, Subcommand: the enum of commands,
// Args: a group of flags we can #[command(flatten)] into several commands
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

// FetchArgs converts into the library's FetchConfig (see the From impl below)
use schema_extractor::source::{FetchConfig, DEFAULT_USER_AGENT};

// This struct represents our entire CLI application
// #[derive(Parser)] tells clap to generate the parsing code
#[derive(Parser, Debug)]
#[command(
    name = "schema-extractor",
    version = "0.1.0",
    about = "Extract embedded JSON-LD recipe schemas from HTML pages",
    long_about = "schema-extractor finds the first <script> block that carries a schema marker \
                  (\"schema\" or \"@type\": \"Recipe\") in each page and prints the Recipe inside it. \
                  Pages can be local files, URLs, or '-' for stdin."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

// Each variant is a subcommand; its fields become that subcommand's arguments
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract schemas from one or more pages
    ///
    /// Example: schema-extractor scan naan.html https://example.com/dal
    Scan {
        /// Pages to scan: file paths, http(s) URLs, or '-' for stdin
        #[arg(required = true)]
        sources: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long, conflicts_with = "raw")]
        json: bool,

        /// Print only the raw extracted blocks, one per page
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Check a single page and exit 0 only if it carries a recipe
    ///
    /// Example: schema-extractor check https://example.com/naan
    Check {
        /// File path, http(s) URL, or '-' for stdin
        source: String,

        /// Output the report in JSON format
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

// Options for how pages are loaded
//
// Every flag can also be set through the environment variable named in
// `env = ...`; an explicit flag wins over the variable, which wins over the
// default.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Maximum number of pages loaded at the same time
    #[arg(long, env = "SCHEMA_EXTRACTOR_CONCURRENCY", default_value_t = 16)]
    pub concurrency: usize,

    /// Timeout per download, in seconds
    #[arg(long, env = "SCHEMA_EXTRACTOR_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// User-Agent header sent with downloads
    #[arg(long, env = "SCHEMA_EXTRACTOR_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Minimum gap between two downloads from the same host, in milliseconds
    #[arg(long, env = "SCHEMA_EXTRACTOR_HOST_INTERVAL_MS", default_value_t = 1000)]
    pub host_interval_ms: u64,
}

// Lets handlers write `fetch.into()` to get a FetchConfig
impl From<FetchArgs> for FetchConfig {
    fn from(args: FetchArgs) -> Self {
        FetchConfig {
            concurrency: args.concurrency,
            timeout: Duration::from_secs(args.timeout_secs),
            user_agent: args.user_agent,
            host_interval: Duration::from_millis(args.host_interval_ms),
        }
    }
}
