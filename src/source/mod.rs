// src/source/mod.rs
// =============================================================================
// This module supplies raw HTML bytes to the scanner.
//
// A source is one of:
// - "-"                 : read the page from stdin
// - "http(s)://..."     : download the page
// - anything else       : a path to an HTML file on disk
//
// Submodules:
// - fetch: loads many sources concurrently (files, stdin, HTTP)
// =============================================================================

mod fetch;

pub use fetch::{load_all, load_source, FetchConfig, HostLimiter, DEFAULT_USER_AGENT};

use anyhow::{anyhow, Result};
use std::fmt;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Url(Url),
}

impl Source {
    // Classifies one command-line argument
    pub fn parse(arg: &str) -> Result<Self> {
        if arg == "-" {
            return Ok(Source::Stdin);
        }

        // Schemes are case-insensitive: HTTP://Example.com is still a URL
        let lowered = arg.get(..8).unwrap_or(arg).to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            let url = Url::parse(arg).map_err(|e| anyhow!("Invalid URL '{}': {}", arg, e))?;
            return Ok(Source::Url(url));
        }

        if arg.is_empty() {
            return Err(anyhow!("Empty source"));
        }

        Ok(Source::File(PathBuf::from(arg)))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "-"),
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}
