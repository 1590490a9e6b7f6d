// src/source/fetch.rs
// =============================================================================
// This module loads page contents from files, stdin or the web.
//
// Key functionality:
// - Reads files and stdin with tokio's async IO
// - Downloads URLs with one shared reqwest client (browser-like headers)
// - Runs loads concurrently with a limit
// - Stays polite: one request at a time per host, with a minimum gap
//
// Pages are returned as raw bytes: the scanner works on bytes, and plenty of
// real pages are not valid UTF-8.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::Source;

pub const DEFAULT_USER_AGENT: &str = "schema-extractor (recipe schema indexer)";

// Settings for loading pages
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// How many sources are loaded at once
    pub concurrency: usize,
    /// Per-request timeout for URL sources
    pub timeout: Duration,
    pub user_agent: String,
    /// Minimum time between the starts of two requests to the same host
    pub host_interval: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 16,
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            host_interval: Duration::from_millis(1000),
        }
    }
}

// Headers sent with every download, so sites serve the same HTML a browser
// would get
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.5"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .default_headers(default_headers())
        .user_agent(config.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .context("Failed to create HTTP client")
}

// Serializes requests per host.
//
// Each host gets its own single-permit semaphore. The permit is held for the
// request plus whatever is left of `interval`, so two requests to one host
// start at least `interval` apart while other hosts proceed in parallel.
pub struct HostLimiter {
    interval: Duration,
    hosts: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl HostLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    async fn semaphore(&self, host: &str) -> Arc<Semaphore> {
        self.hosts
            .lock()
            .await
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(1)))
            .clone()
    }

    // Runs `task` once `host` is free, then keeps the host busy until
    // `interval` has passed since the task started
    pub async fn run<F, T>(&self, host: &str, task: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        let semaphore = self.semaphore(host).await;
        let _permit = semaphore
            .acquire_owned()
            .await
            .map_err(|e| anyhow!("Host limiter closed for {}: {}", host, e))?;

        let start = Instant::now();
        let output = task.await;

        let elapsed = start.elapsed();
        if elapsed < self.interval {
            sleep(self.interval - elapsed).await;
        }

        Ok(output)
    }
}

// Loads all sources, up to `config.concurrency` at a time.
//
// Returns one entry per source, in the same order as `sources`. A failed load
// is reported in its entry; only a failure to set up the HTTP client aborts
// the whole batch.
pub async fn load_all(
    sources: Vec<Source>,
    config: &FetchConfig,
) -> Result<Vec<(Source, Result<Vec<u8>>)>> {
    let client = build_client(config)?;
    let limiter = Arc::new(HostLimiter::new(config.host_interval));

    let futures = sources.into_iter().map(|source| {
        let client = client.clone();
        let limiter = limiter.clone();
        async move {
            // Only downloads go through the limiter; files and stdin are local
            let result = match &source {
                Source::Url(url) => {
                    let host = url.host_str().unwrap_or_default().to_string();
                    limiter
                        .run(&host, load_source(&client, &source))
                        .await
                        .and_then(|result| result)
                }
                _ => load_source(&client, &source).await,
            };
            if let Err(e) = &result {
                warn!("Failed to load {}: {:#}", source, e);
            }
            (source, result)
        }
    });

    // `buffered` (not `buffer_unordered`) keeps reports in argument order
    let results = stream::iter(futures)
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    Ok(results)
}

// Loads a single source
#[tracing::instrument(skip(client, source), fields(source = %source))]
pub async fn load_source(client: &Client, source: &Source) -> Result<Vec<u8>> {
    let bytes = match source {
        Source::Stdin => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
        Source::File(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        Source::Url(url) => fetch_page(client, url.as_str()).await?,
    };

    debug!(bytes = bytes.len(), "loaded");
    Ok(bytes)
}

// Downloads a web page and returns its body
async fn fetch_page(client: &Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    let body = response.bytes().await?;
    Ok(body.to_vec())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why bytes instead of String?
//    - response.text() and read_to_string() fail or rewrite invalid UTF-8
//    - The scanner only cares about ASCII tags and markers, so bytes are enough
//    - The schema module converts only the extracted block to text
//
// 2. What does `.context(...)` do?
//    - It comes from anyhow::Context
//    - Wraps the underlying error with a readable message
//    - `{:#}` when printing shows the whole chain: "Failed to read x: No such file"
//
// 3. Why hold the semaphore permit while sleeping?
//    - `_permit` is released when it is dropped at the end of run()
//    - Sleeping first keeps the next request to that host waiting, which is
//      what spaces the requests out
//
// 4. Why clone the client?
//    - Client is an Arc internally, cloning is cheap
//    - Each async block needs its own handle to move into
// -----------------------------------------------------------------------------
