//! `rfetch get <url>` – fetch with retry, then save or print the body.

use anyhow::{Context, Result};
use clap::Args;
use rfetch_core::checksum;
use rfetch_core::config::RfetchConfig;
use rfetch_core::control::AbortToken;
use rfetch_core::fetch::fetch_with_retry;
use rfetch_core::filename::derive_filename;
use std::io::Write;
use std::path::PathBuf;

use super::support;

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Direct HTTP/HTTPS URL to fetch.
    pub url: String,

    /// Output path. Defaults to a name derived from the response and URL.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the body to stdout instead of a file.
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Extra request header, "Name: value". Repeatable.
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Per-attempt timeout in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum attempts, including the first (overrides config).
    #[arg(long, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Base backoff delay in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    pub base_delay: Option<f64>,

    /// Backoff delay cap in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    pub max_delay: Option<u64>,

    /// Print the SHA-256 of the fetched body.
    #[arg(long)]
    pub sha256: bool,
}

pub async fn run_get(cfg: &RfetchConfig, args: GetArgs) -> Result<()> {
    let req = support::build_request(cfg, &args.url, &args.headers, args.timeout)?;
    let policy = support::build_policy(cfg, args.max_attempts, args.base_delay, args.max_delay);
    let abort = AbortToken::new();
    support::spawn_ctrl_c(abort.clone());

    // The executor is blocking (curl Easy); keep it off the runtime threads.
    let resp = tokio::task::spawn_blocking(move || fetch_with_retry(&req, &policy, &abort))
        .await
        .context("fetch task panicked")??;

    if args.stdout {
        std::io::stdout().write_all(&resp.body)?;
    } else {
        let path = match args.output {
            Some(p) => p,
            None => PathBuf::from(derive_filename(
                &args.url,
                resp.meta.content_disposition.as_deref(),
            )),
        };
        std::fs::write(&path, &resp.body)
            .with_context(|| format!("write {}", path.display()))?;
        println!(
            "Saved {} ({} bytes, HTTP {})",
            path.display(),
            resp.body.len(),
            resp.status
        );
    }

    if args.sha256 {
        println!("sha256: {}", checksum::sha256_bytes(&resp.body));
    }

    Ok(())
}
