//! `rfetch probe <url>` – HEAD probe, prints response metadata.

use anyhow::{Context, Result};
use clap::Args;
use rfetch_core::config::RfetchConfig;
use rfetch_core::control::AbortToken;
use rfetch_core::fetch::head_with_retry;

use super::support;

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Direct HTTP/HTTPS URL to probe.
    pub url: String,

    /// Extra request header, "Name: value". Repeatable.
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Per-attempt timeout in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

pub async fn run_probe(cfg: &RfetchConfig, args: ProbeArgs) -> Result<()> {
    let req = support::build_request(cfg, &args.url, &args.headers, args.timeout)?;
    let policy = cfg.retry.policy();
    let abort = AbortToken::new();
    support::spawn_ctrl_c(abort.clone());

    let resp = tokio::task::spawn_blocking(move || head_with_retry(&req, &policy, &abort))
        .await
        .context("probe task panicked")??;

    println!("HTTP {}", resp.status);
    match resp.meta.content_length {
        Some(n) => println!("content-length: {}", n),
        None => println!("content-length: unknown"),
    }
    println!(
        "accept-ranges: {}",
        if resp.meta.accept_ranges { "bytes" } else { "no" }
    );
    if let Some(ct) = &resp.meta.content_type {
        println!("content-type: {}", ct);
    }
    if let Some(etag) = &resp.meta.etag {
        println!("etag: {}", etag);
    }
    if let Some(lm) = &resp.meta.last_modified {
        println!("last-modified: {}", lm);
    }
    if let Some(cd) = &resp.meta.content_disposition {
        println!("content-disposition: {}", cd);
    }

    Ok(())
}
