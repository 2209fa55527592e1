//! CLI for the rfetch resilient HTTP fetcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rfetch_core::config;

use commands::{run_completions, run_get, run_probe, GetArgs, ProbeArgs};

/// Top-level CLI for rfetch.
#[derive(Debug, Parser)]
#[command(name = "rfetch")]
#[command(about = "rfetch: resilient single-shot HTTP fetcher with retry and backoff", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URL with retry and save or print the body.
    Get(GetArgs),

    /// Probe a URL with HEAD and print response metadata.
    Probe(ProbeArgs),

    /// Generate a shell completion script on stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get(args) => run_get(&cfg, args).await?,
            CliCommand::Probe(args) => run_probe(&cfg, args).await?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
