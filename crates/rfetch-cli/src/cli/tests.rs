//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_get_defaults() {
    match parse(&["rfetch", "get", "https://example.com/file.iso"]) {
        CliCommand::Get(args) => {
            assert_eq!(args.url, "https://example.com/file.iso");
            assert!(args.output.is_none());
            assert!(!args.stdout);
            assert!(args.headers.is_empty());
            assert!(args.timeout.is_none());
            assert!(args.max_attempts.is_none());
            assert!(!args.sha256);
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_get_with_overrides() {
    match parse(&[
        "rfetch",
        "get",
        "https://example.com/x",
        "-o",
        "out.bin",
        "--max-attempts",
        "3",
        "--base-delay",
        "0.5",
        "--max-delay",
        "10",
        "--timeout",
        "20",
        "-H",
        "Accept: */*",
        "--sha256",
    ]) {
        CliCommand::Get(args) => {
            assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out.bin")));
            assert_eq!(args.max_attempts, Some(3));
            assert_eq!(args.base_delay, Some(0.5));
            assert_eq!(args.max_delay, Some(10));
            assert_eq!(args.timeout, Some(20));
            assert_eq!(args.headers, vec!["Accept: */*".to_string()]);
            assert!(args.sha256);
        }
        _ => panic!("expected Get with overrides"),
    }
}

#[test]
fn cli_get_output_conflicts_with_stdout() {
    let result = Cli::try_parse_from(["rfetch", "get", "https://example.com/x", "-o", "f", "--stdout"]);
    assert!(result.is_err());
}

#[test]
fn cli_parse_probe() {
    match parse(&["rfetch", "probe", "https://example.com/big.iso", "--timeout", "5"]) {
        CliCommand::Probe(args) => {
            assert_eq!(args.url, "https://example.com/big.iso");
            assert_eq!(args.timeout, Some(5));
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["rfetch", "completions", "bash"]) {
        CliCommand::Completions { shell } => {
            assert_eq!(shell, clap_complete::Shell::Bash);
        }
        _ => panic!("expected Completions"),
    }
}
