//! Integration tests for CLI
//!
//! These tests verify CLI functionality without running actual commands,
//! but instead test the command parsing and structure.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

// Mock CLI structure for testing (mirrors main.rs)
#[derive(Parser)]
#[command(name = "lifeline-cli")]
#[command(author, version, about = "Emergency shelter guidance", long_about = None)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Guide {
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        #[arg(long)]
        token: String,
        #[arg(long)]
        json: bool,
    },
    Link {
        name: String,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, requires = "from_lng", allow_hyphen_values = true)]
        from_lat: Option<f64>,
        #[arg(long, requires = "from_lat", allow_hyphen_values = true)]
        from_lng: Option<f64>,
    },
    CheckConfig,
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_guide_with_coordinates() {
    let cli = parse_args(&[
        "lifeline-cli",
        "guide",
        "--lat",
        "35.6896",
        "--lng",
        "139.7006",
        "--token",
        "id-token-123",
    ])
    .unwrap();

    if let Commands::Guide {
        lat,
        lng,
        token,
        json,
    } = cli.command
    {
        assert_eq!(lat, Some(35.6896));
        assert_eq!(lng, Some(139.7006));
        assert_eq!(token, "id-token-123");
        assert!(!json);
    } else {
        panic!("Expected Guide command");
    }
}

#[test]
fn cli_parses_guide_without_coordinates() {
    let cli = parse_args(&["lifeline-cli", "guide", "--token", "t", "--json"]).unwrap();
    if let Commands::Guide { lat, lng, json, .. } = cli.command {
        assert!(lat.is_none());
        assert!(lng.is_none());
        assert!(json);
    } else {
        panic!("Expected Guide command");
    }
}

#[test]
fn cli_guide_accepts_negative_coordinates() {
    let cli = parse_args(&[
        "lifeline-cli",
        "guide",
        "--lat",
        "-33.8688",
        "--lng",
        "151.2093",
        "--token",
        "t",
    ])
    .unwrap();
    if let Commands::Guide { lat, .. } = cli.command {
        assert_eq!(lat, Some(-33.8688));
    } else {
        panic!("Expected Guide command");
    }
}

#[test]
fn cli_guide_lat_requires_lng() {
    let result = parse_args(&["lifeline-cli", "guide", "--lat", "35.0", "--token", "t"]);
    assert!(result.is_err());
}

#[test]
fn cli_guide_requires_token() {
    let result = parse_args(&["lifeline-cli", "guide"]);
    assert!(result.is_err());
}

#[test]
fn cli_guide_rejects_non_numeric_latitude() {
    let result = parse_args(&[
        "lifeline-cli",
        "guide",
        "--lat",
        "north",
        "--lng",
        "139.7",
        "--token",
        "t",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_link_search() {
    let cli = parse_args(&["lifeline-cli", "link", "Shinjuku Sports Center"]).unwrap();
    if let Commands::Link {
        name,
        address,
        from_lat,
        ..
    } = cli.command
    {
        assert_eq!(name, "Shinjuku Sports Center");
        assert!(address.is_none());
        assert!(from_lat.is_none());
    } else {
        panic!("Expected Link command");
    }
}

#[test]
fn cli_parses_link_with_origin() {
    let cli = parse_args(&[
        "lifeline-cli",
        "link",
        "Shinjuku Sports Center",
        "--address",
        "3-5-1 Okubo",
        "--from-lat",
        "35.6896",
        "--from-lng",
        "139.7006",
    ])
    .unwrap();
    if let Commands::Link {
        address,
        from_lat,
        from_lng,
        ..
    } = cli.command
    {
        assert_eq!(address.as_deref(), Some("3-5-1 Okubo"));
        assert_eq!(from_lat, Some(35.6896));
        assert_eq!(from_lng, Some(139.7006));
    } else {
        panic!("Expected Link command");
    }
}

#[test]
fn cli_parses_check_config_with_global_config() {
    let cli = parse_args(&["lifeline-cli", "check-config", "--config", "/etc/lifeline.toml"])
        .unwrap();
    assert!(matches!(cli.command, Commands::CheckConfig));
    assert_eq!(cli.config, Some(PathBuf::from("/etc/lifeline.toml")));
}

#[test]
fn cli_verbose_flag() {
    let cli = parse_args(&["lifeline-cli", "-vv", "check-config"]).unwrap();
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_verbose_default() {
    let cli = parse_args(&["lifeline-cli", "check-config"]).unwrap();
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_requires_subcommand() {
    let result = parse_args(&["lifeline-cli"]);
    assert!(result.is_err());
}

#[test]
fn cli_unknown_command() {
    let result = parse_args(&["lifeline-cli", "evacuate"]);
    assert!(result.is_err());
}

#[test]
fn cli_help_flag() {
    let result = parse_args(&["lifeline-cli", "--help"]);
    assert!(result.is_err()); // --help causes early exit with error
}

#[test]
fn cli_version_flag() {
    let result = parse_args(&["lifeline-cli", "--version"]);
    assert!(result.is_err()); // --version causes early exit with error
}
