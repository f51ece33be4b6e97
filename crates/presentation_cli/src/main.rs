//! Lifeline CLI
//!
//! Finds the recommended evacuation shelter for a position and prints the
//! way there.

#![allow(clippy::print_stdout)]

mod render;
mod wiring;

use std::path::PathBuf;

use application::{GuidanceOutcome, RouteOrigin, route_link, search_link};
use clap::{Parser, Subcommand};
use domain::entities::ResolvedPlace;
use domain::value_objects::GeoLocation;
use infrastructure::{AppConfig, ConfigError, init_tracing};
use secrecy::SecretString;
use tracing::debug;

/// Lifeline CLI
#[derive(Parser)]
#[command(name = "lifeline-cli")]
#[command(author, version, about = "Emergency shelter guidance", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./lifeline.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a shelter and compute the walking route to it
    ///
    /// Example: lifeline-cli guide --lat 35.6896 --lng 139.7006
    Guide {
        /// Current latitude; omit to use the configured provider
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Current longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Identity token for the recommendation backend
        #[arg(long, env = "LIFELINE_TOKEN", hide_env_values = true)]
        token: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a Google Maps link for a facility without calling any service
    ///
    /// With an origin, a walking-directions link; otherwise a search link.
    Link {
        /// Facility name
        name: String,

        /// Facility address, used as the destination when given
        #[arg(long)]
        address: Option<String>,

        /// Origin latitude
        #[arg(long, requires = "from_lng", allow_hyphen_values = true)]
        from_lat: Option<f64>,

        /// Origin longitude
        #[arg(long, requires = "from_lat", allow_hyphen_values = true)]
        from_lng: Option<f64>,
    },

    /// Load and validate the configuration
    CheckConfig,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log filter: `-v` flags override the configured level
fn log_filter(verbose: u8, configured: &str) -> String {
    if verbose == 0 {
        configured.to_string()
    } else {
        log_filter_from_verbosity(verbose).to_string()
    }
}

/// Parse an optional coordinate pair given on the command line
fn coordinates(lat: Option<f64>, lng: Option<f64>) -> anyhow::Result<Option<GeoLocation>> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(GeoLocation::new(lat, lng)?)),
        _ => Ok(None),
    }
}

/// Link for the `link` command
fn facility_link(
    name: &str,
    address: Option<String>,
    origin: Option<GeoLocation>,
) -> String {
    match origin {
        Some(origin) => {
            let place = ResolvedPlace::new(name, address, None);
            route_link(RouteOrigin::Coordinates(origin), &place)
        },
        None => search_link(name),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(
        &log_filter(cli.verbose, &config.logging.level),
        config.logging.format,
    )?;

    match cli.command {
        Commands::Guide {
            lat,
            lng,
            token,
            json,
        } => {
            config.validate()?;
            let position = coordinates(lat, lng)?;
            let service = wiring::build_service(&config, position)?;

            let outcome = service.start_evacuation(SecretString::from(token)).await;
            debug!(state = %outcome.state(), "Guidance finished");

            // Route origin of the run: the live position, else the fallback.
            let origin = service
                .last_known_position()
                .or_else(|| config.location.default_location())
                .unwrap_or_else(GeoLocation::shinjuku);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&render::render_json(&outcome, origin))?
                );
            } else {
                print!("{}", render::render_text(&outcome, origin));
            }

            if !matches!(outcome, GuidanceOutcome::Done(_)) {
                std::process::exit(1);
            }
        },

        Commands::Link {
            name,
            address,
            from_lat,
            from_lng,
        } => {
            let origin = coordinates(from_lat, from_lng)?;
            println!("{}", facility_link(&name, address, origin));
        },

        Commands::CheckConfig => match config.validate() {
            Ok(()) => {
                println!("✅ Configuration OK");
                println!("   Positioning: {}", config.location.provider);
                println!("   Contract: {}", config.recommendation.contract);
                println!(
                    "   Routing: {}",
                    if config.routing.enabled { "enabled" } else { "disabled" }
                );
            },
            Err(ConfigError::Invalid(problems)) => {
                println!("❌ Configuration invalid:");
                for problem in problems {
                    println!("   - {problem}");
                }
                std::process::exit(1);
            },
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
