//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod landmarks;
pub mod nearby;
pub mod resolve;
pub mod serve;
pub mod status;
pub mod summary;

use crate::error::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Landmark recognition and nearby places tour guide
#[derive(Parser)]
#[command(name = "histoury")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Identify the landmark in a photo
    Resolve(resolve::ResolveArgs),

    /// Find places near a location
    Nearby(nearby::NearbyArgs),

    /// Generate a narrated landmark summary
    Summary(summary::SummaryArgs),

    /// List the landmarks the local classifier knows
    Landmarks(landmarks::LandmarksArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show which services are configured
    Status(status::StatusArgs),
}

/// Install the tracing subscriber, `RUST_LOG` overriding `default_level`
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print `output`, or write it to `path` when given
fn write_output(output: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            eprintln!("Output written to {}", path);
        }
        None => println!("{}", output),
    }
    Ok(())
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(level);

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Resolve(args) => resolve::run(args).await,
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Summary(args) => summary::run(args).await,
        Commands::Landmarks(args) => landmarks::run(args),
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}
