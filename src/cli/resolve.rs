//! Resolve command handler
//!
//! Identifies the landmark in a photo, optionally listing what is nearby.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::landmark::LandmarkResolution;
use crate::places::validate_radius;
use crate::server::state::{build_finder, build_gateway, load_landmarks};
use clap::Args;
use std::path::PathBuf;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    /// Photo to identify (JPEG, PNG or WebP)
    pub image: PathBuf,

    /// Also search for places around the landmark
    #[arg(long)]
    pub nearby: bool,

    /// Search radius in meters (with --nearby)
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    let config = Config::load()?;
    let format = args.format.unwrap_or_else(|| config.defaults.format.clone());

    let image = tokio::fs::read(&args.image).await.map_err(|e| {
        Error::InvalidImage(format!("Failed to read {}: {}", args.image.display(), e))
    })?;

    let landmarks = load_landmarks(&config)?;
    let gateway = build_gateway(&config, &landmarks)?;
    if gateway.strategy_names().is_empty() {
        return Err(Error::Config(
            "No landmark strategy configured: set api_keys.vision or classifier.model_path"
                .to_string(),
        ));
    }

    let resolution = gateway.resolve(&image).await?;

    if !args.nearby {
        let output = render_resolution(&resolution, &format)?;
        return super::write_output(&output, args.output.as_deref());
    }

    eprintln!(
        "Identified {} at {} ({})",
        resolution.name, resolution.location, resolution.source
    );

    let finder = build_finder(&config)?.ok_or_else(|| {
        Error::Config("--nearby needs api_keys.places or GOOGLE_PLACES_API_KEY".to_string())
    })?;
    let radius = validate_radius(args.radius.unwrap_or(config.defaults.radius))?;
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let result = finder.find_nearby(resolution.location, radius).await;
    let output = formatter.format(&result, Some(&resolution.name))?;
    super::write_output(&output, args.output.as_deref())
}

/// JSON for `json`, a short summary otherwise
fn render_resolution(resolution: &LandmarkResolution, format: &str) -> Result<String> {
    if format.eq_ignore_ascii_case("json") {
        return Ok(serde_json::to_string_pretty(resolution)?);
    }
    Ok(format!(
        "{}\n  Location: {}\n  Source: {}",
        resolution.name, resolution.location, resolution.source
    ))
}
