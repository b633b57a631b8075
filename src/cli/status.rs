//! Status command handler
//!
//! Shows which providers are configured and whether the server is up.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    if args.server {
        check_server_status(&config).await;
    }

    println!("histoury v{}", env!("CARGO_PKG_VERSION"));
    println!("Config: {}", Config::config_path()?.display());
    println!();

    println!("Landmark detection:");
    println!("  Cloud vision:     {}", enabled(config.vision_key().is_some()));
    match config.model_path() {
        Some(path) if path.exists() => println!("  Local classifier: enabled ({})", path.display()),
        Some(path) => println!("  Local classifier: MISSING ({})", path.display()),
        None => println!("  Local classifier: disabled"),
    }
    match config.landmarks_path() {
        Some(path) => println!("  Landmark table:   {}", path.display()),
        None => println!("  Landmark table:   built-in"),
    }
    println!();

    println!("Nearby search:      {}", enabled(config.places_key().is_some()));
    println!("Summaries:          {}", enabled(config.openai_key().is_some()));
    println!("Provider timeout:   {}s", config.providers.timeout_secs);

    Ok(())
}

fn enabled(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled (no API key)"
    }
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(status) = response.json::<serde_json::Value>().await {
                    if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    if let Some(strategies) = status.get("strategies").and_then(|v| v.as_array()) {
                        let names: Vec<&str> = strategies.iter().filter_map(|s| s.as_str()).collect();
                        println!("  Strategies: {}", names.join(", "));
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
