//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "defaults.language")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (args.key.as_deref(), args.value.as_deref()) {
        (None, _) => show_all_config(&config),

        (Some(key), None) => {
            let value = config.get(key).ok_or_else(|| {
                Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n  {}",
                    key,
                    Config::available_keys().join("\n  ")
                ))
            })?;
            println!("{}", value);
        }

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[defaults]");
    println!("radius = {}", config.defaults.radius);
    println!("format = \"{}\"", config.defaults.format);
    println!("language = \"{}\"", config.defaults.language);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!("audio_dir = \"{}\"", config.server.audio_dir);
    println!();

    println!("[providers]");
    println!("timeout_secs = {}", config.providers.timeout_secs);
    println!("summary_model = \"{}\"", config.providers.summary_model);
    println!();

    println!("[classifier]");
    println!("model_path = \"{}\"", config.classifier.model_path);
    println!("landmarks_path = \"{}\"", config.classifier.landmarks_path);
    println!();

    println!("[api_keys]");
    for (name, value) in [
        ("vision", &config.api_keys.vision),
        ("places", &config.api_keys.places),
        ("openai", &config.api_keys.openai),
    ] {
        println!("{} = {}", name, masked(value));
    }
}

/// Hide a secret, keeping whether it is set
fn masked(value: &str) -> &'static str {
    if value.trim().is_empty() {
        "\"\" # not configured"
    } else {
        "\"***\" # configured"
    }
}
