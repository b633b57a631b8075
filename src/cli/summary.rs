//! Summary command handler

use crate::config::Config;
use crate::error::{Error, Result};
use crate::server::state::build_summary;
use crate::summary::validate_language;
use clap::Args;

/// Summary command arguments
#[derive(Args)]
pub struct SummaryArgs {
    /// Landmark name, e.g. "Hawa Mahal"
    pub landmark: String,

    /// Language code (en, hi, kn, ...)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the summary command
pub async fn run(args: SummaryArgs) -> Result<()> {
    let config = Config::load()?;
    let language = args
        .language
        .unwrap_or_else(|| config.defaults.language.clone());
    validate_language(&language)?;

    let service = build_summary(&config)?.ok_or_else(|| {
        Error::Summary("Summaries need api_keys.openai or OPENAI_API_KEY".to_string())
    })?;

    let summary = service.summarize(&args.landmark, &language).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{} ({})", summary.landmark, summary.language);
    println!();
    println!("{}", summary.text);
    if let Some(file) = &summary.audio_file {
        println!();
        println!("Audio: {}", config.audio_dir().join(file).display());
    }

    Ok(())
}
