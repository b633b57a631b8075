//! Landmarks command handler
//!
//! Lists the label -> landmark table used by the local classifier.

use crate::config::Config;
use crate::error::Result;
use crate::server::state::load_landmarks;
use clap::Args;

/// Landmarks command arguments
#[derive(Args)]
pub struct LandmarksArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the landmarks command
pub fn run(args: LandmarksArgs) -> Result<()> {
    let config = Config::load()?;
    let table = load_landmarks(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(table.entries())?);
        return Ok(());
    }

    println!("{} landmarks:", table.len());
    for entry in table.entries() {
        println!("  {:28} {:32} {}", entry.label, entry.name, entry.location);
    }

    Ok(())
}
