//! histoury CLI entry point
//!
//! Landmark recognition and nearby places - CLI + web API

use histoury::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
