//! opencage-search CLI entry point
//!
//! OpenCage search source - CLI + web API

use opencage_search::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
