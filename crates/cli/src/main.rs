//! # vinylvision: Record Sleeve Metadata from a Photo
//!
//! This is the main entry point for the `vinylvision` command-line interface.
//! The binary is a thin entrypoint; all logic lives in the library crate.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use vinylvision_cli::{run, Cli};

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Setup logging
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vinylvision=info,vinylvision_cli=info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Call the library's run function and handle the final result
    if let Err(e) = run(cli).await {
        eprintln!("[vinylvision error] {e:?}");
        std::process::exit(1);
    }

    Ok(())
}
