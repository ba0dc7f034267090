//! # `vinylvision` CLI Library
//!
//! Argument parsing and command handling for the `vinylvision` binary. One
//! invocation scans one sleeve photo.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use vinylvision::{
    config::{load_config, ConfigOverrides},
    providers::factory::create_providers,
    Outcome, ProcessOptions, SleeveScanner,
};

// --- CLI Argument Structs ---

/// Extract artist, title, year and catalog number from a photo of a record sleeve.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the image file.
    pub image: PathBuf,
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,
    /// Include the image in the request to the vision API.
    #[arg(long)]
    pub send_image: bool,
    /// Look up a Discogs price suggestion for the extracted release.
    #[arg(long)]
    pub lookup_price: bool,
    /// Optional path to save the extracted metadata as JSON.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Override the vision model from the configuration.
    #[arg(long)]
    pub model: Option<String>,
    /// Override the prompt template; `{ocr_text}` is replaced with the OCR result.
    #[arg(long)]
    pub prompt_template: Option<String>,
    /// Override the API key from the configuration and environment.
    #[arg(long)]
    pub api_key: Option<String>,
    /// Open the original image in the default viewer after processing.
    #[arg(long)]
    pub show: bool,
}

// --- Public Entrypoint ---

/// Runs one scan as described by the parsed arguments.
pub async fn run(cli: Cli) -> Result<()> {
    info!("Starting scan of {:?}", cli.image);

    let config = load_config(&cli.config)?;
    let settings = config.resolve(&ConfigOverrides {
        api_key: cli.api_key.clone(),
        model: cli.model.clone(),
        prompt_template: cli.prompt_template.clone(),
    });
    let providers = create_providers(&settings).context("Failed to set up providers")?;

    let scanner = SleeveScanner::new(
        &providers.ocr,
        &providers.vision,
        settings.prompt_template.clone(),
    )
    .with_price_source(&providers.prices, settings.discogs_token.clone());
    let options = ProcessOptions {
        send_image: cli.send_image,
        lookup_price: cli.lookup_price,
    };

    let session = scanner
        .process(&cli.image, options)
        .await
        .with_context(|| format!("Failed to process '{}'", cli.image.display()))?;

    match &session.vision_outcome {
        Outcome::Found(metadata) => {
            println!("{}", serde_json::to_string_pretty(metadata)?);
        }
        other => eprintln!("No metadata extracted ({other})."),
    }

    if let Some(outcome) = &session.price_outcome {
        match outcome {
            Outcome::Found(price) => println!("Lowest suggested price: {price:.2} EUR"),
            other => eprintln!("Price unavailable ({other})."),
        }
    }

    if let Some(output) = &cli.output {
        if session.save_response(output)? {
            println!("Saved metadata to '{}'.", output.display());
        }
    }

    if cli.show {
        if let Err(e) = session.show_image() {
            warn!("Could not display image: {e}");
        }
    }

    Ok(())
}
