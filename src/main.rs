//! wamon - A terminal dashboard for WhatsApp gateway instances
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;

use wamon_app::Settings;
use wamon_core::prelude::*;

/// wamon - A terminal dashboard for WhatsApp gateway instances
#[derive(Parser, Debug)]
#[command(name = "wamon")]
#[command(about = "A terminal dashboard for WhatsApp gateway instances", long_about = None)]
struct Args {
    /// Gateway base URL (overrides config file and WAMON_GATEWAY_URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Gateway API key (overrides config file and WAMON_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Explicit config file instead of the wamon.toml lookup
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    wamon_core::logging::init()?;

    // Precedence: CLI flags > environment > config file > defaults
    let mut settings = match &args.config {
        Some(path) => {
            let mut settings = Settings::load_from(path)?;
            settings.apply_env_from(|key| std::env::var(key).ok());
            settings
        }
        None => Settings::load()?,
    };

    settings.apply_cli(args.base_url, args.api_key);

    wamon_tui::run(settings).await
}
