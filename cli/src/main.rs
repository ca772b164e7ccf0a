use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use momentum_core::config::SiteConfig;

mod app;
mod cli;
mod logging;
mod output;

use crate::app::WaiverOptions;
use crate::cli::{Args, Command};
use crate::output::print_usage_instructions;

/// Main function - Loads configuration and dispatches the subcommand
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load layered configuration (defaults, file, MOMENTUM_* environment)
    let config = match args.config.as_deref() {
        Some(path) => SiteConfig::load_layered(Some(path)),
        None => SiteConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Error loading configuration: {}", e).red());
            return Err(e).context("Failed to load configuration");
        }
    };

    logging::init(config.log_level.as_deref(), args.verbose);
    tracing::debug!("Using site at {}", config.base_url());

    match args.command {
        Some(Command::Chat { url }) => {
            let url = url.unwrap_or_else(|| config.chat_url().to_string());
            app::run_chat(&url).await
        }
        Some(Command::Like { video_id }) => app::run_like(&config, video_id).await,
        Some(Command::CheckDate { date }) => app::run_check_date(date.as_deref()),
        Some(Command::Waiver {
            text,
            standalone,
            page_lines,
            submit_to,
        }) => {
            app::run_waiver(
                &config,
                WaiverOptions {
                    text: &text,
                    standalone,
                    page_lines,
                    submit_to: submit_to.as_deref(),
                },
            )
            .await
        }
        None => {
            print_usage_instructions();
            Ok(())
        }
    }
}
