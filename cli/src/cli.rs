use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terminal client for the Momentum Clips site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Path to a config file (defaults to ~/.config/momentum/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with the site's AI assistant
    Chat {
        /// WebSocket URL of the chat namespace
        #[arg(long)]
        url: Option<String>,
    },

    /// Like a video in the gallery
    Like {
        /// Numeric id of the video
        video_id: u64,
    },

    /// Check a booking date (YYYY-MM-DDTHH:MM) against the booking window
    CheckDate {
        /// Date to check; prints the allowed range when omitted
        date: Option<String>,
    },

    /// Read and sign a liability waiver in the terminal
    Waiver {
        /// File holding the waiver text
        text: PathBuf,

        /// Also ask for the client's name and email
        #[arg(long, default_value_t = false)]
        standalone: bool,

        /// Lines shown per page while reading
        #[arg(long, default_value_t = 20)]
        page_lines: usize,

        /// Site path to post the signed form to, e.g. /payment/waiver/basic
        #[arg(long)]
        submit_to: Option<String>,
    },
}
