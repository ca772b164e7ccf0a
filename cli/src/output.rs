use colored::*;
use momentum_chat::{ChatView, NoticeLevel};
use momentum_core::{GateStatus, WaiverSurface};
use std::io::{self, Write};

/// Streams the chat transcript to the terminal.
///
/// User messages are already on screen as typed input, so only the
/// assistant side and notices are printed.
#[derive(Debug, Default)]
pub struct TerminalChatView {
    typing_shown: bool,
}

impl TerminalChatView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatView for TerminalChatView {
    type Placeholder = ();

    fn append_user_message(&mut self, _text: &str) {}

    fn open_assistant_message(&mut self) -> Self::Placeholder {
        print!("{}: ", "Assistant".blue().bold());
        let _ = io::stdout().flush();
    }

    fn append_chunk(&mut self, _placeholder: &mut (), chunk: &str) {
        print!("{}", chunk);
        let _ = io::stdout().flush();
    }

    fn finish_assistant_message(&mut self, _placeholder: ()) {
        println!();
    }

    fn show_typing(&mut self) {
        if !self.typing_shown {
            println!("{}", "Assistant is typing...".dimmed());
            self.typing_shown = true;
        }
    }

    fn hide_typing(&mut self) {
        self.typing_shown = false;
    }

    fn append_notice(&mut self, level: NoticeLevel, text: &str) {
        match level {
            NoticeLevel::Info => println!("{}", text.dimmed()),
            NoticeLevel::Warning => println!("{}", text.yellow()),
            NoticeLevel::Error => eprintln!("{}", text.red()),
        }
    }

    fn reset(&mut self, greeting: &str) {
        self.typing_shown = false;
        println!();
        println!("{}: {}", "Assistant".blue().bold(), greeting);
    }
}

/// Prints waiver gate changes as they happen
#[derive(Debug, Default)]
pub struct TerminalWaiverSurface {
    last_status: Option<GateStatus>,
    locked: Option<bool>,
    submit_enabled: bool,
}

impl TerminalWaiverSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }
}

impl WaiverSurface for TerminalWaiverSurface {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn show_status(&mut self, status: GateStatus) {
        if self.last_status == Some(status) {
            return;
        }
        self.last_status = Some(status);
        if status.is_ready() {
            println!("{}", status.message().green().bold());
        } else {
            println!("{}", status.message().yellow());
        }
    }

    fn set_inputs_locked(&mut self, locked: bool) {
        if self.locked == Some(locked) {
            return;
        }
        self.locked = Some(locked);
        if !locked {
            println!("{}", "Signature fields unlocked".cyan());
        }
    }

    fn mark_fully_read(&mut self) {
        println!("{}", "✓ You have read the entire waiver".green());
    }

    fn hide_scroll_indicator(&mut self) {}
}

/// Show usage instructions when no subcommand is given
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "momentum chat".green().bold());
    println!("    Chat with the AI assistant");
    println!();
    println!("  {}", "momentum like <VIDEO_ID>".green().bold());
    println!("    Like a video in the gallery");
    println!();
    println!("  {}", "momentum check-date [YYYY-MM-DDTHH:MM]".green().bold());
    println!("    Check a booking date against the booking window");
    println!();
    println!("  {}", "momentum waiver <FILE> [--standalone]".green().bold());
    println!("    Read and sign a liability waiver");
    println!();
    println!("{}", "Options:".cyan());
    println!("  -c, --config <PATH>  Use a specific config file");
    println!("  -v, --verbose        Enable debug logging");
    println!("  --help               Show this help message");
    println!();
}
