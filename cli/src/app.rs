use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use momentum_chat::{ChatController, WsConnector};
use momentum_core::{
    BookingWindow, Draft, DraftAutosaver, DraftStore, GateStatus, ScrollMetrics, SiteClient,
    SiteConfig, UnmetCondition, WaiverEvent, WaiverGate, WaiverOutcome, WaiverVariant,
    booking::DATETIME_INPUT_FORMAT, validators::is_present,
};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, error, info, warn};

use crate::output::{TerminalChatView, TerminalWaiverSurface};

/// Pixel height of one rendered waiver line
const LINE_HEIGHT_PX: f64 = 20.0;

const AGREEMENT_FIELD: &str = "agreement";
/// Stored value of a checked checkbox
const CHECKED: &str = "on";

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Runs an interactive chat with the site's assistant
pub async fn run_chat(url: &str) -> Result<()> {
    println!("Connecting to {}...", url);
    let mut controller = ChatController::new(TerminalChatView::new(), WsConnector::new(url));
    if let Err(e) = controller.open().await {
        error!("Failed to open chat: {}", e);
    }

    println!(
        "{}",
        "Type /clear to clear history, /reconnect to reconnect, /quit to exit.".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let input = line.trim();
                match input {
                    "/quit" | "/exit" => break,
                    "/clear" => {
                        if let Err(e) = controller.clear_history().await {
                            warn!("Failed to clear chat history: {}", e);
                        }
                    }
                    "/reconnect" => {
                        if let Err(e) = controller.open().await {
                            error!("Reconnect failed: {}", e);
                        }
                    }
                    "" => {}
                    _ => match controller.submit(input).await {
                        Ok(true) => {}
                        Ok(false) => {
                            println!("{}", "Not connected. Type /reconnect to try again.".yellow());
                        }
                        Err(e) => warn!("Message not sent: {}", e),
                    },
                }
            }
            alive = controller.pump(), if controller.has_transport() => {
                if !alive {
                    debug!("Chat transport closed");
                }
            }
        }
    }

    controller
        .shutdown()
        .await
        .context("Failed to close chat connection")?;
    println!("Exiting chat session.");
    Ok(())
}

/// Likes one gallery video and prints the new count
pub async fn run_like(config: &SiteConfig, video_id: u64) -> Result<()> {
    let client = SiteClient::new(config).context("Failed to create site client")?;

    let spinner = spinner("Liking video...");
    let result = client.like_video(video_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(like) => {
            println!(
                "{} Video {} now has {} likes",
                "♥".red(),
                video_id,
                like.like_count.to_string().bold()
            );
            Ok(())
        }
        Err(e) => {
            error!("Like request failed: {}", e);
            eprintln!("{}", format!("Could not like video: {}", e).red());
            Err(e.into())
        }
    }
}

/// Checks a booking date, or prints the selectable range when none is given
pub fn run_check_date(date: Option<&str>) -> Result<()> {
    let window = BookingWindow::default();
    let now = Local::now().naive_local();

    let Some(date) = date else {
        println!("Earliest booking:   {}", window.min_input_value(now));
        println!(
            "Latest booking:     {}",
            window.latest(now).format(DATETIME_INPUT_FORMAT)
        );
        println!(
            "Suggested booking:  {}",
            window.default_selection(now).format(DATETIME_INPUT_FORMAT)
        );
        return Ok(());
    };

    let selected = BookingWindow::parse_input(date)
        .ok_or_else(|| anyhow!("Invalid date '{}', expected YYYY-MM-DDTHH:MM", date))?;

    match window.validate_now(selected) {
        Ok(()) => println!("{}", format!("{} is available for booking", date).green()),
        Err(rejection) => println!("{}", rejection.to_string().red()),
    }
    Ok(())
}

/// Options for signing a waiver in the terminal
#[derive(Debug)]
pub struct WaiverOptions<'a> {
    pub text: &'a Path,
    pub standalone: bool,
    pub page_lines: usize,
    pub submit_to: Option<&'a str>,
}

/// Pages through the waiver text, then collects the signature.
///
/// The terminal viewport stands in for the scrollable waiver box: each page
/// is one scroll position, so signing is impossible before the last page.
pub async fn run_waiver(config: &SiteConfig, options: WaiverOptions<'_>) -> Result<()> {
    let text = std::fs::read_to_string(options.text)
        .with_context(|| format!("Failed to read waiver text from {}", options.text.display()))?;
    let lines: Vec<&str> = text.lines().collect();
    let page_lines = options.page_lines.max(1);

    let client_height = page_lines as f64 * LINE_HEIGHT_PX;
    let scroll_height = lines.len() as f64 * LINE_HEIGHT_PX;
    let max_scroll_top = (scroll_height - client_height).max(0.0);

    let variant = if options.standalone {
        WaiverVariant::Standalone
    } else {
        WaiverVariant::BookingLinked
    };
    let mut gate = WaiverGate::new(
        TerminalWaiverSurface::new(),
        variant,
        ScrollMetrics::new(0.0, client_height, scroll_height),
    );

    let mut input = Prompter::new(BufReader::new(tokio::io::stdin()));
    for (page, chunk) in lines.chunks(page_lines).enumerate() {
        for line in chunk {
            println!("{}", line);
        }
        let scroll_top = ((page + 1) * page_lines) as f64 * LINE_HEIGHT_PX - client_height;
        gate.handle(WaiverEvent::Scrolled(ScrollMetrics::new(
            scroll_top.min(max_scroll_top),
            client_height,
            scroll_height,
        )));
        // Once the end is in view the rest prints without pausing
        if !gate.readiness().scrolled_to_end {
            input.ask("-- more (press Enter) --").await?;
        }
    }

    let form_id = match variant {
        WaiverVariant::BookingLinked => "waiver",
        WaiverVariant::Standalone => "waiver_standalone",
    };
    let store = Arc::new(DraftStore::new(config.draft_dir()));
    let mut draft = store.restore(form_id).unwrap_or_default();
    let mut autosaver = DraftAutosaver::new(Arc::clone(&store), form_id, config.autosave_delay());

    if !draft.is_empty() {
        info!("Restored waiver draft with {} fields", draft.len());
        apply_draft(&mut gate, &draft);
    }

    while let GateStatus::Blocked(condition) = gate.status() {
        match condition {
            UnmetCondition::ScrollIncomplete => bail!("Waiver text was not read to the end"),
            UnmetCondition::NotAgreed => {
                let answer = input.ask("I have read and agree to the waiver [y/N]: ").await?;
                let agreed = matches!(answer.to_lowercase().as_str(), "y" | "yes");
                gate.handle(WaiverEvent::AgreementChanged(agreed));
                record_field(&mut draft, AGREEMENT_FIELD, if agreed { CHECKED } else { "" });
                autosaver.schedule(draft.clone());
            }
            UnmetCondition::LegalNameInvalid => {
                let name = input.ask_field("Full legal name", &mut draft, "legal_name").await?;
                gate.handle(WaiverEvent::LegalNameInput(name));
                autosaver.schedule(draft.clone());
            }
            UnmetCondition::ClientFieldsInvalid => {
                let name = input.ask_field("Client name", &mut draft, "client_name").await?;
                gate.handle(WaiverEvent::ClientNameInput(name));
                let email = input.ask_field("Client email", &mut draft, "client_email").await?;
                gate.handle(WaiverEvent::ClientEmailInput(email));
                autosaver.schedule(draft.clone());
            }
        }
    }

    let submission = gate
        .submission()
        .ok_or_else(|| anyhow!("Waiver is not ready to sign"))?;

    let Some(path) = options.submit_to else {
        autosaver.flush().await;
        println!("{}", "Waiver ready to sign:".bold());
        println!("  Legal name: {}", submission.legal_name);
        if let (Some(name), Some(email)) = (&submission.client_name, &submission.client_email) {
            println!("  Client:     {} <{}>", name, email);
        }
        println!("Pass --submit-to <PATH> to send it to the site.");
        return Ok(());
    };

    let client = SiteClient::new(config).context("Failed to create site client")?;
    let spinner = spinner("Submitting waiver...");
    let outcome = client.submit_waiver(path, &submission).await;
    spinner.finish_and_clear();

    autosaver.flush().await;
    match outcome.context("Failed to submit waiver")? {
        WaiverOutcome::Accepted => {
            store.discard(form_id).context("Failed to discard waiver draft")?;
            println!("{}", "Waiver signed. Thank you!".green().bold());
        }
        WaiverOutcome::Rejected { status_code } => {
            eprintln!(
                "{}",
                format!("The site refused the waiver (HTTP {})", status_code).red()
            );
        }
    }
    Ok(())
}

fn apply_draft<S: momentum_core::WaiverSurface>(gate: &mut WaiverGate<S>, draft: &Draft) {
    if let Some(name) = draft.get("legal_name") {
        gate.handle(WaiverEvent::LegalNameInput(name.clone()));
    }
    if let Some(name) = draft.get("client_name") {
        gate.handle(WaiverEvent::ClientNameInput(name.clone()));
    }
    if let Some(email) = draft.get("client_email") {
        gate.handle(WaiverEvent::ClientEmailInput(email.clone()));
    }
    if draft.get(AGREEMENT_FIELD).map(String::as_str) == Some(CHECKED) {
        gate.handle(WaiverEvent::AgreementChanged(true));
    }
}

/// Blank values are dropped from the draft rather than stored empty
fn record_field(draft: &mut Draft, key: &str, value: &str) {
    if is_present(value) {
        draft.insert(key.to_string(), value.to_string());
    } else {
        draft.remove(key);
    }
}

/// Line-based prompts over an async reader
struct Prompter<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> Prompter<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> Result<String> {
        print!("{}", label);
        io::stdout().flush().context("Failed to flush stdout")?;

        match self.lines.next_line().await.context("Failed to read input")? {
            Some(line) => Ok(line.trim().to_string()),
            None => bail!("Input closed"),
        }
    }

    /// Prompts for one form field, offering the saved draft value as default
    async fn ask_field(&mut self, label: &str, draft: &mut Draft, key: &str) -> Result<String> {
        let saved = draft.get(key).cloned().unwrap_or_default();
        let answer = if saved.is_empty() {
            self.ask(&format!("{}: ", label)).await?
        } else {
            self.ask(&format!("{} [{}]: ", label, saved)).await?
        };
        let value = if answer.is_empty() { saved } else { answer };
        record_field(draft, key, &value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use momentum_core::WaiverSurface;

    #[derive(Default)]
    struct NullSurface;

    impl WaiverSurface for NullSurface {
        fn set_submit_enabled(&mut self, _enabled: bool) {}
        fn show_status(&mut self, _status: GateStatus) {}
        fn set_inputs_locked(&mut self, _locked: bool) {}
        fn mark_fully_read(&mut self) {}
        fn hide_scroll_indicator(&mut self) {}
    }

    #[test]
    fn test_apply_draft_fills_gate_fields() {
        let mut gate = WaiverGate::new(
            NullSurface,
            WaiverVariant::Standalone,
            ScrollMetrics::new(0.0, 400.0, 200.0),
        );
        let mut draft = Draft::new();
        draft.insert("legal_name".to_string(), "Jordan Reyes".to_string());
        draft.insert("client_name".to_string(), "Jo".to_string());
        draft.insert("client_email".to_string(), "jo@example.com".to_string());

        apply_draft(&mut gate, &draft);

        assert_eq!(gate.readiness().legal_name, "Jordan Reyes");
        assert_eq!(gate.readiness().client_email, "jo@example.com");
        assert_eq!(
            gate.status(),
            GateStatus::Blocked(UnmetCondition::NotAgreed)
        );
    }

    #[test]
    fn test_restored_agreement_opens_gate() {
        let mut gate = WaiverGate::new(
            NullSurface,
            WaiverVariant::BookingLinked,
            ScrollMetrics::new(0.0, 400.0, 200.0),
        );
        let mut draft = Draft::new();
        record_field(&mut draft, "legal_name", "Jordan Reyes");
        record_field(&mut draft, AGREEMENT_FIELD, CHECKED);

        apply_draft(&mut gate, &draft);

        assert_eq!(draft.get("agreement").map(String::as_str), Some("on"));
        assert!(gate.is_ready());
    }

    #[test]
    fn test_blank_values_leave_the_draft() {
        let mut draft = Draft::new();
        record_field(&mut draft, AGREEMENT_FIELD, CHECKED);
        record_field(&mut draft, AGREEMENT_FIELD, "");
        record_field(&mut draft, "client_name", "   ");
        assert!(draft.is_empty());
    }

    #[tokio::test]
    async fn test_prompter_reads_lines_and_defaults() {
        let mut input = Prompter::new(BufReader::new(&b"  yes \n\nAlex Kim\n"[..]));
        let mut draft = Draft::new();
        draft.insert("legal_name".to_string(), "Jordan Reyes".to_string());

        assert_eq!(input.ask("Agree? ").await.unwrap(), "yes");
        // Empty answer keeps the saved value
        assert_eq!(
            input.ask_field("Full legal name", &mut draft, "legal_name").await.unwrap(),
            "Jordan Reyes"
        );
        assert_eq!(
            input.ask_field("Client name", &mut draft, "client_name").await.unwrap(),
            "Alex Kim"
        );
        assert_eq!(draft.get("client_name").map(String::as_str), Some("Alex Kim"));
        assert!(input.ask("More? ").await.is_err());
    }

    #[test]
    fn test_check_date_rejects_garbage() {
        assert!(run_check_date(Some("next tuesday")).is_err());
        assert!(run_check_date(None).is_ok());
    }
}
