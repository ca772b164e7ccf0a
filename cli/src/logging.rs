use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn parse_level(level: Option<&str>) -> Level {
    match level.map(|l| l.to_lowercase()).as_deref() {
        Some("trace") => Level::TRACE,
        Some("debug") => Level::DEBUG,
        Some("warn") => Level::WARN,
        Some("error") => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs the global fmt subscriber. Logs go to stderr so they do not
/// interleave with streamed chat output on stdout.
pub fn init(level: Option<&str>, verbose: bool) {
    let level = if verbose {
        Level::DEBUG
    } else {
        parse_level(level)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Logging was already initialized");
    }
}
