use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Variable holding a `tracing` filter directive, e.g. `TENDER_LOG=debug`
pub const LOG_VAR: &str = "TENDER_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Route launcher diagnostics to stderr so the delegated binary owns stdout
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
