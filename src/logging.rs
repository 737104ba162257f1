//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `SCHEDULE_LAYOUT_LOG` environment variable
//! (e.g. "info", "debug") and defaults to `info`. Logs go to STDERR so the
//! CLI tables on stdout stay clean.

use tracing::Level;
use tracing_subscriber::fmt;

pub const LOG_ENV_VAR: &str = "SCHEDULE_LAYOUT_LOG";

/// Initialise the global subscriber. Calling it again is a no-op.
pub fn init_logging() {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|s| parse_level_str(&s))
        .unwrap_or(Level::INFO);

    let _ = fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_leniently() {
        assert_eq!(parse_level_str(" Debug "), Some(Level::DEBUG));
        assert_eq!(parse_level_str("warning"), Some(Level::WARN));
        assert_eq!(parse_level_str("loud"), None);
    }
}
