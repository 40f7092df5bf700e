//! Tracing subscriber setup.

use std::{io, str::FromStr};

use tracing::Level;
use tracing_subscriber::fmt;

use crate::config::LogConfig;

/// Parse a level name, falling back to `WARN` for unknown names.
pub fn level(config: &LogConfig) -> Level {
    Level::from_str(config.level.trim()).unwrap_or(Level::WARN)
}

/// Install a global fmt subscriber at the configured level. Returns false if
/// a global subscriber was already installed, in which case nothing changes.
pub fn init(config: &LogConfig) -> bool {
    let format = fmt::format()
        .with_level(true)
        .with_line_number(true)
        .with_ansi(false)
        .without_time()
        .compact();
    tracing_subscriber::fmt()
        .with_max_level(level(config))
        .event_format(format)
        .with_writer(io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        let cfg = |l: &str| LogConfig { level: l.into() };
        assert_eq!(level(&cfg("debug")), Level::DEBUG);
        assert_eq!(level(&cfg("TRACE")), Level::TRACE);
        assert_eq!(level(&cfg("loud")), Level::WARN);
    }

    #[test]
    fn init_is_idempotent() {
        let cfg = LogConfig::default();
        init(&cfg);
        assert!(!init(&cfg));
    }
}
