//! Application configuration.
//!
//! A [`Config`] is an ordinary value: build one with defaults, parse it from
//! JSON, or overlay environment variables, then pass it to
//! [`App::new`](crate::App::new).

use std::env;

use geom::Expanse;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable that forces a backend by name.
pub const ENV_BACKEND: &str = "TRELLIS_BACKEND";
/// Environment variable that enables layout dumps when set to `1`.
pub const ENV_DEBUG_LAYOUT: &str = "TRELLIS_DEBUG_LAYOUT";
/// Environment variable holding the log level.
pub const ENV_LOG: &str = "TRELLIS_LOG";

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum level: `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend to use instead of automatic selection.
    pub backend: Option<String>,
    /// Outer size given to the content root.
    pub viewport: Expanse,
    /// Emit a tree dump after every layout pass.
    pub debug_layout: bool,
    /// Logging settings.
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: None,
            viewport: Expanse::new(640, 480),
            debug_layout: false,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Internal(format!("config: {e}")))
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Internal(format!("config: {e}")))
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().overlay_env(|k| env::var(k).ok())
    }

    /// Overlay values from an environment lookup function.
    pub fn overlay_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(backend) = lookup(ENV_BACKEND).filter(|v| !v.is_empty()) {
            self.backend = Some(backend);
        }
        if let Some(v) = lookup(ENV_DEBUG_LAYOUT) {
            self.debug_layout = v == "1";
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.log.level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.viewport, Expanse::new(640, 480));
        assert_eq!(c.backend, None);
        assert_eq!(c.log.level, "warn");
    }

    #[test]
    fn from_env_keeps_viewport() {
        assert_eq!(Config::from_env().viewport, Config::default().viewport);
    }

    #[test]
    fn json_partial() {
        let c = Config::from_json(r#"{"backend": "dummy", "viewport": {"w": 300, "h": 200}}"#)
            .unwrap();
        assert_eq!(c.backend.as_deref(), Some("dummy"));
        assert_eq!(c.viewport, Expanse::new(300, 200));
        assert!(!c.debug_layout);
        assert_eq!(Config::from_json(&c.to_json().unwrap()).unwrap(), c);
        assert!(Config::from_json("{").is_err());
    }

    #[test]
    fn env_overlay() {
        let vars: HashMap<&str, &str> = [
            (ENV_BACKEND, "gtk"),
            (ENV_DEBUG_LAYOUT, "1"),
            (ENV_LOG, "debug"),
        ]
        .into_iter()
        .collect();
        let c = Config::default().overlay_env(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(c.backend.as_deref(), Some("gtk"));
        assert!(c.debug_layout);
        assert_eq!(c.log.level, "debug");

        let c = Config::default().overlay_env(|_| None);
        assert_eq!(c, Config::default());
    }
}
