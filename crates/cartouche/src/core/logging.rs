//! Logging setup for diagram resolution and rendering
//!
//! Structured logging uses the `tracing` crate. The registry, the
//! orchestrator and the state stores emit spans and events; this module
//! installs a subscriber for them.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cartouche::core::logging::init_logging;
//!
//! // Level and format from the environment, or info/compact
//! init_logging(None, None).unwrap();
//! ```
//!
//! # Environment Variables
//!
//! - `CARTOUCHE_LOG_LEVEL`: log level or filter directive (trace|debug|info|warn|error|off)
//! - `CARTOUCHE_LOG_FORMAT`: output format (compact|pretty|json)
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when no level is given
//!
//! Resolution decisions are logged at `info`; overlapping detector matches at
//! `debug`; individual detector checks and state resets at `trace`:
//!
//! ```bash
//! RUST_LOG="info,cartouche::core::detector=trace" cartouche detect -i diagram.mmd
//! ```
//!
//! On wasm32 the subscriber is `tracing-wasm`, which logs to the browser
//! console; the format argument is ignored there.

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

/// Log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line events without targets
    #[default]
    Compact,
    /// Multi-line events with source locations and span activity
    Pretty,
    /// One JSON object per event, with span close timings
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "unknown log format '{}' (expected one of: {})",
                s,
                LogFormat::variants().join(", ")
            )),
        }
    }
}

impl LogFormat {
    /// Accepted format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Install the global tracing subscriber
///
/// Events are written to stderr so command output stays clean.
///
/// `level` falls back to `CARTOUCHE_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// `format` falls back to `CARTOUCHE_LOG_FORMAT`, then `compact`.
///
/// Fails when the format is unknown or a global subscriber is already set.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let directives = level
            .map(str::to_string)
            .or_else(|| std::env::var("CARTOUCHE_LOG_LEVEL").ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        let format = match format
            .map(str::to_string)
            .or_else(|| std::env::var("CARTOUCHE_LOG_FORMAT").ok())
        {
            Some(name) => LogFormat::from_str(&name)?,
            None => LogFormat::default(),
        };

        // Unparseable directives fall back to info rather than failing startup.
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

        let layer = match format {
            LogFormat::Compact => fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::ACTIVE)
                .pretty()
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE)
                .json()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str_is_case_insensitive() {
        assert_eq!(LogFormat::from_str("Json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("PRETTY").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn test_unknown_format_lists_choices() {
        let err = LogFormat::from_str("xml").unwrap_err();
        assert!(err.contains("xml"));
        for variant in LogFormat::variants() {
            assert!(err.contains(variant));
        }
    }
}
