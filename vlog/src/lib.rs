#![deny(unused_crate_dependencies)]

//! A set of logging macros that print not only timestamp and log level,
//! but also file name, line and column.
//!
//! They behave just like usual tracing::warn, tracing::info, etc.
//! For the warn macro we are adding file line and column to tracing variables
//!
//! The format of the logs can be `plain` or `json` and is set by the `MISC_LOG_FORMAT` env variable.
//! Logs are written to `stderr`: `stdout` belongs to the tool's console output.
//!
//! Full documentation for the `tracing` crate here <https://docs.rs/tracing/>

use std::{backtrace::Backtrace, str::FromStr};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing as __tracing;
pub use tracing::{debug, info, trace};

/// Name of the env variable selecting the log format.
pub const LOG_FORMAT_VAR: &str = "MISC_LOG_FORMAT";

/// Logging initialization error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Error {
    #[error("MISC_LOG_FORMAT has an unexpected value {0}")]
    UnknownFormat(String),

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Output format of the logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Plain,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl LogFormat {
    /// Reads the format from `MISC_LOG_FORMAT`, defaulting to `plain` when unset.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(LOG_FORMAT_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Logs at warn level adding file, line and column.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__tracing::warn!(
            file = file!(),
            line = line!(),
            column = column!(),
            $($arg)+
        )
    };
}

/// Initialize logging with tracing and set up log format
///
/// The format is taken from `MISC_LOG_FORMAT`, filtering directives from `RUST_LOG`.
pub fn init() -> Result<LogFormat, Error> {
    let log_format = LogFormat::from_env()?;

    let installed = match log_format {
        LogFormat::Plain => tracing_subscriber::registry()
            .with(fmt::Layer::default().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .try_init(),
        LogFormat::Json => {
            let timer = tracing_subscriber::fmt::time::UtcTime::rfc_3339();
            install_pretty_panic_hook();

            tracing_subscriber::registry()
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_file(true)
                        .with_line_number(true)
                        .with_timer(timer)
                        .json(),
                )
                .with(EnvFilter::from_default_env())
                .try_init()
        }
    };
    installed.map_err(|_| Error::AlreadyInitialized)?;

    Ok(log_format)
}

/// Format panics like tracing::error
fn install_pretty_panic_hook() {
    // Replaces the previous hook instead of chaining it, otherwise every panic is logged twice.
    std::panic::set_hook(Box::new(move |panic_info| {
        let backtrace = Backtrace::capture();
        let timestamp = chrono::Utc::now();
        let panic_message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else {
            "Panic occurred without additional info"
        };

        let panic_location = panic_info
            .location()
            .map(|val| val.to_string())
            .unwrap_or_else(|| "Unknown location".to_owned());

        eprintln!(
            "{}",
            serde_json::json!({
                "timestamp": timestamp.format("%Y-%m-%dT%H:%M:%S%.fZ").to_string(),
                "level": "CRITICAL",
                "fields": {
                    "message": panic_message,
                    "location": panic_location,
                    "backtrace": backtrace.to_string(),
                }
            })
        );
    }));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Error, LogFormat};

    #[test]
    fn parses_known_formats() {
        assert_eq!("plain".parse::<LogFormat>(), Ok(LogFormat::Plain));
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "yaml".parse::<LogFormat>().unwrap_err();

        assert_eq!(err, Error::UnknownFormat("yaml".to_string()));
        assert_eq!(
            err.to_string(),
            "MISC_LOG_FORMAT has an unexpected value yaml"
        );
    }

    #[test]
    fn plain_is_default() {
        assert_eq!(LogFormat::default(), LogFormat::Plain);
    }
}
