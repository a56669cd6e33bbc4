//! Log setup for the portal service.
//!
//! Logs are written to stderr so the `demo` and `export` subcommands keep
//! stdout free for their report output. `RUST_LOG` wins over the configured
//! `APP_LOG_LEVEL` when both are present.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directive: String, source: ParseError },
    Init(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directive, .. } => {
                write!(
                    f,
                    "APP_LOG_LEVEL '{directive}' is not a valid tracing filter"
                )
            }
            TelemetryError::Init(err) => write!(f, "log subscriber setup failed: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Init(err) => Some(&**err),
        }
    }
}

fn log_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::Filter {
        directive: config.log_level.clone(),
        source,
    })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Init)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn telemetry(level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: level.to_string(),
        }
    }

    #[test]
    fn accepts_level_and_module_directives() {
        assert!(log_filter(&telemetry("info")).is_ok());
        assert!(log_filter(&telemetry("pe_portal=debug,tower_http=warn")).is_ok());
    }

    #[test]
    fn rejects_a_malformed_directive() {
        std::env::remove_var("RUST_LOG");
        let error = log_filter(&telemetry("info=:=bogus")).expect_err("directive must not parse");
        assert!(matches!(
            error,
            TelemetryError::Filter { ref directive, .. } if directive == "info=:=bogus"
        ));
        assert!(error.to_string().contains("APP_LOG_LEVEL"));
    }
}
