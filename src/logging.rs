// src/logging.rs

//! Diagnostics go to stderr; stdout belongs to the plugin.
//!
//! The filter is taken from `--log-level`, else from `HIGHWAY_LOG` (any
//! `EnvFilter` directive list such as `debug` or `highway::exec=trace,warn`),
//! else `info`.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "HIGHWAY_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = EnvFilter::try_new(filter_directives(cli_level, env.as_deref()))?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

/// Directive list for the subscriber's filter.
fn filter_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return directive(level).to_string();
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(_) => directives.to_string(),
            Err(err) => {
                // No subscriber exists yet to report this through.
                eprintln!("highway: ignoring {LOG_ENV}={directives:?}: {err}");
                DEFAULT_DIRECTIVE.to_string()
            }
        },
        None => DEFAULT_DIRECTIVE.to_string(),
    }
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
