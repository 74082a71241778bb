//! Tracing subscriber setup for the server binary
//!
//! `RUST_LOG` always wins; otherwise the level is `info`, or `debug` when
//! the server runs with `--debug`. Output goes through a non-blocking
//! writer, to stdout or to a daily rolling file when a log directory is
//! configured.
use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, Service};

/// Builds the level filter
pub fn env_filter(debug: bool) -> EnvFilter {
    let default_level = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Name of the rolling log file for a service
pub fn log_file_prefix(service: Service) -> &'static str {
    match service {
        Service::Jobs => "noticeboard-jobs.log",
        Service::Blog => "noticeboard-blog.log",
    }
}

/// Installs the global subscriber
///
/// ### Returns
///
/// The writer guard; buffered lines are flushed when it is dropped, so the
/// caller keeps it alive for the life of the process.
pub fn init_tracing(service: Service, config: &Config, debug: bool) -> Result<WorkerGuard> {
    let (writer, guard) = match &config.log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, log_file_prefix(service))),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_target(debug)
        .with_writer(writer);

    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|err| anyhow!(err))?;

    Ok(guard)
}
