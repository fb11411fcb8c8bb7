//! Tracing configuration for hive-auth-kit
//!
//! Installs a `tracing-subscriber` registry with an env-filter, a stdout
//! fmt layer and, when a log directory is configured, a non-blocking file
//! layer.
//!
//! Output format: `2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message`

use std::{fs, io, path::Path, sync::OnceLock};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

use hk_core::config::LoggingConfig;

const LOG_FILE_NAME: &str = "hive-auth-kit.log";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives used when `RUST_LOG` is unset.
///
/// A non-empty `level` from the config replaces the base level.
fn build_filter_directives(level: &str, is_dev: bool) -> Vec<String> {
    let base = if !level.trim().is_empty() {
        level.trim()
    } else if is_dev {
        "debug"
    } else {
        "info"
    };

    vec![
        base.to_string(),
        if is_dev { "hk_app=debug" } else { "hk_app=info" }.to_string(),
        if is_dev { "hk_infra=debug" } else { "hk_infra=info" }.to_string(),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Call once, before the widget is wired:
///
/// ```ignore
/// let config = hive_auth_kit::bootstrap::load_config(path)?;
/// hive_auth_kit::bootstrap::init_tracing_subscriber(&config.logging)?;
/// let kit = hive_auth_kit::bootstrap::build_auth_kit(config).await?;
/// ```
///
/// # Errors
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(logging: &LoggingConfig) -> anyhow::Result<()> {
    let directives = build_filter_directives(&logging.level, is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives.join(",")));

    let file_writer = match logging.log_dir.as_deref().map(build_file_writer) {
        Some(Ok(writer)) => Some(writer),
        Some(Err(err)) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err:#}");
            None
        }
        None => None,
    };

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stdout));

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
