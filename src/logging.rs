//! Logging configuration for ShopRAG

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::config::LoggingConfig;
use crate::Result;
use crate::ShopRagError;

const LOG_FILE_PREFIX: &str = "shoprag.log";

/// Initialize logging from the `[logging]` section of the configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    // RUST_LOG overrides the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},shoprag={}", config.level, config.level)));
    let log_dir = config.file_output.then_some(config.log_dir.as_path());
    install(env_filter, log_dir)?;

    tracing::info!("Logging initialized with level: {}", config.level);
    if let Some(dir) = log_dir {
        tracing::info!(
            "Log files will be saved to: {}/{LOG_FILE_PREFIX}.YYYY-MM-DD",
            dir.display()
        );
    }
    Ok(())
}

/// Initialize logging with custom log level, console only
pub fn init_logging_with_level(level: &str) -> Result<()> {
    install(EnvFilter::new(format!("{level},shoprag={level}")), None)?;
    tracing::info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Initialize simple logging for testing. Safe to call more than once.
pub fn init_simple_logging() {
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn install(env_filter: EnvFilter, log_dir: Option<&Path>) -> Result<()> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = match log_dir {
        Some(dir) => {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            // The writer must outlive every log call in the process
            std::mem::forget(guard);

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ShopRagError::Custom(format!("Failed to install log subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_logging_is_idempotent() {
        init_simple_logging();
        init_simple_logging();
        tracing::debug!("still logging");
    }
}
