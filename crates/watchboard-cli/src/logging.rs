use anyhow::{anyhow, Result};
use media_tracker_config::LoggingConfig;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive for the given flags. `-v` is debug with the noisy HTTP
/// internals held at warn, `-vv` is everything.
fn filter_directive(verbose_level: u8, quiet: bool, default_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose_level {
        0 => default_level.to_string(),
        1 => "debug,hyper=warn,reqwest=info".to_string(),
        _ => "trace".to_string(),
    }
}

/// JSON unless told otherwise: `RUST_LOG_JSON`, then the config file, then
/// whether stdout is a terminal.
fn use_json(config: &LoggingConfig) -> bool {
    if let Ok(value) = std::env::var("RUST_LOG_JSON") {
        return value == "true";
    }
    config.json.unwrap_or_else(|| !io::stdout().is_terminal())
}

/// Daily-rotated appender; `watchboard.log` becomes `watchboard.<date>`
fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid log filename"))?;
    let prefix = file_name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file_name);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, prefix))
}

pub fn init_logging(verbose_level: u8, quiet: bool, config: &LoggingConfig) -> Result<()> {
    // An explicit -v/-q wins over RUST_LOG, RUST_LOG wins over the config file
    let directive = filter_directive(verbose_level, quiet, &config.level);
    let filter = if quiet || verbose_level > 0 {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    let json = use_json(config);
    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(rolling_appender(path)?), false),
        None => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
    };

    let registry = Registry::default().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_timer(ChronoUtc::rfc_3339()).with_writer(writer))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()
    };
    result.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(0, false, "info"), "info");
        assert_eq!(filter_directive(0, false, "warn"), "warn");
        assert!(filter_directive(1, false, "info").starts_with("debug"));
        assert_eq!(filter_directive(3, false, "info"), "trace");
        assert_eq!(filter_directive(2, true, "info"), "error");
    }

    #[test]
    fn test_rolling_appender_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("watchboard.log");
        assert!(rolling_appender(&path).is_ok());
        assert!(dir.path().join("logs").is_dir());
    }
}
