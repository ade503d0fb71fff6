//! File logging.
//!
//! The terminal belongs to the game while it runs, so log records go to a
//! file through log4rs.

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// Build the log4rs config writing to `file_path`.
pub fn log_config(level: LevelFilter, file_path: &str) -> Result<Config> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(file_path)
        .with_context(|| format!("failed to open log file {file_path}"))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))?;
    Ok(config)
}

/// Install the global file logger.
pub fn init_log(level: LevelFilter, file_path: &str) -> Result<()> {
    let config = log_config(level, file_path)?;
    log4rs::init_config(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_creates_file() {
        let path = std::env::temp_dir().join(format!("puyo-tui-log-{}.log", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        let config = log_config(LevelFilter::Debug, &path_str).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_log_config_fails_when_path_is_a_directory() {
        let dir = std::env::temp_dir();
        let err = log_config(LevelFilter::Info, &dir.to_string_lossy());
        assert!(err.is_err());
    }
}
