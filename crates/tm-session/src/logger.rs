use crate::{Result as SessionErrorResult, SessionError};

use std::path::Path;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use tm_config::LoggingConfig;

/// Install the global logger.
///
/// Logs go to `config.file` when set (plain, appended), otherwise to stdout,
/// colored when `config.colored`. Fails if a logger is already installed.
pub fn initialize(config: &LoggingConfig) -> SessionErrorResult<()> {
    let level_filter = *config.level;

    let dispatch = match &config.file {
        Some(log_path) => {
            let file = fern::log_file(Path::new(log_path)).map_err(|e| {
                SessionError::logger(format!("Failed to open log file {}: {}", log_path, e))
            })?;
            Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{date} - {level}] {message} [{target}]",
                        date = humantime::format_rfc3339(SystemTime::now()),
                        level = record.level(),
                        message = message,
                        target = record.target(),
                    ))
                })
                .chain(file)
        }
        None if config.colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "[{date} - {level}] {message} [{target}]",
                        date = humantime::format_rfc3339(SystemTime::now()),
                        level = colors.color(record.level()),
                        message = message,
                        target = record.target(),
                    ))
                })
                .chain(std::io::stdout())
        }
        None => Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{target}]",
                    date = humantime::format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                    target = record.target(),
                ))
            })
            .chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .chain(dispatch)
        .apply()
        .map_err(|e| SessionError::logger(format!("Failed to initialize logger: {e}")))?;

    match &config.file {
        Some(path) => info!("Logger initialized: level={:?}, file={}", level_filter, path),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    Ok(())
}
