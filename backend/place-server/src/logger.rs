use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::{Arguments, Display};
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Record, info};

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
pub fn initialize(
    log_level: place_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = *log_level;

    let dispatch = if let Some(ref log_path) = log_file {
        let file = fern::log_file(log_path).map_err(|e| ServerError::Io {
            path: log_path.clone(),
            source: e,
        })?;

        Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(file)
    } else if colored {
        let colors = ColoredLevelConfig::new()
            .trace(Color::Magenta)
            .debug(Color::Blue)
            .info(Color::Green)
            .warn(Color::Yellow)
            .error(Color::Red);

        Dispatch::new()
            .format(move |out, message, record| {
                write_line(out, message, record, colors.color(record.level()))
            })
            .chain(std::io::stdout())
    } else {
        // Plain output for non-TTY (systemd, docker logs)
        Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(std::io::stdout())
    };

    Dispatch::new()
        .level(level_filter)
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={level_filter:?}, file={}",
            path.display()
        ),
        None => info!("Logger initialized: level={level_filter:?}, stdout"),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}

fn write_line(out: FormatCallback, message: &Arguments, record: &Record, level: impl Display) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}
