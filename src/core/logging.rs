//! Logging setup on top of flexi_logger
//!
//! Three output formats are supported:
//! - `text`: timestamp, level and message
//! - `ext`: as `text`, followed by the source location
//! - `json`: one compact JSON object per line
//!
//! Level abbreviations are `ERR`, `WRN`, `INF`, `DBG` and `TRC`.

use flexi_logger::{DeferredNow, FileSpec, FlexiLoggerError, Logger, LoggerHandle};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

// Held for the life of the process; dropping it stops file output
static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();

/// Errors raised while configuring the logger
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid logging configuration: {0}")]
    Logger(#[from] FlexiLoggerError),

    #[error("Unknown log format '{format}' (expected text, ext or json)")]
    UnknownFormat { format: String },
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Ext,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "simple" => Ok(LogFormat::Text),
            "ext" => Ok(LogFormat::Ext),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::UnknownFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Text => "text",
            LogFormat::Ext => "ext",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Start the global logger
///
/// `level` is a flexi_logger spec such as `info` or `workqueue::queue=trace`.
/// When `log_file` is given, output goes to that file instead of stderr.
pub fn init_logging(
    level: &str,
    format: LogFormat,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), LoggingError> {
    let mut logger = Logger::try_with_str(level)?;

    logger = match (format, color_enabled) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Ext, true) => logger.format(extended_color_format),
        (LogFormat::Ext, false) => logger.format(extended_format),
        (LogFormat::Text, true) => logger.format(simple_color_format),
        (LogFormat::Text, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));

    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (queue/work_queue.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let line = json_line(
        &now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        record.level(),
        &record.args().to_string(),
        &format_target_as_path(record.target(), record.line()),
    );
    w.write_all(line.as_bytes())
}

// Ordered: timestamp, level, message, target. Compact, no trailing newline.
fn json_line(timestamp: &str, level: log::Level, message: &str, target: &str) -> String {
    let json_obj = serde_json::json!({
        "timestamp": timestamp,
        "level": level_abbr(level),
        "message": message,
        "target": target,
    });
    serde_json::to_string(&json_obj)
        .unwrap_or_else(|_| "{\"error\":\"Failed to serialize log message\"}".to_string())
}

// workqueue::queue::work_queue -> queue/work_queue.rs:42
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = if let Some(without_prefix) = target.strip_prefix("workqueue::") {
        without_prefix.replace("::", "/") + ".rs"
    } else {
        target.replace("::", "/")
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}
