//! Logging setup on top of flexi_logger
//!
//! Formats:
//! - `text`: timestamp, level and message (coloured level when enabled)
//! - `ext`: as `text` plus the source location of the log call
//! - `json`: one compact object per line

use std::sync::{Mutex, OnceLock};

use flexi_logger::{DeferredNow, FileSpec, FormatFunction, Logger, LoggerHandle};

static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();

/// Log formats accepted by `--log-format`
pub const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

/// Log levels accepted by `--log-level`
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Start the global logger.
///
/// May only succeed once per process; later calls report the flexi_logger
/// error and leave the running logger untouched.
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = log_level.unwrap_or("info");
    let mut logger = Logger::try_with_str(level)?.format(select_format(log_format, color_enabled));

    if let Some(path) = log_file {
        logger = logger.log_to_file(FileSpec::try_from(std::path::Path::new(path))?);
    }

    let handle = logger.start()?;
    // the handle flushes and closes the log file when dropped
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));
    Ok(())
}

/// Map `-v`/`-q` counts onto a level, starting from `info`
pub fn level_from_verbosity(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn select_format(log_format: Option<&str>, color_enabled: bool) -> FormatFunction {
    match (log_format.unwrap_or("text"), color_enabled) {
        ("json", _) => json_format,
        ("ext", true) => extended_color_format,
        ("ext", false) => extended_format,
        (_, true) => text_color_format,
        (_, false) => text_format,
    }
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
    let abbr = level_abbr(level);
    match level {
        log::Level::Error => abbr.red().bold(),
        log::Level::Warn => abbr.yellow(),
        log::Level::Info => abbr.green(),
        log::Level::Debug => abbr.blue(),
        log::Level::Trace => abbr.magenta(),
    }
}

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// "2025-01-01 12:00:00.000 INF message"
fn text_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format(TIME_FORMAT),
        level_abbr(record.level()),
        record.args()
    )
}

fn text_color_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;
    write!(
        w,
        "{} {} {}",
        now.format(TIME_FORMAT).to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// "2025-01-01 12:00:00.000 INF message (scanner/controller.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format(TIME_FORMAT),
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
        now.format(TIME_FORMAT).to_string().dimmed(),
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
    let obj = serde_json::json!({
        "timestamp": utc_timestamp(now),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line()),
    });
    // compact, flexi_logger appends the newline
    match serde_json::to_string(&obj) {
        Ok(line) => w.write_all(line.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// RFC 3339 in UTC; the record time itself is local
fn utc_timestamp(now: &mut DeferredNow) -> String {
    now.now()
        .with_timezone(&chrono::Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

// scangate::scanner::controller -> scanner/controller.rs:LINE
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("scangate::") {
        Some(rest) => rest.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };
    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}
