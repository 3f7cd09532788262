//! Logger setup shared by all executables
//!
//! Records go to two sinks: stdout with a coloured level tag and the session's
//! log file with a plain tag. Every line is prefixed with the number of seconds
//! since the session epoch. Debug and trace lines also carry the record's
//! target, so leg and gait traces can be told apart.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::Colorize;
use log::{info, Level, Record};
use std::fmt;
use thiserror::Error;

// Internal imports
use crate::session::{self, Session};

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(LevelFilter),

    #[error("Unrecognised log level `{0}`")]
    UnknownLogLevel(String),

    #[error("Error opening the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("A logger has already been installed: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Install the global logger for this process.
///
/// `min_level` must let `INFO` records through. Only the first call in a
/// process can succeed.
pub fn logger_init(
    min_level: LevelFilter,
    session: &Session
) -> Result<(), LoggerInitError> {
    if min_level < Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level))
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            let tag = coloured_tag(record.level());
            out.finish(format_args!("{}", Line::new(&tag, record, message)))
        })
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            let tag = plain_tag(record.level());
            out.finish(format_args!("{}", Line::new(tag, record, message)))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(min_level)
        .chain(console)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    match session::get_epoch() {
        Some(epoch) => info!("    Session epoch: {}", epoch),
        None => info!("    Session epoch: not set"),
    }
    info!("    Log level: {:?}", min_level);
    info!("    Log file: {:?}", session.log_file_path);

    Ok(())
}

/// Parse a log level from its name as written in a parameter file.
///
/// Accepts the `log` crate names case insensitively ("info", "DEBUG", ...).
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerInitError> {
    level.trim().parse::<LevelFilter>()
        .map_err(|_| LoggerInitError::UnknownLogLevel(level.to_string()))
}

// ---------------------------------------------------------------------------
// PRIVATE ITEMS
// ---------------------------------------------------------------------------

/// One formatted log line.
struct Line<'a, T: fmt::Display + ?Sized> {
    elapsed_s: f64,
    tag: &'a T,
    target: Option<&'a str>,
    message: &'a fmt::Arguments<'a>,
}

impl<'a, T: fmt::Display + ?Sized> Line<'a, T> {
    fn new(tag: &'a T, record: &'a Record, message: &'a fmt::Arguments<'a>) -> Self {
        Self {
            elapsed_s: session::get_elapsed_seconds(),
            tag,
            target: if record.level() > Level::Info {
                Some(record.target())
            } else {
                None
            },
            message,
        }
    }
}

impl<'a, T: fmt::Display + ?Sized> fmt::Display for Line<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:10.6} {}] ", self.elapsed_s, self.tag)?;
        if let Some(target) = self.target {
            write!(f, "{}: ", target)?;
        }
        write!(f, "{}", self.message)
    }
}

fn plain_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRC",
        Level::Debug => "DBG",
        Level::Info  => "INF",
        Level::Warn  => "WRN",
        Level::Error => "ERR"
    }
}

fn coloured_tag(level: Level) -> colored::ColoredString {
    let tag = plain_tag(level);
    match level {
        Level::Trace => tag.dimmed().italic(),
        Level::Debug => tag.dimmed(),
        Level::Info  => tag.normal(),
        Level::Warn  => tag.yellow(),
        Level::Error => tag.red().bold()
    }
}
