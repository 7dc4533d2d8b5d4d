//! Flagpole Logging
//!
//! Leveled log lines on stderr for the Flagpole crates, configured from the
//! `FLAGPOLE_*` environment variables the first time any macro checks a
//! level.
//!
//! ```rust
//! use flagpole_log::{debug, info, warn};
//!
//! debug!("allocating identifier");
//! info!("allocator ready for {} tables", 3);
//! warn!(target: "flagpole::ids", "lookup failed for table {}", "flags");
//! ```
//!
//! # Environment Variables
//!
//! - `FLAGPOLE_LOG_LEVEL=trace|debug|info|warn|error|off` - minimum level (default `info`)
//! - `FLAGPOLE_DEBUG=1` - shorthand for `debug` when no level is given
//! - `FLAGPOLE_LOG_FORMAT=pretty|json` - output format (default `json`)
//! - `FLAGPOLE_LOG_TIMESTAMPS=0` - drop timestamps from pretty output

use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables output entirely
    Off = 5,
}

impl Level {
    const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Off,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("warning") {
            return Ok(Level::Warn);
        }
        if s.eq_ignore_ascii_case("none") {
            return Ok(Level::Off);
        }
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `2024-01-01 12:00:00.000 DEBUG [target] message`
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "json" => Ok(Format::Json),
            _ => Err(()),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Read the `FLAGPOLE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from a variable lookup. Unparseable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| {
            lookup(name).map(|v| v.trim() == "1" || v.trim().eq_ignore_ascii_case("true"))
        };
        let defaults = Self::default();

        let debug = flag("FLAGPOLE_DEBUG").unwrap_or(false);
        let level = lookup("FLAGPOLE_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        Self {
            level,
            format: lookup("FLAGPOLE_LOG_FORMAT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.format),
            timestamps: flag("FLAGPOLE_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps),
        }
    }
}

/// Level filter plus writer. The process-wide instance is built from the
/// environment on first use, see [`logger`].
#[derive(Debug)]
pub struct Logger {
    config: LogConfig,
    level: AtomicU8,
}

impl Logger {
    pub fn new(config: LogConfig) -> Self {
        let level = AtomicU8::new(config.level as u8);
        Self { config, level }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn level(&self) -> Level {
        let raw = self.level.load(Ordering::Relaxed);
        Level::ALL
            .into_iter()
            .find(|level| *level as u8 == raw)
            .unwrap_or(Level::Off)
    }

    /// Change the minimum level at runtime.
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Off && level >= self.level()
    }

    /// Render one line into `out`, applying the level filter.
    pub fn write_to(
        &self,
        out: &mut dyn Write,
        level: Level,
        target: &str,
        args: fmt::Arguments<'_>,
    ) -> std::io::Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }

        match self.config.format {
            Format::Pretty => {
                if self.config.timestamps {
                    let now = chrono::Local::now();
                    write!(out, "{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"))?;
                }
                writeln!(out, "{:5} [{}] {}", level.as_str(), target, args)
            }
            Format::Json => {
                #[derive(Serialize)]
                struct Line<'a> {
                    timestamp: String,
                    level: &'a str,
                    target: &'a str,
                    message: String,
                }

                let line = Line {
                    timestamp: chrono::Utc::now().to_rfc3339(),
                    level: level.as_str(),
                    target,
                    message: args.to_string(),
                };
                serde_json::to_writer(&mut *out, &line).map_err(std::io::Error::other)?;
                writeln!(out)
            }
        }
    }
}

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new(LogConfig::from_env()));

/// The process-wide logger, configured from the environment on first call.
pub fn logger() -> &'static Logger {
    &LOGGER
}

/// Minimum level of the process-wide logger.
pub fn current_level() -> Level {
    logger().level()
}

/// Change the minimum level of the process-wide logger.
pub fn set_level(level: Level) {
    logger().set_level(level);
}

#[doc(hidden)]
pub fn enabled(level: Level) -> bool {
    logger().enabled(level)
}

#[doc(hidden)]
pub fn write(level: Level, target: &str, args: fmt::Arguments<'_>) {
    let _ = logger().write_to(&mut std::io::stderr().lock(), level, target, args);
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::enabled($level) {
            $crate::write($level, $target, format_args!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__log!($level, target: module_path!(), $($arg)+)
    };
}

/// Log at trace level.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Trace, $($arg)+) };
}

/// Log at debug level.
///
/// ```rust
/// use flagpole_log::debug;
///
/// let table = "flags";
/// debug!(target: "flagpole::ids", "next id requested for {}", table);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Debug, $($arg)+) };
}

/// Log at info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Info, $($arg)+) };
}

/// Log at warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Warn, $($arg)+) };
}
