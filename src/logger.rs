use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use time::OffsetDateTime;
use time::macros::format_description;

pub enum LogOutput {
    Stdout,
    Stderr,
}

pub struct Logger {
    pub output: LogOutput,
    pub severity: Level,
    pub enable_colors: bool,
}

impl Logger {
    /// Create a new logger
    pub fn new(output: LogOutput, severity: Option<Level>, enable_colors: bool) -> Self {
        Logger {
            output,
            severity: severity.unwrap_or(Level::Info),
            enable_colors,
        }
    }

    /// Current UTC time as HH:MM:SS
    fn timestamp() -> String {
        let format = format_description!("[hour]:[minute]:[second]");
        OffsetDateTime::now_utc()
            .format(&format)
            .unwrap_or_default()
    }

    /// Get color code for log level
    fn color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m", // Red
            Level::Warn => "\x1b[33m",  // Yellow
            Level::Info => "\x1b[36m",  // Cyan
            Level::Debug => "\x1b[35m", // Magenta
            Level::Trace => "\x1b[37m", // White
        }
    }

    fn format(&self, record: &Record) -> String {
        let timestamp = Self::timestamp();
        let level = record.level().as_str();
        let args = record.args();
        if self.enable_colors {
            let color = Self::color(record.level());
            format!("{color}[{timestamp}] {level}\x1b[0m {args}\n")
        } else {
            format!("[{timestamp}] {level} {args}\n")
        }
    }

    /// Install the logger, reading the level from `FOLIO_LOG` or `RUST_LOG`.
    /// Colors are off when `NO_COLOR` is set.
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("FOLIO_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
            .and_then(|s| s.parse::<Level>().ok());
        let enable_colors = std::env::var_os("NO_COLOR").is_none();

        let logger = Logger::new(LogOutput::Stderr, severity, enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format(record);
        let _ = match self.output {
            LogOutput::Stdout => std::io::stdout().write_all(line.as_bytes()),
            LogOutput::Stderr => std::io::stderr().write_all(line.as_bytes()),
        };
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}
