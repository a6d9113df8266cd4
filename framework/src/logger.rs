//! Logging module.
use std::io::Write;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

struct Logger {
    level: LevelFilter,
    start: Instant,
}

impl Logger {
    fn color(level: Level) -> ColorSpec {
        let mut spec = ColorSpec::new();

        match level {
            Level::Error => spec.set_fg(Some(Color::Red)).set_intense(true),
            Level::Warn => spec.set_fg(Some(Color::Yellow)),
            Level::Info => spec.set_fg(Some(Color::Cyan)),
            Level::Debug => spec.set_fg(None),
            Level::Trace => spec.set_fg(Some(Color::White)).set_dimmed(true),
        };
        spec
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stream = if record.level() <= Level::Warn {
            StandardStream::stderr(ColorChoice::Auto)
        } else {
            StandardStream::stdout(ColorChoice::Auto)
        };
        let elapsed = self.start.elapsed();

        stream.set_color(&Self::color(record.level())).ok();
        writeln!(
            stream,
            "{:5} {:012} {}: {}",
            record.level(),
            elapsed.as_millis(),
            record.target(),
            record.args()
        )
        .ok();
        stream.reset().ok();
    }

    fn flush(&self) {}
}

/// Initialize a new logger.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = Logger {
        level,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);

    Ok(())
}
