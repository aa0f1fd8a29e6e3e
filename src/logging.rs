//! Console logger for the cdscheck binaries.

use std::time::Instant;

use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record};

/// Writes log records to stderr with the time since startup.
pub struct ConsoleLogger {
    level: LevelFilter,
    start: Instant,
}

impl ConsoleLogger {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        Self {
            level,
            start: Instant::now(),
        }
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN".yellow().bold(),
            Level::Info => "INFO".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".purple().bold(),
        };
        let elapsed = format!("{:>8.3}s", self.start.elapsed().as_secs_f64());
        eprintln!(
            "[{} {} {}] {}",
            elapsed.dimmed(),
            level,
            record.target().cyan(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Install the console logger. `verbose` enables debug output.
pub fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let logger = ConsoleLogger::new(verbose);
    let level = logger.level;
    // the logger lives for the rest of the process
    log::set_logger(Box::leak(Box::new(logger)))
        .map_err(|e| anyhow::anyhow!("failed to set logger: {e}"))?;
    log::set_max_level(level);
    Ok(())
}
