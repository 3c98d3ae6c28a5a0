/*
 * Logging
 *
 * `log` backend for the poller. Records go to stderr so that stdout only
 * carries the button status lines.
 */

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// Logger writing `[LEVEL] message` lines to stderr.
struct SioLogger;

impl log::Log for SioLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: SioLogger = SioLogger;

fn format_record(level: Level, args: &core::fmt::Arguments<'_>) -> String {
    format!("[{}] {}", level, args)
}

pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Info))
}
