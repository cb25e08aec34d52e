//! Stderr logger for `--trace` / `--verbose`.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        // Raw mode needs the explicit carriage return.
        let _ = write!(
            handle,
            "[{:<5} {}] {}\r\n",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger at `level`.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Level selected by the command-line flags.
pub fn level_for(trace: bool, verbose: bool) -> LevelFilter {
    if trace {
        LevelFilter::Trace
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(true, true), LevelFilter::Trace);
        assert_eq!(level_for(false, true), LevelFilter::Debug);
        assert_eq!(level_for(false, false), LevelFilter::Warn);
    }
}
