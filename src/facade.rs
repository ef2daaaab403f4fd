// src/facade.rs

//! `log` facade adapter: route the standard `log` macros into Process
//! Monitor so application diagnostics show up inline with its telemetry.
//!
//! The adapter is deliberately dumb — one formatted line per record, no
//! buffering — because the channel itself is best-effort. Records emitted
//! while the device is closed are dropped silently, matching the rest of
//! the crate.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::device::{DebugSink, ProcmonDevice};
use crate::logger::DebugLogger;

/// `log::Log` backend writing `[LEVEL][target] message` lines to the
/// debug channel.
pub struct ProcmonLog<S = ProcmonDevice> {
    logger: DebugLogger<S>,
    max_level: LevelFilter,
}

impl<S: DebugSink> ProcmonLog<S> {
    pub fn new(logger: DebugLogger<S>, max_level: LevelFilter) -> Self {
        Self { logger, max_level }
    }
}

impl ProcmonLog<ProcmonDevice> {
    /// Open the device and install the adapter as the global `log` backend.
    ///
    /// Succeeds even when the device is unavailable — records are then
    /// dropped until a process restart, which keeps host applications
    /// independent of whether Process Monitor happens to be running.
    pub fn init(max_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(DebugLogger::open(), max_level)))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl<S: DebugSink + Send + Sync> Log for ProcmonLog<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level && self.logger.is_opened()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{:5}][{}] {}",
            record.level(),
            record.target(),
            record.args()
        );
        // Best-effort by contract; a rejected write is not reportable
        // from inside a logging backend anyway.
        let _ = self.logger.log(&line);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use log::Level;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        writes: Mutex<Vec<String>>,
    }

    impl DebugSink for &RecordingSink {
        fn write_debug(&self, payload: &[u8]) -> io::Result<()> {
            let units: Vec<u16> = payload
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]))
                .collect();
            self.writes
                .lock()
                .unwrap()
                .push(String::from_utf16(&units).unwrap());
            Ok(())
        }
    }

    fn record<'a>(level: Level, target: &'a str, msg: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder()
            .level(level)
            .target(target)
            .args(msg)
            .build()
    }

    #[test]
    fn records_are_formatted_and_forwarded() {
        let sink = RecordingSink::default();
        let backend = ProcmonLog::new(DebugLogger::with_sink(&sink), LevelFilter::Debug);

        backend.log(&record(
            Level::Info,
            "scanner",
            format_args!("scanned {} files", 12),
        ));

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].contains("INFO"));
        assert!(writes[0].contains("[scanner]"));
        assert!(writes[0].ends_with("scanned 12 files"));
    }

    #[test]
    fn records_above_the_threshold_are_filtered() {
        let sink = RecordingSink::default();
        let backend = ProcmonLog::new(DebugLogger::with_sink(&sink), LevelFilter::Warn);

        backend.log(&record(Level::Debug, "noisy", format_args!("ignored")));
        backend.log(&record(Level::Error, "loud", format_args!("kept")));

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].contains("kept"));
    }

    #[test]
    fn closed_device_disables_the_backend() {
        let backend: ProcmonLog<&RecordingSink> =
            ProcmonLog::new(DebugLogger::closed(), LevelFilter::Trace);

        let meta = Metadata::builder().level(Level::Error).target("any").build();
        assert!(!backend.enabled(&meta));
        backend.log(&record(Level::Error, "any", format_args!("dropped"))); // must not panic
    }
}
