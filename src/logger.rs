// src/logger.rs

//! Best-effort writer over the Process Monitor debug channel.
//!
//! `DebugLogger` mirrors the lifecycle of the driver handle: acquired once
//! at construction, released on drop. A failed open is not an error — the
//! logger simply stays closed and every log call reports `false`. Callers
//! that ignore the returns lose nothing but their diagnostics.

use std::fmt;

use crate::device::{DebugSink, OpenError, ProcmonDevice};
use crate::encode;

/// Synchronous logger owning at most one open sink.
///
/// Generic over the sink so tests can swap the kernel driver for an
/// in-memory recorder; production code uses the default.
pub struct DebugLogger<S = ProcmonDevice> {
    sink: Option<S>,
}

impl DebugLogger<ProcmonDevice> {
    /// Open the debug device, swallowing failure. Check [`is_opened`] if it
    /// matters whether messages actually land anywhere.
    ///
    /// [`is_opened`]: Self::is_opened
    pub fn open() -> Self {
        Self { sink: ProcmonDevice::open().ok() }
    }

    /// Like [`open`], but surfaces why the device could not be opened.
    ///
    /// [`open`]: Self::open
    pub fn try_open() -> Result<Self, OpenError> {
        Ok(Self { sink: Some(ProcmonDevice::open()?) })
    }

    /// Drop the current handle, if any, and open the device again. Returns
    /// the new [`is_opened`] state. Useful after Process Monitor restarts.
    ///
    /// [`is_opened`]: Self::is_opened
    pub fn reopen(&mut self) -> bool {
        self.sink = ProcmonDevice::open().ok();
        self.sink.is_some()
    }
}

impl<S: DebugSink> DebugLogger<S> {
    /// Wrap an already-open sink.
    pub fn with_sink(sink: S) -> Self {
        Self { sink: Some(sink) }
    }

    /// A logger with no sink: the state left behind by a failed open.
    /// Every log call on it returns `false`.
    pub fn closed() -> Self {
        Self { sink: None }
    }

    /// Whether the sink is currently open. No side effects.
    pub fn is_opened(&self) -> bool {
        self.sink.is_some()
    }

    /// Log a narrow (UTF-8) message, truncated past
    /// [`DEBUG_MESSAGE_MAX`](crate::DEBUG_MESSAGE_MAX) code units.
    pub fn log(&self, message: &str) -> bool {
        self.log_wide(&encode::to_wide(message))
    }

    /// Log a message that is already UTF-16. This is the only entry point
    /// that touches the sink; every other form funnels here.
    pub fn log_wide(&self, message: &[u16]) -> bool {
        match &self.sink {
            Some(sink) => sink.write_debug(encode::payload(message)).is_ok(),
            None => false,
        }
    }

    /// Format-and-log in one step; [`procmon_log!`](crate::procmon_log)
    /// expands to this.
    pub fn log_fmt(&self, args: fmt::Arguments<'_>) -> bool {
        match args.as_str() {
            Some(literal) => self.log(literal),
            None => self.log(&args.to_string()),
        }
    }
}
