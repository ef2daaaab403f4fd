// src/lib.rs
// ────────────────────────────────────────────────────────────────────────────
// Public library entry point.  Re-export everything for both `main.rs` and
// integration tests.

//! User-mode shim for Process Monitor's external debug log.
//!
//! Process Monitor loads a kernel driver that accepts short text messages
//! over a device control call and shows them inline with its file, registry
//! and process telemetry. This crate wraps that channel:
//!
//! * [`DebugLogger`] — open-once, best-effort writer with narrow, wide and
//!   format-style entry points.
//! * [`procmon_log!`] — printf-style convenience macro over [`DebugLogger`].
//! * [`ProcmonLog`] — adapter that routes the standard `log` macros into the
//!   channel.
//!
//! Everything is synchronous; one log call is one `DeviceIoControl`.
//! Failures are reported only through return values — losing a diagnostic
//! message is never fatal, and nothing here panics when the device is
//! missing.

mod device;
mod encode;
mod facade;
mod logger;
mod macros;

pub use device::{DEVICE_PATH, DebugSink, OpenError, ProcmonDevice};
pub use encode::DEBUG_MESSAGE_MAX;
pub use facade::ProcmonLog;
pub use logger::DebugLogger;
