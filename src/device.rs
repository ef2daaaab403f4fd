// src/device.rs

//! Handle plumbing for the Process Monitor debug device.
//!
//! User mode reaches the driver through `\\.\Global\ProcmonDebugLogger`
//! with a single buffered-I/O control code. The device only exists while
//! Process Monitor is running with its driver loaded, so opening it can
//! fail at any time and callers must tolerate that.
//!
//! Key responsibilities:
//! - Open the device handle with the exact access/share flags it requires.
//! - Issue one synchronous `DeviceIoControl` per payload.
//! - Close the handle on drop, on every exit path.

use std::io;

use thiserror::Error;

/// Win32 namespace path of the driver's debug-log device.
pub const DEVICE_PATH: &str = r"\\.\Global\ProcmonDebugLogger";

/// Anything that can accept one debug payload per call.
///
/// The production implementation is [`ProcmonDevice`]; tests substitute an
/// in-memory sink so the truncation and dispatch logic runs without the
/// kernel driver.
pub trait DebugSink {
    /// Deliver one message payload. The buffer is already clamped to the
    /// channel maximum; no framing is added.
    fn write_debug(&self, payload: &[u8]) -> io::Result<()>;
}

/// Delegate through shared ownership so a sink can outlive the logger that
/// writes to it (tests hold one end, the logger the other).
impl<T: DebugSink + ?Sized> DebugSink for std::sync::Arc<T> {
    fn write_debug(&self, payload: &[u8]) -> io::Result<()> {
        (**self).write_debug(payload)
    }
}

/// Why the debug device could not be opened.
#[derive(Debug, Error)]
pub enum OpenError {
    /// `CreateFileW` failed — typically Process Monitor is not running.
    #[error("cannot open the Process Monitor debug device: {0}")]
    Device(#[source] io::Error),

    /// The device namespace does not exist off Windows.
    #[error("the Process Monitor debug device only exists on Windows")]
    Unsupported,
}

#[cfg(windows)]
mod imp {
    use std::ffi::c_void;
    use std::io;
    use std::ptr;

    use windows_sys::Win32::Foundation::{
        CloseHandle, GENERIC_READ, GENERIC_WRITE, HANDLE, INVALID_HANDLE_VALUE,
    };
    use windows_sys::Win32::Storage::FileSystem::{
        CreateFileW, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_DELETE, FILE_SHARE_READ, FILE_SHARE_WRITE,
        OPEN_EXISTING,
    };
    use windows_sys::Win32::System::IO::DeviceIoControl;
    use windows_sys::Win32::System::Ioctl::{FILE_WRITE_ACCESS, METHOD_BUFFERED};

    use super::{DebugSink, OpenError};

    /// CTL_CODE is a C macro; windows-sys only ships its building blocks.
    ///
    /// Formula: (DeviceType << 16) | (Access << 14) | (Function << 2) | Method
    macro_rules! ctl_code {
        ($device_type:expr, $function:expr, $method:expr, $access:expr) => {
            ($device_type << 16) | ($access << 14) | ($function << 2) | $method
        };
    }

    /// Private device type claimed by the procmon driver.
    const FILE_DEVICE_PROCMON_LOG: u32 = 0x0000_9535;

    /// The one control code this crate ever sends: "append this buffer to
    /// the external debug log".
    const IOCTL_EXTERNAL_LOG_DEBUGOUT: u32 =
        ctl_code!(FILE_DEVICE_PROCMON_LOG, 0x81, METHOD_BUFFERED, FILE_WRITE_ACCESS);

    const DEVICE_PATH_W: *const u16 = windows_sys::w!(r"\\.\Global\ProcmonDebugLogger");

    /// Thin RAII wrapper over the device handle: opened on construction,
    /// closed on drop.
    pub struct ProcmonDevice {
        handle: HANDLE,
    }

    // Every write carries its own caller-owned buffer and the kernel
    // serializes control calls per handle, so sharing the wrapper across
    // threads is sound.
    unsafe impl Send for ProcmonDevice {}
    unsafe impl Sync for ProcmonDevice {}

    impl ProcmonDevice {
        /// Try to open the device. Read/write access with full sharing,
        /// existing device only — the driver is never created from here.
        pub fn open() -> Result<Self, OpenError> {
            let handle = unsafe {
                CreateFileW(
                    DEVICE_PATH_W,
                    GENERIC_READ | GENERIC_WRITE,
                    FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE,
                    ptr::null(),
                    OPEN_EXISTING,
                    FILE_ATTRIBUTE_NORMAL,
                    ptr::null_mut(),
                )
            };
            if handle == INVALID_HANDLE_VALUE {
                return Err(OpenError::Device(io::Error::last_os_error()));
            }
            Ok(Self { handle })
        }
    }

    impl DebugSink for ProcmonDevice {
        fn write_debug(&self, payload: &[u8]) -> io::Result<()> {
            let mut bytes_returned: u32 = 0;
            let ok = unsafe {
                DeviceIoControl(
                    self.handle,
                    IOCTL_EXTERNAL_LOG_DEBUGOUT,
                    payload.as_ptr() as *const c_void,
                    payload.len() as u32,
                    ptr::null_mut(), // no output buffer
                    0,
                    &mut bytes_returned,
                    ptr::null_mut(), // synchronous call
                )
            };
            if ok == 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        }
    }

    impl Drop for ProcmonDevice {
        fn drop(&mut self) {
            unsafe {
                CloseHandle(self.handle);
            }
        }
    }
}

#[cfg(not(windows))]
mod imp {
    use std::io;

    use super::{DebugSink, OpenError};

    /// Stub so the crate and its portable tests build off Windows. The
    /// device never opens here.
    pub struct ProcmonDevice {
        _priv: (),
    }

    impl ProcmonDevice {
        pub fn open() -> Result<Self, OpenError> {
            Err(OpenError::Unsupported)
        }
    }

    impl DebugSink for ProcmonDevice {
        fn write_debug(&self, _payload: &[u8]) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::Unsupported))
        }
    }
}

pub use imp::ProcmonDevice;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn open_fails_off_windows() {
        assert!(matches!(ProcmonDevice::open(), Err(OpenError::Unsupported)));
    }

    #[test]
    fn open_errors_are_self_describing() {
        let err = OpenError::Device(io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("Process Monitor"));
        assert!(OpenError::Unsupported.to_string().contains("Windows"));
    }
}
