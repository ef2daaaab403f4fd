/// Printf-style logging against a [`DebugLogger`](crate::DebugLogger),
/// mirroring variadic call sites:
///
/// ```
/// use procmon_logger::{DebugLogger, procmon_log};
///
/// let logger = DebugLogger::open();
/// let sent = procmon_log!(logger, "scan finished: {} item(s), {}ms", 7, 123);
/// assert_eq!(sent, logger.is_opened());
/// ```
///
/// Evaluates to the `bool` result of the underlying log call. The format
/// string is trusted input; the expansion is truncated to
/// [`DEBUG_MESSAGE_MAX`](crate::DEBUG_MESSAGE_MAX) like every other entry
/// point.
#[macro_export]
macro_rules! procmon_log {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_fmt(::core::format_args!($($arg)+))
    };
}
