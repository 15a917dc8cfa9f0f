//! Logging for the conversion pass.
//!
//! `trace!` reports each node as it is visited, `debug!` reports recoverable
//! events such as a frame whose document could not be read. Both expand to
//! `tracing` calls under the `tracing` feature or in tests, and to nothing
//! otherwise.

/// Emit a trace-level log message.
#[cfg(any(test, feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*);
    };
}

/// No-op `trace!`
#[cfg(not(any(test, feature = "tracing")))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Emit a debug-level log message.
#[cfg(any(test, feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// No-op `debug!`
#[cfg(not(any(test, feature = "tracing")))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
