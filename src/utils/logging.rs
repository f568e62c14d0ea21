//! Switchable logging macros for the background loops.
//!
//! Each macro checks an `ENABLE_LOGS` const that the calling module defines,
//! so a noisy loop can be silenced without touching `RUST_LOG`:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_debug, log_info};
//!
//! log_info!("sensing loop started");
//! ```

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Errors are logged through here only from loops; request paths return them.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
