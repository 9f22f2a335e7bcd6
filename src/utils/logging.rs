//! Module-gated logging macros.
//!
//! A module opts in by declaring a `ENABLE_LOGS` const and importing the
//! macros from the crate root:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_info, log_warn};
//!
//! log_info!("loaded {} movies", 250);
//! ```
//!
//! Flipping the const to `false` silences the module without touching
//! `RUST_LOG` for the rest of the crate.

/// Info-level log, compiled out when the calling module's `ENABLE_LOGS` is false.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn-level log gated on the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
