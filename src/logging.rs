//! Logging abstraction layer.
//!
//! The navigator never talks to a logger directly. Every event goes through
//! one of the macros below, which forward to the [`log`](https://docs.rs/log)
//! or [`tracing`](https://docs.rs/tracing) crate depending on the enabled
//! feature. Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! All events use the `miniapp_navigator` target, so a host can filter them
//! with e.g. `RUST_LOG=miniapp_navigator=debug`.
//!
//! ```ignore
//! use miniapp_navigator::{debug_log, info_log};
//!
//! info_log!("navigateTo '{}'", url);
//! debug_log!("guard '{}' resolved with {:?}", guard.name(), outcome);
//! ```

/// Forwards a message to the enabled backend at the given level. With no
/// backend the arguments are still evaluated, so they never read as unused.
#[doc(hidden)]
#[macro_export]
macro_rules! __navigator_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!(target: "miniapp_navigator", $($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!(target: "miniapp_navigator", $($arg)*);
        #[cfg(not(any(feature = "log", feature = "tracing")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    };
}

/// Emit a **trace**-level message (per-guard verdicts, lookups).
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(trace, $($arg)*);
    };
}

/// Emit a **debug**-level message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(debug, $($arg)*);
    };
}

/// Emit an **info**-level message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(info, $($arg)*);
    };
}

/// Emit a **warn**-level message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(warn, $($arg)*);
    };
}

/// Emit an **error**-level message.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__navigator_log!(error, $($arg)*);
    };
}
