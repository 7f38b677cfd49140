//! Structured logging helpers.
//!
//! Log lines carry consistent fields that the log shipper can index:
//! - `level`: Log level
//! - `imsi`: Subscriber identity, when the line is about one subscriber
//! - `kind`: Request kind (authentication_info, update_location, purge)
//! - `error_code`: Protocol error code of a remote answer
//! - Additional context fields

/// Severity chosen at runtime for an outcome log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Emit a `tracing` event at a severity only known at runtime.
///
/// ```rust,ignore
/// log_at!(severity, imsi = %imsi, error_code = code, "Purge answer received");
/// ```
#[macro_export]
macro_rules! log_at {
    ($severity:expr, $($arg:tt)+) => {
        match $severity {
            $crate::Severity::Info => tracing::info!($($arg)+),
            $crate::Severity::Error => tracing::error!($($arg)+),
        }
    };
}

/// Log a subscriber-related event with the standard `kind` and `imsi` fields.
///
/// Everything after the `;` is passed to the `tracing` macro unchanged.
///
/// ```rust,ignore
/// log_imsi_event!(info, kind, imsi; correlation_id = %id, "Sending {}", kind.request_name());
/// ```
#[macro_export]
macro_rules! log_imsi_event {
    ($level:ident, $kind:expr, $imsi:expr; $($rest:tt)+) => {
        tracing::$level!(kind = %$kind, imsi = %$imsi, $($rest)+)
    };
}
