//! Structured logging helpers.
//!
//! Every event carries a `subsystem` field so log lines from the bus, the
//! slot controllers and the feed runtime can be told apart.
//!
//! ```ignore
//! log_event!(info, "feed", "Scrolled", tick = 3, offset = 6);
//! log_slot_event!(debug, "feed", "Slot settled", 4, SlotStatus::Loaded);
//! ```

/// Emit a tracing event at `$level` tagged with `subsystem`.
///
/// `$level` is any tracing level macro name: `trace`, `debug`, `info`,
/// `warn` or `error`. Extra `key = value` fields follow the message.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        ::tracing::$level!(subsystem = $subsystem, $($($field)*,)? $msg)
    };
}

/// Like [`log_event!`], with the slot index and its status as fields.
#[macro_export]
macro_rules! log_slot_event {
    ($level:ident, $subsystem:expr, $msg:expr, $slot:expr, $status:expr $(, $($field:tt)*)?) => {
        $crate::log_event!(
            $level,
            $subsystem,
            $msg,
            slot = $slot,
            status = ?$status
            $(, $($field)*)?
        )
    };
}
