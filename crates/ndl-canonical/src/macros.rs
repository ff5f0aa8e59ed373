//! Operation logging macros.
//!
//! An operation logs one `start` event and then exactly one `end` or
//! `end_error` event carrying `duration_ms`. Every event has `component`,
//! `op` and `event` fields so the pair can be joined downstream; failures
//! also carry the error and, when the error knows it, the document path.
//! Callers must depend on `tracing`.

/// `event` field value for an operation start.
pub const EVENT_START: &str = "start";
/// `event` field value for a successful operation end.
pub const EVENT_END: &str = "end";
/// `event` field value for a failed operation end.
pub const EVENT_END_ERROR: &str = "end_error";

/// Shared expansion of the operation logging macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __op_event {
    ($level:ident, $op:expr, $event:expr; $($field:tt)*) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($field)*
        )
    };
}

/// Logs the start of an operation at debug level.
///
/// ```
/// # use ndl_canonical::log_op_start;
/// log_op_start!("canonicalize");
/// log_op_start!("canonicalize", category = "mapping");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(debug, $op, $crate::macros::EVENT_START; $($($field)*)?)
    };
}

/// Logs the successful end of an operation at debug level.
///
/// ```
/// # use ndl_canonical::log_op_end;
/// log_op_end!("canonicalize", duration_ms = 3);
/// log_op_end!("compare", duration_ms = 3, matched = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            debug, $op, $crate::macros::EVENT_END;
            duration_ms = $duration, $($($field)*)?
        )
    };
}

/// Logs the failed end of an operation at warn level.
///
/// Extra fields follow `duration_ms`; `path` is the convention for the
/// document node the failure concerns.
///
/// ```
/// # use ndl_canonical::log_op_error;
/// let err = ndl_canonical::EncodeError::NonFiniteNumber { path: "a/[0]".into() };
/// log_op_error!("diff", err, duration_ms = 0, path = ?err.path());
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__op_event!(
            warn, $op, $crate::macros::EVENT_END_ERROR;
            duration_ms = $duration, error = %$err, $($($field)*)?
        )
    };
}
