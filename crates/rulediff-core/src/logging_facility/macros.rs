//! Operation logging macros
//!
//! `load_document` and `compute_diff` each emit a `start` event followed by
//! exactly one `end` or `end_error`. All three share the `component`, `op`
//! and `event` keys from [`schema`](crate::schema), so one run of either
//! operation can be picked out of the log by `op` alone.

/// Shared body of the op macros; not part of the public surface.
#[doc(hidden)]
#[macro_export]
macro_rules! __rulediff_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// `start` event of an operation, at `info`
///
/// ```
/// # use rulediff_core::log_op_start;
/// log_op_start!("load_document", path = "rules.yaml");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__rulediff_op_event!(info, $op, $crate::schema::EVENT_START $(, $($field)*)?)
    };
}

/// `end` event of a successful operation, at `info`
///
/// `duration_ms` is mandatory; counts such as `rule_count` may follow.
///
/// ```
/// # use rulediff_core::log_op_end;
/// log_op_end!("compute_diff", duration_ms = 3, diff_count = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__rulediff_op_event!(
            info,
            $op,
            $crate::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// `end_error` event of a failed operation, at `error`
///
/// The error goes through [`ExError`](crate::errors::ExError), so the event
/// carries its stable `err_code` and the rendered `error` text.
///
/// ```
/// # use rulediff_core::{log_op_error, errors::RuleDiffError};
/// let err = RuleDiffError::CorruptedDocument { path: "a.yaml".into() };
/// log_op_error!("load_document", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = ::core::convert::Into::into($err);
        $crate::__rulediff_op_event!(
            error,
            $op,
            $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err
            $(, $($field)*)?
        )
    }};
}
