//! Error reporting port.

use crate::domain::error::ErrorCode;

/// Destination for classified failure codes.
///
/// Reporting is fire-and-forget: callers never inspect an outcome and keep
/// going after non-fatal reports.
pub trait ErrorSink {
    fn report(&self, code: ErrorCode);
}
