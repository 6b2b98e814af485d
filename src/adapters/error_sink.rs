//! Error sink adapters.
//!
//! [`TracingErrorSink`] is the production sink and turns each code into a
//! `tracing` event. [`RecordingErrorSink`] keeps timestamped records so callers
//! (and tests) can inspect what was reported.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::domain::error::ErrorCode;
use crate::ports::error_sink_port::ErrorSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, code: ErrorCode) {
        if code.is_warning() {
            tracing::warn!(code = code.as_i32(), kind = ?code, "error reported");
        } else {
            tracing::error!(code = code.as_i32(), kind = ?code, "error reported");
        }
    }
}

/// One reported code and when it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorRecord {
    pub code: ErrorCode,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct RecordingErrorSink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl RecordingErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.records().into_iter().map(|r| r.code).collect()
    }

    pub fn last(&self) -> Option<ErrorRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ErrorSink for RecordingErrorSink {
    fn report(&self, code: ErrorCode) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ErrorRecord {
                code,
                at: Utc::now(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingErrorSink::new();
        assert!(sink.is_empty());
        sink.report(ErrorCode::SaveFoundBadLine);
        sink.report(ErrorCode::FailedToRename);
        assert_eq!(
            sink.codes(),
            vec![ErrorCode::SaveFoundBadLine, ErrorCode::FailedToRename]
        );
        assert_eq!(sink.last().map(|r| r.code), Some(ErrorCode::FailedToRename));
    }

    #[test]
    fn recording_sink_timestamps_are_monotonic() {
        let sink = RecordingErrorSink::new();
        let before = Utc::now();
        sink.report(ErrorCode::FileIo);
        sink.report(ErrorCode::VariableNotFound);
        let records = sink.records();
        assert!(records[0].at >= before);
        assert!(records[1].at >= records[0].at);
    }

    #[test]
    fn clear_empties_the_log() {
        let sink = RecordingErrorSink::new();
        sink.report(ErrorCode::FileIo);
        sink.clear();
        assert!(sink.is_empty());
        assert_eq!(sink.last(), None);
    }

    #[test]
    fn tracing_sink_accepts_every_code() {
        for code in [ErrorCode::ReadingConfigFile, ErrorCode::SaveFoundBadLine] {
            TracingErrorSink.report(code);
        }
    }
}
