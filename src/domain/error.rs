//! Domain error types and the numeric error-code vocabulary.

use std::path::PathBuf;

/// Numeric codes understood by the control system's error log.
///
/// Values are fixed; they appear in downlinked error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    ReadingConfigFile = 11,
    VariableNotFound = 12,
    DoubleInvalidValue = 13,
    DoubleOutOfRange = 14,
    FloatInvalidValue = 15,
    FloatOutOfRange = 16,
    IntInvalidValue = 17,
    IntOutOfRange = 18,
    SaveFoundBadLine = 19,
    FailedToRename = 20,
    FileIo = 21,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Warnings are reported but never abort the operation that raised them.
    pub fn is_warning(self) -> bool {
        matches!(self, ErrorCode::SaveFoundBadLine)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// Numeric view requested from a stored string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Double,
    Float,
    Int,
    Hex,
    Long,
}

impl std::fmt::Display for NumericKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NumericKind::Double => "double",
            NumericKind::Float => "float",
            NumericKind::Int => "int",
            NumericKind::Hex => "hex",
            NumericKind::Long => "long",
        };
        f.write_str(name)
    }
}

/// Top-level error type for tunables.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error accessing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed line {line} in {}: {text:?}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("failed to replace {} with {}: {source}", .path.display(), .temp.display())]
    Rename {
        path: PathBuf,
        temp: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no value for key '{key}'")]
    NotFound { key: String },

    #[error("invalid {kind} value for '{key}': {value:?}")]
    InvalidValue {
        key: String,
        kind: NumericKind,
        value: String,
    },

    #[error("{kind} value for '{key}' out of range: {value:?}")]
    OutOfRange {
        key: String,
        kind: NumericKind,
        value: String,
    },
}

impl ConfigError {
    /// The code forwarded to the error sink for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Io { .. } => ErrorCode::FileIo,
            ConfigError::Parse { .. } => ErrorCode::ReadingConfigFile,
            ConfigError::Rename { .. } => ErrorCode::FailedToRename,
            ConfigError::NotFound { .. } => ErrorCode::VariableNotFound,
            ConfigError::InvalidValue { kind, .. } => match kind {
                NumericKind::Double => ErrorCode::DoubleInvalidValue,
                NumericKind::Float => ErrorCode::FloatInvalidValue,
                NumericKind::Int | NumericKind::Hex | NumericKind::Long => {
                    ErrorCode::IntInvalidValue
                }
            },
            ConfigError::OutOfRange { kind, .. } => match kind {
                NumericKind::Double => ErrorCode::DoubleOutOfRange,
                NumericKind::Float => ErrorCode::FloatOutOfRange,
                NumericKind::Int | NumericKind::Hex | NumericKind::Long => {
                    ErrorCode::IntOutOfRange
                }
            },
        }
    }

    /// Legacy integer status: `-1` for load/save failures, `1`/`2`/`3` for
    /// lookups (not found, invalid value, out of range).
    pub fn status(&self) -> i32 {
        match self {
            ConfigError::Io { .. } | ConfigError::Parse { .. } | ConfigError::Rename { .. } => -1,
            ConfigError::NotFound { .. } => 1,
            ConfigError::InvalidValue { .. } => 2,
            ConfigError::OutOfRange { .. } => 3,
        }
    }
}

impl From<&ConfigError> for std::process::ExitCode {
    fn from(err: &ConfigError) -> Self {
        let code: u8 = match err {
            ConfigError::Io { .. } | ConfigError::Rename { .. } => 1,
            ConfigError::Parse { .. } => 2,
            ConfigError::NotFound { .. } => 3,
            ConfigError::InvalidValue { .. } | ConfigError::OutOfRange { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
