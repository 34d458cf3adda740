//! Error types for rule resolution, discretization and document handling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all slotwise operations
#[derive(Debug)]
pub enum SlotwiseError {
    /// Parameter validation failed and no work was performed
    ///
    /// Raised for non-positive slot diagonals, module dimensions or sampling
    /// precision, unknown mode codes and malformed module names.
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A required input was never supplied
    ///
    /// Signals "input not ready" rather than an empty result.
    MissingRequiredInput {
        /// Name of the missing input
        input: &'static str,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A JSON document could not be read or written
    Document {
        /// Path of the document
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },
}

impl fmt::Display for SlotwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MissingRequiredInput { input } => {
                write!(f, "Missing required input '{input}'")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Document { path, source } => {
                write!(f, "Malformed document '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SlotwiseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::Document { source, .. } => Some(source),
            Self::InvalidParameter { .. } | Self::MissingRequiredInput { .. } => None,
        }
    }
}

/// Convenience type alias for slotwise results
pub type Result<T> = std::result::Result<T, SlotwiseError>;

impl From<std::io::Error> for SlotwiseError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SlotwiseError {
    SlotwiseError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a missing input error
pub const fn missing_input(input: &'static str) -> SlotwiseError {
    SlotwiseError::MissingRequiredInput { input }
}

/// Create a file system error for a known path
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> SlotwiseError {
    SlotwiseError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
