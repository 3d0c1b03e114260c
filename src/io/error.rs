//! Error types for puzzle loading and solver setup

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all solver operations
#[derive(Debug)]
pub enum PackingError {
    /// Puzzle text contains a line that does not fit the input grammar
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// The offending line as it appeared in the input
        content: String,
        /// Explanation of what was expected
        reason: String,
    },

    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
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

    /// Worker pool for parallel region evaluation could not be built
    ThreadPool {
        /// Requested number of worker threads
        jobs: usize,
        /// Underlying rayon error
        source: rayon::ThreadPoolBuildError,
    },
}

impl fmt::Display for PackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                line,
                content,
                reason,
            } => {
                write!(f, "Parse error on line {line} ('{content}'): {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
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
            Self::ThreadPool { jobs, source } => {
                write!(f, "Failed to start {jobs} worker threads: {source}")
            }
        }
    }
}

impl std::error::Error for PackingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::ThreadPool { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, PackingError>;

/// Attaches the path and operation to raw I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into a [`PackingError::FileSystem`] naming `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| PackingError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create a parse error for a 0-based line index
pub fn parse_error(index: usize, content: &str, reason: &impl ToString) -> PackingError {
    PackingError::Parse {
        line: index + 1,
        content: content.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PackingError {
    PackingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
