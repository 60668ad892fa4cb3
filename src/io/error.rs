//! Error types for segmentation runs and external command execution

use std::fmt;
use std::path::PathBuf;

/// Main error type for all segmentation operations
#[derive(Debug)]
pub enum SegError {
    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// File is not a usable NIfTI image
    InvalidImage {
        /// Path to the offending file
        path: PathBuf,
        /// What is wrong with the file
        reason: String,
    },

    /// A tool finished but did not produce a declared output
    MissingOutput {
        /// Program that should have written the file
        program: String,
        /// Expected output path
        path: PathBuf,
    },

    /// Required executable is not on the search path
    DependencyMissing {
        /// Executable name
        program: String,
    },

    /// Executable exists but could not be started
    CommandSpawn {
        /// Executable name
        program: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// External command exited unsuccessfully
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
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

    /// Archive extension does not map to a known extraction program
    UnsupportedArchive {
        /// Archive path
        path: PathBuf,
    },

    /// Atlas files could not be located, even after extraction
    AtlasNotFound {
        /// Directory that was searched
        path: PathBuf,
    },
}

impl SegError {
    /// Exit code of the failed child process, if this error carries one
    pub const fn exit_status(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { status, .. } => *status,
            _ => None,
        }
    }
}

impl fmt::Display for SegError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidImage { path, reason } => {
                write!(f, "Invalid NIfTI image '{}': {reason}", path.display())
            }
            Self::MissingOutput { program, path } => {
                write!(
                    f,
                    "{program} did not produce expected output '{}'",
                    path.display()
                )
            }
            Self::DependencyMissing { program } => {
                write!(f, "{program} is not installed or not in the system PATH")
            }
            Self::CommandSpawn { program, source } => {
                write!(f, "Failed to start {program}: {source}")
            }
            Self::CommandFailed {
                command,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "Command exited with status {code}: {command}")?,
                    None => write!(f, "Command terminated by signal: {command}")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, "\n{stderr}")?;
                }
                Ok(())
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
            Self::UnsupportedArchive { path } => {
                write!(
                    f,
                    "Unable to determine how to extract archive '{}'",
                    path.display()
                )
            }
            Self::AtlasNotFound { path } => {
                write!(f, "Atlas not found under '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for SegError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CommandSpawn { source, .. } | Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for segmentation results
pub type Result<T> = std::result::Result<T, SegError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SegError {
    SegError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid image error
pub fn invalid_image(path: impl Into<PathBuf>, reason: &impl ToString) -> SegError {
    SegError::InvalidImage {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation that caused it
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> SegError {
    let path = path.into();
    move |source| SegError::FileSystem {
        path,
        operation,
        source,
    }
}
