//! Error types for pipeline stages, external tools and report parsing

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pipeline operations
#[derive(Debug)]
pub enum PipelineError {
    /// Failed to load an image from the artifact store
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to the artifact store
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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

    /// Input image cannot be evaluated
    InvalidSourceData {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// A stage produced an image of unexpected size
    DimensionMismatch {
        /// File name of the offending artifact
        artifact: &'static str,
        /// Expected (width, height)
        expected: (u32, u32),
        /// Actual (width, height)
        actual: (u32, u32),
    },

    /// External tool could not be started
    ToolLaunch {
        /// Program that was invoked
        program: PathBuf,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// External tool exited unsuccessfully
    ToolFailed {
        /// Logical name of the tool
        tool: &'static str,
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Tool output did not contain the expected value
    Parse {
        /// What was being parsed
        what: &'static str,
        /// Offending text
        text: String,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::DimensionMismatch {
                artifact,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Artifact '{artifact}' is {}x{}, expected {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            Self::ToolLaunch { program, source } => {
                write!(f, "Failed to launch '{}': {source}", program.display())
            }
            Self::ToolFailed {
                tool,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "Tool '{tool}' exited with status {code}")?,
                    None => write!(f, "Tool '{tool}' was terminated by a signal")?,
                }
                let detail = stderr.trim();
                if detail.is_empty() {
                    Ok(())
                } else {
                    write!(f, ": {detail}")
                }
            }
            Self::Parse { what, text } => {
                write!(f, "Could not parse {what} from '{}'", text.trim())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::ToolLaunch { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PipelineError {
    PipelineError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a parse error for tool output
pub fn parse_error(what: &'static str, text: &impl ToString) -> PipelineError {
    PipelineError::Parse {
        what,
        text: text.to_string(),
    }
}
