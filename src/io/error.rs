//! Error types for cutout sampling, resampling and the outer I/O layer

use std::fmt;
use std::path::PathBuf;

/// Main error type for all sampling operations
#[derive(Debug)]
pub enum CutError {
    /// Sizes passed to resampling or bounds computation are unusable
    ///
    /// Covers zero-sized targets, empty source images, centers outside the
    /// image extent and grids whose shape does not match the image.
    InvalidDimensions {
        /// Operation that rejected the dimensions
        operation: &'static str,
        /// Description of what is wrong with the dimensions
        reason: String,
    },

    /// The eligible heatmap region carries no weight at draw time
    DegenerateHeatmap {
        /// Eligible region as (`rows`, `cols`)
        region: (usize, usize),
    },

    /// Tuning parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a diagnostic image to disk
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
}

impl fmt::Display for CutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { operation, reason } => {
                write!(f, "Invalid dimensions in {operation}: {reason}")
            }
            Self::DegenerateHeatmap { region } => {
                write!(
                    f,
                    "Heatmap has no weight to sample from (eligible region {}x{})",
                    region.0, region.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
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
        }
    }
}

impl std::error::Error for CutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for sampling results
pub type Result<T> = std::result::Result<T, CutError>;

impl From<std::io::Error> for CutError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<ndarray::ShapeError> for CutError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::InvalidDimensions {
            operation: "array shape",
            reason: err.to_string(),
        }
    }
}

/// Create an invalid dimensions error
pub fn invalid_dimensions(operation: &'static str, reason: &impl ToString) -> CutError {
    CutError::InvalidDimensions {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CutError {
    CutError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a generic I/O error for invalid user-supplied paths
pub fn io_error(msg: &str) -> CutError {
    CutError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
