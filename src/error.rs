//! Error types for dctcodec

use std::fmt;

use crate::plane::Shape;

/// Result type for dctcodec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for dctcodec operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Chroma mode string is not one of `4:2:0`, `4:2:2`, `4:4:4`
    InvalidChromaMode {
        value: String,
    },
    /// Interpolation kernel name is not recognized
    InvalidInterpolation {
        value: String,
    },
    /// Block size is zero or not a power of two
    InvalidBlockSize {
        value: usize,
        reason: &'static str,
    },
    /// Invalid image dimensions
    InvalidDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },
    /// Sample buffer length does not match the declared dimensions
    InvalidPixelData {
        expected: usize,
        actual: usize,
    },
    /// The three input channels do not share one shape
    ChannelShapeMismatch {
        channel: &'static str,
        expected: Shape,
        actual: Shape,
    },
    /// A plane reaching a pipeline stage has the wrong dimensions
    ShapeMismatch {
        stage: &'static str,
        expected: Shape,
        actual: Shape,
    },
    /// Decoder configuration disagrees with the metadata carried by the encoded data
    MetadataMismatch {
        field: &'static str,
        encoded: String,
        requested: String,
    },
    /// Reported by a downstream coefficient encoder
    Coefficient {
        reason: String,
    },
}

impl Error {
    /// Whether this error was raised by configuration or input validation,
    /// before any samples were processed.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidChromaMode { .. }
                | Error::InvalidInterpolation { .. }
                | Error::InvalidBlockSize { .. }
                | Error::InvalidDimensions { .. }
                | Error::InvalidPixelData { .. }
                | Error::ChannelShapeMismatch { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidChromaMode { value } => {
                write!(
                    f,
                    "Invalid chroma mode '{}': expected one of 4:2:0, 4:2:2, 4:4:4",
                    value
                )
            }
            Error::InvalidInterpolation { value } => {
                write!(f, "Invalid interpolation '{}': expected linear or cubic", value)
            }
            Error::InvalidBlockSize { value, reason } => {
                write!(f, "Invalid block size {}: {}", value, reason)
            }
            Error::InvalidDimensions {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid dimensions {}x{}: {}", width, height, reason)
            }
            Error::InvalidPixelData { expected, actual } => {
                write!(f, "Expected {} bytes of pixel data, got {}", expected, actual)
            }
            Error::ChannelShapeMismatch {
                channel,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Channel {} has shape {}, expected {}",
                    channel, actual, expected
                )
            }
            Error::ShapeMismatch {
                stage,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Shape mismatch at {}: expected {}, got {}",
                    stage, expected, actual
                )
            }
            Error::MetadataMismatch {
                field,
                encoded,
                requested,
            } => {
                write!(
                    f,
                    "Encoded data uses {} {}, decoder configured for {}",
                    field, encoded, requested
                )
            }
            Error::Coefficient { reason } => write!(f, "Coefficient encoding failed: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
