//! Error Types - Patchwise Error Handling
//!
//! Provides the error type shared by every Patchwise crate. Transform steps
//! return these errors and pipelines propagate them unchanged, so a caller of
//! `apply` sees exactly the condition raised by the failing step.
//!
//! # Key Features
//! - Unified error type for tensors, samples and transforms
//! - Structured context (sizes, channel counts) for debugging
//! - Integration with `std::error::Error`
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// The main error type for Patchwise operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape mismatch between data and requested shape.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The expected shape.
        expected: Vec<usize>,
        /// The actual shape.
        actual: Vec<usize>,
    },

    /// Index out of bounds.
    #[error("Index out of bounds: index {index} for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The size of the dimension.
        size: usize,
    },

    /// Requested crop does not fit inside the image.
    #[error(
        "Requested crop size {crop_height}x{crop_width} is bigger than input size {height}x{width}"
    )]
    CropTooLarge {
        /// Crop height.
        crop_height: usize,
        /// Crop width.
        crop_width: usize,
        /// Image height.
        height: usize,
        /// Image width.
        width: usize,
    },

    /// Normalization parameters do not line up with the tensor channels.
    #[error("Channel mismatch: tensor has {channels} channels, mean has {mean} values, std has {std} values")]
    ChannelMismatch {
        /// Channel count of the tensor being normalized.
        channels: usize,
        /// Length of the mean sequence.
        mean: usize,
        /// Length of the std sequence.
        std: usize,
    },

    /// A standard deviation of zero would divide by zero.
    #[error("std evaluated to zero for channel {channel}, leading to division by zero")]
    ZeroStd {
        /// Channel whose std is zero.
        channel: usize,
    },

    /// Tensor is not shaped like an image.
    #[error("Expected tensor image of size (..., C, H, W), got shape {shape:?}")]
    InvalidImageTensor {
        /// The offending shape.
        shape: Vec<usize>,
    },

    /// A transform received a sample kind it cannot handle.
    #[error("{transform} expects {expected}, got {actual}")]
    UnexpectedSample {
        /// Name of the transform.
        transform: String,
        /// What the transform accepts.
        expected: &'static str,
        /// What it was given.
        actual: &'static str,
    },

    /// Random choice over an empty transform list.
    #[error("RandomChoice requires at least one transform")]
    EmptyChoice,

    /// Random choice weights are unusable.
    #[error("Invalid choice weights: {message}")]
    InvalidWeights {
        /// Description of the problem.
        message: String,
    },

    /// A crop or resize size of zero.
    #[error("Invalid size: {message}")]
    InvalidSize {
        /// Description of the problem.
        message: String,
    },

    /// Pixel format that cannot be converted to a tensor.
    #[error("Unsupported color type: {color_type}")]
    UnsupportedColorType {
        /// Debug name of the color type.
        color_type: String,
    },

    /// Invalid operation for the given input.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of why the operation is invalid.
        message: String,
    },
}

// =============================================================================
// Result Type
// =============================================================================

/// A specialized Result type for Patchwise operations.
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Helper Functions
// =============================================================================

impl Error {
    /// Creates a new shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Creates a new unexpected sample error.
    #[must_use]
    pub fn unexpected_sample(
        transform: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::UnexpectedSample {
            transform: transform.into(),
            expected,
            actual,
        }
    }

    /// Creates a new invalid size error.
    #[must_use]
    pub fn invalid_size(message: impl Into<String>) -> Self {
        Self::InvalidSize {
            message: message.into(),
        }
    }

    /// Creates a new invalid operation error.
    #[must_use]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
