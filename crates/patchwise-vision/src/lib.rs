//! Patchwise Vision - Image Preprocessing Pipelines
//!
//! This crate provides the image side of Patchwise:
//!
//! - **Transforms**: flip, five-crop, resize, to-tensor and normalize steps
//! - **Normalization parameters**: per-channel `(mean, std)` pairs and presets
//! - **Pipeline**: the five-crop training-input builder
//!
//! # Example
//!
//! ```ignore
//! use patchwise_vision::prelude::*;
//!
//! let pipeline = get_transform(([0.5, 0.5, 0.5], [0.25, 0.25, 0.25]));
//! let crops = pipeline.apply(&Sample::from(image))?.into_tensors()?;
//!
//! for crop in &crops {
//!     assert_eq!(crop.shape(), &[3, 64, 64]);
//! }
//! ```
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod normalize;
pub mod pipeline;
pub mod transforms;

// =============================================================================
// Re-exports
// =============================================================================

pub use normalize::NormParams;
pub use pipeline::{build_transform, get_transform, PipelineConfig};
pub use transforms::{
    FiveCrop, Interpolation, Normalize, RandomHorizontalFlip, Resize, ResizeSize, ToTensor,
};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for image preprocessing.
pub mod prelude {
    pub use crate::{
        build_transform,
        get_transform,
        // Transforms
        FiveCrop,
        Interpolation,
        // Parameters
        NormParams,
        Normalize,
        PipelineConfig,
        RandomHorizontalFlip,
        Resize,
        ToTensor,
    };

    // Re-export useful items from dependencies
    pub use patchwise_core::{Error, Result, Tensor};
    pub use patchwise_data::{Compose, Lambda, RandomChoice, Sample, Transform};
}
