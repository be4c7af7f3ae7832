//! Pipeline - Five-Crop Preprocessing Builder
//!
//! Builds the training-input pipeline: a random horizontal flip, a five-crop,
//! a resize of every crop, conversion to channel-first tensors and per-channel
//! normalization. Applied to one image, the pipeline yields five normalized
//! tensors of shape `(C, 64, 64)` with the default configuration.
//!
//! # Example
//!
//! ```ignore
//! use patchwise_vision::prelude::*;
//!
//! let pipeline = get_transform(NormParams::imagenet());
//! let crops = pipeline.apply(&Sample::from(image))?.into_tensors()?;
//! assert_eq!(crops.len(), 5);
//! ```
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use patchwise_data::{Compose, RandomChoice};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::NormParams;
use crate::transforms::{FiveCrop, Interpolation, Normalize, RandomHorizontalFlip, Resize, ToTensor};

// =============================================================================
// Configuration
// =============================================================================

/// Settings for a five-crop pipeline.
///
/// Sizes are `[height, width]`. A built pipeline keeps the values it was built
/// with; build a new one to change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Probability of the horizontal flip.
    #[serde(default = "default_flip_probability")]
    pub flip_probability: f32,

    /// Size of each of the five crops.
    #[serde(default = "default_crop_size")]
    pub crop_size: [u32; 2],

    /// Size every crop is resized to.
    #[serde(default = "default_resize")]
    pub resize: [u32; 2],

    /// Resampling filter for the resize.
    #[serde(default)]
    pub interpolation: Interpolation,
}

fn default_flip_probability() -> f32 {
    0.5
}

fn default_crop_size() -> [u32; 2] {
    [38, 38]
}

fn default_resize() -> [u32; 2] {
    [64, 64]
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            flip_probability: default_flip_probability(),
            crop_size: default_crop_size(),
            resize: default_resize(),
            interpolation: Interpolation::default(),
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the five-crop pipeline with the default configuration.
pub fn get_transform(norm: impl Into<NormParams>) -> Compose {
    build_transform(&PipelineConfig::default(), norm)
}

/// Builds the five-crop pipeline from an explicit configuration.
///
/// Steps, in order: random choice over a horizontal flip, five-crop, resize,
/// to-tensor, normalize. Nothing is validated here; bad sizes or parameters
/// fail when the pipeline is applied.
pub fn build_transform(config: &PipelineConfig, norm: impl Into<NormParams>) -> Compose {
    let norm = norm.into();
    let [crop_h, crop_w] = config.crop_size;
    let [resize_h, resize_w] = config.resize;

    debug!(
        crop = ?config.crop_size,
        resize = ?config.resize,
        flip_probability = config.flip_probability,
        channels = norm.channels(),
        "building five-crop pipeline"
    );

    Compose::empty()
        .add(RandomChoice::new(vec![Box::new(
            RandomHorizontalFlip::with_probability(config.flip_probability),
        )]))
        .add(FiveCrop::new(crop_h, crop_w))
        .add(Resize::new(resize_h, resize_w).with_interpolation(config.interpolation))
        .add(ToTensor::new())
        .add(Normalize::from_params(norm))
}

// =============================================================================
// Tests
// =============================================================================
