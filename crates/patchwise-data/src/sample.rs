//! Sample - Values Flowing Through a Pipeline
//!
//! A `Sample` is what one transform hands to the next. Image steps see images,
//! numeric steps see tensors, and a step that fans one input out into several
//! (five-crop) produces a list. The `map_*` helpers lift a per-item operation
//! over both the single and the list form, so a step placed after a fan-out is
//! applied to every item independently.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use patchwise_core::{Error, Result, Tensor};

// =============================================================================
// Sample
// =============================================================================

/// A value passed between pipeline steps.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// A single image in its native pixel representation.
    Image(DynamicImage),
    /// Several images, e.g. the output of a five-crop.
    Images(Vec<DynamicImage>),
    /// A single numeric array.
    Tensor(Tensor),
    /// Several numeric arrays.
    Tensors(Vec<Tensor>),
}

impl Sample {
    /// Short description of the variant, used in logs and errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Images(_) => "image list",
            Self::Tensor(_) => "tensor",
            Self::Tensors(_) => "tensor list",
        }
    }

    /// Number of items held (1 for the single variants).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Image(_) | Self::Tensor(_) => 1,
            Self::Images(images) => images.len(),
            Self::Tensors(tensors) => tensors.len(),
        }
    }

    /// Returns true if the sample is an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Unwrapping
    // =========================================================================

    /// Returns the image of a single-image sample.
    pub fn into_image(self) -> Result<DynamicImage> {
        match self {
            Self::Image(image) => Ok(image),
            other => Err(Error::unexpected_sample(
                "Sample::into_image",
                "an image",
                other.kind(),
            )),
        }
    }

    /// Returns the images of an image sample, wrapping a single image.
    pub fn into_images(self) -> Result<Vec<DynamicImage>> {
        match self {
            Self::Image(image) => Ok(vec![image]),
            Self::Images(images) => Ok(images),
            other => Err(Error::unexpected_sample(
                "Sample::into_images",
                "images",
                other.kind(),
            )),
        }
    }

    /// Returns the tensor of a single-tensor sample.
    pub fn into_tensor(self) -> Result<Tensor> {
        match self {
            Self::Tensor(tensor) => Ok(tensor),
            other => Err(Error::unexpected_sample(
                "Sample::into_tensor",
                "a tensor",
                other.kind(),
            )),
        }
    }

    /// Returns the tensors of a tensor sample, wrapping a single tensor.
    pub fn into_tensors(self) -> Result<Vec<Tensor>> {
        match self {
            Self::Tensor(tensor) => Ok(vec![tensor]),
            Self::Tensors(tensors) => Ok(tensors),
            other => Err(Error::unexpected_sample(
                "Sample::into_tensors",
                "tensors",
                other.kind(),
            )),
        }
    }

    // =========================================================================
    // Element-wise Lifting
    // =========================================================================

    /// Applies `f` to every image, keeping the single/list form.
    pub fn map_images<F>(&self, transform: &str, mut f: F) -> Result<Self>
    where
        F: FnMut(&DynamicImage) -> Result<DynamicImage>,
    {
        match self {
            Self::Image(image) => f(image).map(Self::Image),
            Self::Images(images) => images
                .iter()
                .map(&mut f)
                .collect::<Result<Vec<_>>>()
                .map(Self::Images),
            other => Err(Error::unexpected_sample(transform, "images", other.kind())),
        }
    }

    /// Converts every image to a tensor, keeping the single/list form.
    pub fn images_to_tensors<F>(&self, transform: &str, mut f: F) -> Result<Self>
    where
        F: FnMut(&DynamicImage) -> Result<Tensor>,
    {
        match self {
            Self::Image(image) => f(image).map(Self::Tensor),
            Self::Images(images) => images
                .iter()
                .map(&mut f)
                .collect::<Result<Vec<_>>>()
                .map(Self::Tensors),
            other => Err(Error::unexpected_sample(transform, "images", other.kind())),
        }
    }

    /// Applies `f` to every tensor, keeping the single/list form.
    pub fn map_tensors<F>(&self, transform: &str, mut f: F) -> Result<Self>
    where
        F: FnMut(&Tensor) -> Result<Tensor>,
    {
        match self {
            Self::Tensor(tensor) => f(tensor).map(Self::Tensor),
            Self::Tensors(tensors) => tensors
                .iter()
                .map(&mut f)
                .collect::<Result<Vec<_>>>()
                .map(Self::Tensors),
            other => Err(Error::unexpected_sample(transform, "tensors", other.kind())),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DynamicImage> for Sample {
    fn from(image: DynamicImage) -> Self {
        Self::Image(image)
    }
}

impl From<RgbImage> for Sample {
    fn from(image: RgbImage) -> Self {
        Self::Image(DynamicImage::ImageRgb8(image))
    }
}

impl From<RgbaImage> for Sample {
    fn from(image: RgbaImage) -> Self {
        Self::Image(DynamicImage::ImageRgba8(image))
    }
}

impl From<GrayImage> for Sample {
    fn from(image: GrayImage) -> Self {
        Self::Image(DynamicImage::ImageLuma8(image))
    }
}

impl From<Vec<DynamicImage>> for Sample {
    fn from(images: Vec<DynamicImage>) -> Self {
        Self::Images(images)
    }
}

impl From<Tensor> for Sample {
    fn from(tensor: Tensor) -> Self {
        Self::Tensor(tensor)
    }
}

impl From<Vec<Tensor>> for Sample {
    fn from(tensors: Vec<Tensor>) -> Self {
        Self::Tensors(tensors)
    }
}

// =============================================================================
// Tests
// =============================================================================
