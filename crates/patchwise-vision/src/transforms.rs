//! Image Transforms - Vision-Specific Preprocessing
//!
//! Provides the image steps of a preprocessing pipeline. Steps up to `ToTensor`
//! operate on images in their native pixel representation; `ToTensor` turns
//! them into channel-first `f32` tensors and `Normalize` rescales those per
//! channel.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use image::imageops::FilterType;
use image::DynamicImage;
use patchwise_core::{Error, Result, Tensor};
use patchwise_data::{Sample, Transform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::normalize::NormParams;

// =============================================================================
// RandomHorizontalFlip
// =============================================================================

/// Randomly flips an image horizontally with given probability.
///
/// One draw is made per `apply`; when the sample is a list, every image in it
/// shares that draw.
pub struct RandomHorizontalFlip {
    probability: f32,
}

impl RandomHorizontalFlip {
    /// Creates a new `RandomHorizontalFlip` with probability 0.5.
    #[must_use]
    pub fn new() -> Self {
        Self { probability: 0.5 }
    }

    /// Creates a `RandomHorizontalFlip` with custom probability.
    #[must_use]
    pub fn with_probability(probability: f32) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Returns the flip probability.
    #[must_use]
    pub fn probability(&self) -> f32 {
        self.probability
    }
}

impl Default for RandomHorizontalFlip {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for RandomHorizontalFlip {
    fn apply(&self, input: &Sample) -> Result<Sample> {
        let flip = rand::thread_rng().gen::<f32>() < self.probability;
        trace!(flip, probability = self.probability, "horizontal flip");

        input.map_images(self.name(), |image| {
            Ok(if flip { image.fliph() } else { image.clone() })
        })
    }

    fn name(&self) -> &'static str {
        "RandomHorizontalFlip"
    }
}

// =============================================================================
// FiveCrop
// =============================================================================

/// Crops the four corners and the center of an image.
///
/// Output order is top-left, top-right, bottom-left, bottom-right, center.
pub struct FiveCrop {
    height: u32,
    width: u32,
}

impl FiveCrop {
    /// Creates a new `FiveCrop` transform.
    #[must_use]
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Creates a square `FiveCrop` transform.
    #[must_use]
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Returns the five crops of a single image.
    pub fn crop(&self, image: &DynamicImage) -> Result<Vec<DynamicImage>> {
        let (crop_h, crop_w) = (self.height, self.width);
        if crop_h == 0 || crop_w == 0 {
            return Err(Error::invalid_size(format!(
                "crop size must be positive, got {crop_h}x{crop_w}"
            )));
        }

        let (h, w) = (image.height(), image.width());
        if crop_h > h || crop_w > w {
            return Err(Error::CropTooLarge {
                crop_height: crop_h as usize,
                crop_width: crop_w as usize,
                height: h as usize,
                width: w as usize,
            });
        }

        let top = center_offset(h, crop_h);
        let left = center_offset(w, crop_w);

        Ok(vec![
            image.crop_imm(0, 0, crop_w, crop_h),
            image.crop_imm(w - crop_w, 0, crop_w, crop_h),
            image.crop_imm(0, h - crop_h, crop_w, crop_h),
            image.crop_imm(w - crop_w, h - crop_h, crop_w, crop_h),
            image.crop_imm(left, top, crop_w, crop_h),
        ])
    }
}

/// Offset of a centered crop; halves are rounded to even.
fn center_offset(size: u32, crop: u32) -> u32 {
    (f64::from(size - crop) / 2.0).round_ties_even() as u32
}

impl Transform for FiveCrop {
    fn apply(&self, input: &Sample) -> Result<Sample> {
        match input {
            Sample::Image(image) => self.crop(image).map(Sample::Images),
            other => Err(Error::unexpected_sample(
                self.name(),
                "a single image",
                other.kind(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "FiveCrop"
    }
}

// =============================================================================
// Resize
// =============================================================================

/// Resampling filter used by `Resize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Nearest neighbour.
    Nearest,
    /// Linear in both directions.
    #[default]
    Bilinear,
    /// Cubic (Catmull-Rom) in both directions.
    Bicubic,
    /// Lanczos with a window of 3.
    Lanczos,
}

impl Interpolation {
    fn filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::Bicubic => FilterType::CatmullRom,
            Self::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Target size of a `Resize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeSize {
    /// Resize to exactly this height and width.
    Exact {
        /// Output height.
        height: u32,
        /// Output width.
        width: u32,
    },
    /// Scale the shorter side to this length, keeping the aspect ratio.
    ShorterSide(u32),
}

/// Resizes an image to the specified size.
pub struct Resize {
    size: ResizeSize,
    interpolation: Interpolation,
}

impl Resize {
    /// Creates a new Resize transform with an exact output size.
    #[must_use]
    pub fn new(height: u32, width: u32) -> Self {
        Self {
            size: ResizeSize::Exact { height, width },
            interpolation: Interpolation::default(),
        }
    }

    /// Creates a square Resize transform.
    #[must_use]
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Creates a Resize that matches the shorter side to `size`.
    #[must_use]
    pub fn shorter_side(size: u32) -> Self {
        Self {
            size: ResizeSize::ShorterSide(size),
            interpolation: Interpolation::default(),
        }
    }

    /// Sets the interpolation filter.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Output `(width, height)` for an input of the given dimensions.
    fn target(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        match self.size {
            ResizeSize::Exact { height: 0, .. } | ResizeSize::Exact { width: 0, .. } => Err(
                Error::invalid_size("resize target must be positive in both dimensions"),
            ),
            ResizeSize::Exact { height, width } => Ok((width, height)),
            ResizeSize::ShorterSide(0) => {
                Err(Error::invalid_size("resize target must be positive"))
            }
            ResizeSize::ShorterSide(_) if width == 0 || height == 0 => {
                Err(Error::invalid_size("cannot resize an empty image"))
            }
            ResizeSize::ShorterSide(short) => {
                let scale = |long: u32, current_short: u32| {
                    (u64::from(short) * u64::from(long) / u64::from(current_short)) as u32
                };
                if width <= height {
                    Ok((short, scale(height, width)))
                } else {
                    Ok((scale(width, height), short))
                }
            }
        }
    }
}

impl Transform for Resize {
    fn apply(&self, input: &Sample) -> Result<Sample> {
        input.map_images(self.name(), |image| {
            let (width, height) = self.target(image.width(), image.height())?;
            Ok(image.resize_exact(width, height, self.interpolation.filter()))
        })
    }

    fn name(&self) -> &'static str {
        "Resize"
    }
}

// =============================================================================
// ToTensor
// =============================================================================

/// Converts images to channel-first `f32` tensors.
///
/// 8-bit images are scaled by 1/255 and 16-bit images by 1/65535, giving
/// values in [0, 1]. Floating-point images are copied unscaled.
pub struct ToTensor;

impl ToTensor {
    /// Creates a new `ToTensor` transform.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Converts a single image.
    pub fn convert(image: &DynamicImage) -> Result<Tensor> {
        let (h, w) = (image.height() as usize, image.width() as usize);
        let u8_scale = |v: u8| f32::from(v) / 255.0;
        let u16_scale = |v: u16| f32::from(v) / 65535.0;
        let identity = |v: f32| v;

        match image {
            DynamicImage::ImageLuma8(buf) => planar(buf.as_raw().as_slice(), 1, h, w, u8_scale),
            DynamicImage::ImageLumaA8(buf) => planar(buf.as_raw().as_slice(), 2, h, w, u8_scale),
            DynamicImage::ImageRgb8(buf) => planar(buf.as_raw().as_slice(), 3, h, w, u8_scale),
            DynamicImage::ImageRgba8(buf) => planar(buf.as_raw().as_slice(), 4, h, w, u8_scale),
            DynamicImage::ImageLuma16(buf) => planar(buf.as_raw().as_slice(), 1, h, w, u16_scale),
            DynamicImage::ImageLumaA16(buf) => planar(buf.as_raw().as_slice(), 2, h, w, u16_scale),
            DynamicImage::ImageRgb16(buf) => planar(buf.as_raw().as_slice(), 3, h, w, u16_scale),
            DynamicImage::ImageRgba16(buf) => planar(buf.as_raw().as_slice(), 4, h, w, u16_scale),
            DynamicImage::ImageRgb32F(buf) => planar(buf.as_raw().as_slice(), 3, h, w, identity),
            DynamicImage::ImageRgba32F(buf) => planar(buf.as_raw().as_slice(), 4, h, w, identity),
            other => Err(Error::UnsupportedColorType {
                color_type: format!("{:?}", other.color()),
            }),
        }
    }
}

impl Default for ToTensor {
    fn default() -> Self {
        Self::new()
    }
}

/// Reorders interleaved `HWC` samples into a `CHW` tensor.
fn planar<S, F>(raw: &[S], channels: usize, height: usize, width: usize, scale: F) -> Result<Tensor>
where
    S: Copy,
    F: Fn(S) -> f32,
{
    let plane = height * width;
    let mut data = vec![0.0; channels * plane];
    for (pixel, values) in raw.chunks_exact(channels).enumerate() {
        for (c, &value) in values.iter().enumerate() {
            data[c * plane + pixel] = scale(value);
        }
    }
    Tensor::from_vec(data, &[channels, height, width])
}

impl Transform for ToTensor {
    fn apply(&self, input: &Sample) -> Result<Sample> {
        input.images_to_tensors(self.name(), Self::convert)
    }

    fn name(&self) -> &'static str {
        "ToTensor"
    }
}

// =============================================================================
// Normalize
// =============================================================================

/// Normalizes a tensor image with per-channel mean and std.
///
/// The channel dimension is the third from the end, so both `(C, H, W)` and
/// batched `(N, C, H, W)` tensors are accepted.
pub struct Normalize {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Normalize {
    /// Creates a new `Normalize` with per-channel mean and std.
    #[must_use]
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Self {
        Self { mean, std }
    }

    /// Creates a `Normalize` from a parameter pair.
    #[must_use]
    pub fn from_params(params: NormParams) -> Self {
        Self::new(params.mean, params.std)
    }

    /// Normalizes a single tensor.
    pub fn normalize(&self, input: &Tensor) -> Result<Tensor> {
        let shape = input.shape();
        let rank = shape.len();
        if rank < 3 {
            return Err(Error::InvalidImageTensor {
                shape: shape.to_vec(),
            });
        }

        let channels = shape[rank - 3];
        if self.mean.len() != channels || self.std.len() != channels {
            return Err(Error::ChannelMismatch {
                channels,
                mean: self.mean.len(),
                std: self.std.len(),
            });
        }
        if let Some(channel) = self.std.iter().position(|&s| s == 0.0) {
            return Err(Error::ZeroStd { channel });
        }

        let mut output = input.clone();
        let plane = shape[rank - 2] * shape[rank - 1];
        if plane == 0 {
            return Ok(output);
        }

        for (index, values) in output.as_mut_slice().chunks_exact_mut(plane).enumerate() {
            let ch = index % channels;
            let (mean, std) = (self.mean[ch], self.std[ch]);
            for value in values {
                *value = (*value - mean) / std;
            }
        }

        Ok(output)
    }
}

impl Transform for Normalize {
    fn apply(&self, input: &Sample) -> Result<Sample> {
        input.map_tensors(self.name(), |tensor| self.normalize(tensor))
    }

    fn name(&self) -> &'static str {
        "Normalize"
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    /// 4x4 grayscale image with pixel value `y * 4 + x`.
    fn ramp_4x4() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(4, 4, |x, y| Luma([(y * 4 + x) as u8])))
    }

    fn pixels(image: &DynamicImage) -> Vec<u8> {
        image.to_luma8().into_raw()
    }

    #[test]
    fn test_random_horizontal_flip_always() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_raw(2, 1, vec![1, 2]).unwrap());

        let flip = RandomHorizontalFlip::with_probability(1.0);
        let output = flip.apply(&Sample::from(image)).unwrap().into_image().unwrap();

        assert_eq!(pixels(&output), vec![2, 1]);
    }

    #[test]
    fn test_random_horizontal_flip_never() {
        let image = ramp_4x4();

        let flip = RandomHorizontalFlip::with_probability(0.0);
        for _ in 0..20 {
            let output = flip.apply(&Sample::from(image.clone())).unwrap();
            assert_eq!(output, Sample::Image(image.clone()));
        }
    }

    #[test]
    fn test_random_horizontal_flip_clamps() {
        assert_eq!(RandomHorizontalFlip::with_probability(3.0).probability(), 1.0);
        assert_eq!(RandomHorizontalFlip::with_probability(-1.0).probability(), 0.0);
        assert_eq!(RandomHorizontalFlip::default().probability(), 0.5);
    }

    #[test]
    fn test_random_horizontal_flip_rejects_tensor() {
        let flip = RandomHorizontalFlip::new();
        let err = flip.apply(&Sample::from(Tensor::zeros(&[1, 2, 2]))).unwrap_err();
        assert!(matches!(err, Error::UnexpectedSample { .. }));
    }

    #[test]
    fn test_five_crop_order() {
        let crops = FiveCrop::square(2).crop(&ramp_4x4()).unwrap();

        assert_eq!(crops.len(), 5);
        assert_eq!(pixels(&crops[0]), vec![0, 1, 4, 5]);
        assert_eq!(pixels(&crops[1]), vec![2, 3, 6, 7]);
        assert_eq!(pixels(&crops[2]), vec![8, 9, 12, 13]);
        assert_eq!(pixels(&crops[3]), vec![10, 11, 14, 15]);
        assert_eq!(pixels(&crops[4]), vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_five_crop_rectangular() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(10, 6));
        let crops = FiveCrop::new(4, 3).crop(&image).unwrap();
        for crop in &crops {
            assert_eq!((crop.width(), crop.height()), (3, 4));
        }
    }

    #[test]
    fn test_center_offset_rounds_half_to_even() {
        assert_eq!(center_offset(4, 2), 1);
        assert_eq!(center_offset(5, 2), 2);
        assert_eq!(center_offset(7, 2), 2);
        assert_eq!(center_offset(38, 38), 0);
    }

    #[test]
    fn test_five_crop_too_large() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(30, 30));
        let err = FiveCrop::square(38).apply(&Sample::from(image)).unwrap_err();
        assert_eq!(
            err,
            Error::CropTooLarge {
                crop_height: 38,
                crop_width: 38,
                height: 30,
                width: 30,
            }
        );
    }

    #[test]
    fn test_five_crop_one_dimension_too_small() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(100, 37));
        assert!(matches!(
            FiveCrop::square(38).crop(&image),
            Err(Error::CropTooLarge { .. })
        ));
    }

    #[test]
    fn test_five_crop_exact_size() {
        let image = ramp_4x4();
        let crops = FiveCrop::square(4).crop(&image).unwrap();
        assert!(crops.iter().all(|c| pixels(c) == pixels(&image)));
    }

    #[test]
    fn test_five_crop_invalid_input() {
        assert!(matches!(
            FiveCrop::square(0).crop(&ramp_4x4()),
            Err(Error::InvalidSize { .. })
        ));

        let list = Sample::from(vec![ramp_4x4(), ramp_4x4()]);
        assert!(matches!(
            FiveCrop::square(2).apply(&list),
            Err(Error::UnexpectedSample { .. })
        ));
    }

    #[test]
    fn test_resize_exact() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(38, 38));
        let output = Resize::square(64)
            .apply(&Sample::from(image))
            .unwrap()
            .into_image()
            .unwrap();
        assert_eq!((output.width(), output.height()), (64, 64));
    }

    #[test]
    fn test_resize_each_image_in_list() {
        let list = Sample::from(vec![ramp_4x4(); 5]);
        let output = Resize::new(8, 6).apply(&list).unwrap().into_images().unwrap();
        assert_eq!(output.len(), 5);
        assert!(output.iter().all(|img| img.width() == 6 && img.height() == 8));
    }

    #[test]
    fn test_resize_shorter_side() {
        let resize = Resize::shorter_side(25);
        assert_eq!(resize.target(100, 50).unwrap(), (50, 25));
        assert_eq!(resize.target(30, 90).unwrap(), (25, 75));
        assert_eq!(resize.target(33, 50).unwrap(), (25, 37));
    }

    #[test]
    fn test_resize_invalid_size() {
        assert!(Resize::new(0, 4).target(8, 8).is_err());
        assert!(Resize::shorter_side(0).target(8, 8).is_err());
        assert!(Resize::shorter_side(4).target(0, 8).is_err());
    }

    #[test]
    fn test_resize_nearest_preserves_values() {
        let output = Resize::square(8)
            .with_interpolation(Interpolation::Nearest)
            .apply(&Sample::from(ramp_4x4()))
            .unwrap()
            .into_image()
            .unwrap();
        let values = pixels(&output);
        assert!(values.iter().all(|v| *v < 16));
        assert_eq!(values[0], 0);
    }

    #[test]
    fn test_to_tensor_rgb_layout() {
        let image: RgbImage =
            ImageBuffer::from_raw(2, 1, vec![255, 0, 0, 0, 255, 51]).unwrap();

        let tensor = ToTensor::convert(&DynamicImage::ImageRgb8(image)).unwrap();

        assert_eq!(tensor.shape(), &[3, 1, 2]);
        let expected = [1.0, 0.0, 0.0, 1.0, 0.0, 0.2];
        for (a, b) in tensor.as_slice().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_to_tensor_channel_counts() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255])));
        assert_eq!(ToTensor::convert(&rgba).unwrap().shape(), &[4, 2, 3]);

        let gray = ramp_4x4();
        let tensor = ToTensor::convert(&gray).unwrap();
        assert_eq!(tensor.shape(), &[1, 4, 4]);
        assert!((tensor.get(&[0, 3, 3]).unwrap() - 15.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_to_tensor_sixteen_bit() {
        let image = DynamicImage::ImageLuma16(ImageBuffer::from_raw(2, 1, vec![0u16, 65535]).unwrap());
        let tensor = ToTensor::convert(&image).unwrap();
        assert_eq!(tensor.to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_to_tensor_list() {
        let list = Sample::from(vec![
            DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])));
            5
        ]);
        let tensors = ToTensor::new().apply(&list).unwrap().into_tensors().unwrap();
        assert_eq!(tensors.len(), 5);
        assert!(tensors.iter().all(|t| t.shape() == [3, 4, 4]));
    }

    #[test]
    fn test_normalize() {
        let input = Tensor::from_vec(vec![0.5; 3 * 2 * 2], &[3, 2, 2]).unwrap();

        let normalize = Normalize::new(vec![0.5, 0.25, 0.0], vec![0.5, 0.25, 2.0]);
        let output = normalize.normalize(&input).unwrap();

        let expected = [0.0, 1.0, 0.25];
        for ch in 0..3 {
            for y in 0..2 {
                for x in 0..2 {
                    let val = output.get(&[ch, y, x]).unwrap();
                    assert!((val - expected[ch]).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_normalize_batched() {
        let input = Tensor::full(&[2, 2, 1, 1], 1.0);
        let output = Normalize::new(vec![0.0, 1.0], vec![1.0, 1.0])
            .normalize(&input)
            .unwrap();
        assert_eq!(output.to_vec(), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_normalize_channel_mismatch() {
        let input = Tensor::zeros(&[3, 4, 4]);
        let err = Normalize::from_params(NormParams::mnist())
            .apply(&Sample::from(input))
            .unwrap_err();
        assert_eq!(
            err,
            Error::ChannelMismatch {
                channels: 3,
                mean: 1,
                std: 1,
            }
        );

        let uneven = Normalize::new(vec![0.0, 0.0, 0.0], vec![1.0, 1.0]);
        assert!(matches!(
            uneven.normalize(&Tensor::zeros(&[3, 1, 1])),
            Err(Error::ChannelMismatch { .. })
        ));
    }

    #[test]
    fn test_normalize_zero_std() {
        let normalize = Normalize::new(vec![0.0, 0.0], vec![1.0, 0.0]);
        assert_eq!(
            normalize.normalize(&Tensor::zeros(&[2, 1, 1])).unwrap_err(),
            Error::ZeroStd { channel: 1 }
        );
    }

    #[test]
    fn test_normalize_requires_image_tensor() {
        let normalize = Normalize::new(vec![0.0], vec![1.0]);
        assert_eq!(
            normalize.normalize(&Tensor::zeros(&[4, 4])).unwrap_err(),
            Error::InvalidImageTensor { shape: vec![4, 4] }
        );
    }

    #[test]
    fn test_normalize_rejects_images() {
        let err = Normalize::new(vec![0.0], vec![1.0])
            .apply(&Sample::from(ramp_4x4()))
            .unwrap_err();
        assert_eq!(err, Error::unexpected_sample("Normalize", "tensors", "image"));
    }
}
