//! Normalization Parameters
//!
//! The `(mean, std)` pair handed to the pipeline builder. Values are forwarded
//! untouched into the `Normalize` step, which is where mismatches surface.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

/// Per-channel mean and standard deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormParams {
    /// Mean per channel.
    pub mean: Vec<f32>,
    /// Standard deviation per channel.
    pub std: Vec<f32>,
}

impl NormParams {
    /// Creates a new parameter pair.
    #[must_use]
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Self {
        Self { mean, std }
    }

    /// Statistics of `ImageNet`, for pretrained models.
    #[must_use]
    pub fn imagenet() -> Self {
        Self::new(vec![0.485, 0.456, 0.406], vec![0.229, 0.224, 0.225])
    }

    /// Statistics of CIFAR-10.
    #[must_use]
    pub fn cifar10() -> Self {
        Self::new(vec![0.4914, 0.4822, 0.4465], vec![0.2470, 0.2435, 0.2616])
    }

    /// Statistics of MNIST (single channel).
    #[must_use]
    pub fn mnist() -> Self {
        Self::new(vec![0.1307], vec![0.3081])
    }

    /// Number of channels described by the mean sequence.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.mean.len()
    }
}

impl From<(Vec<f32>, Vec<f32>)> for NormParams {
    fn from((mean, std): (Vec<f32>, Vec<f32>)) -> Self {
        Self::new(mean, std)
    }
}

impl From<(&[f32], &[f32])> for NormParams {
    fn from((mean, std): (&[f32], &[f32])) -> Self {
        Self::new(mean.to_vec(), std.to_vec())
    }
}

impl<const N: usize> From<([f32; N], [f32; N])> for NormParams {
    fn from((mean, std): ([f32; N], [f32; N])) -> Self {
        Self::new(mean.to_vec(), std.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let from_arrays = NormParams::from(([0.5_f32, 0.5, 0.5], [0.2_f32, 0.2, 0.2]));
        let from_vecs = NormParams::from((vec![0.5_f32; 3], vec![0.2_f32; 3]));
        let from_slices = NormParams::from((&[0.5f32; 3][..], &[0.2f32; 3][..]));

        assert_eq!(from_arrays, from_vecs);
        assert_eq!(from_vecs, from_slices);
        assert_eq!(from_arrays.channels(), 3);
    }

    #[test]
    fn test_presets() {
        assert_eq!(NormParams::imagenet().channels(), 3);
        assert_eq!(NormParams::cifar10().std.len(), 3);
        assert_eq!(NormParams::mnist().channels(), 1);
    }

    #[test]
    fn test_values_are_not_validated() {
        let params = NormParams::new(vec![0.0, 1.0], vec![0.0]);
        assert_eq!(params.mean.len(), 2);
        assert_eq!(params.std, vec![0.0]);
    }
}
