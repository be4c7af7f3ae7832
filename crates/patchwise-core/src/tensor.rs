//! Tensor - Dense Numeric Array
//!
//! The `Tensor` struct holds the numeric output of a preprocessing pipeline:
//! a contiguous, row-major buffer of `f32` values together with its shape.
//! Images convert into channel-first `(C, H, W)` tensors.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use core::fmt;

use smallvec::SmallVec;

use crate::error::{Error, Result};

// =============================================================================
// Shape
// =============================================================================

/// Shape type - dimensions of a tensor.
/// Uses `SmallVec` for stack allocation of small shapes (up to 6 dimensions).
pub type Shape = SmallVec<[usize; 6]>;

/// Computes the total number of elements from a shape.
#[must_use]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

// =============================================================================
// Tensor Struct
// =============================================================================

/// A dense, contiguous N-dimensional array of `f32` values.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Shape,
}

impl Tensor {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a new tensor from a vector with the given shape.
    ///
    /// # Arguments
    /// * `data` - Vector of data in row-major order
    /// * `shape` - Shape of the tensor
    ///
    /// # Returns
    /// New tensor, or error if shape doesn't match data length.
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Result<Self> {
        if numel(shape) != data.len() {
            return Err(Error::shape_mismatch(&[data.len()], shape));
        }

        Ok(Self {
            data,
            shape: Shape::from_slice(shape),
        })
    }

    /// Creates a tensor filled with zeros.
    #[must_use]
    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(shape, 0.0)
    }

    /// Creates a tensor filled with a constant value.
    #[must_use]
    pub fn full(shape: &[usize], value: f32) -> Self {
        Self {
            data: vec![value; numel(shape)],
            shape: Shape::from_slice(shape),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns the shape of the tensor.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements.
    #[must_use]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the tensor has zero elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // =========================================================================
    // Element Access
    // =========================================================================

    /// Returns the element at the given multi-dimensional index.
    pub fn get(&self, indices: &[usize]) -> Result<f32> {
        if indices.len() != self.ndim() {
            return Err(Error::shape_mismatch(self.shape(), &[indices.len()]));
        }

        let mut linear = 0;
        for (&index, &size) in indices.iter().zip(self.shape.iter()) {
            if index >= size {
                return Err(Error::IndexOutOfBounds { index, size });
            }
            linear = linear * size + index;
        }

        Ok(self.data[linear])
    }

    /// Returns the data as a slice in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the data as a mutable slice in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Copies the data into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.clone()
    }

    /// Consumes the tensor and returns its data.
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    // =========================================================================
    // Shape Operations
    // =========================================================================

    /// Returns a tensor with the same data and a new shape.
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        Self::from_vec(self.data.clone(), shape)
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape.as_slice())
            .field("numel", &self.data.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
