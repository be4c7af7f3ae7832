//! Patchwise Core - Foundation Layer for Patchwise
//!
//! This crate provides the pieces every other Patchwise crate builds on: the
//! shared error type and the dense `f32` tensor that preprocessing pipelines
//! produce.
//!
//! # Key Features
//! - Unified error type for tensors, samples and transforms
//! - Contiguous row-major tensor with small-vector shapes
//!
//! # Example
//! ```rust
//! use patchwise_core::Tensor;
//!
//! let t = Tensor::from_vec(vec![0.0; 3 * 4 * 4], &[3, 4, 4]).unwrap();
//! assert_eq!(t.shape(), &[3, 4, 4]);
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

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod tensor;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{Error, Result};
pub use tensor::{numel, Shape, Tensor};

// =============================================================================
// Prelude
// =============================================================================

/// Convenient imports for common usage.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::tensor::Tensor;
}
