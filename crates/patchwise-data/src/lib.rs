//! patchwise-data - Pipeline Plumbing
//!
//! Provides the infrastructure preprocessing pipelines are made of:
//! - `Sample`, the value handed from one step to the next
//! - `Transform`, the trait every step implements
//! - `Compose`, `RandomChoice` and `Lambda` for assembling steps
//!
//! # Example
//!
//! ```ignore
//! use patchwise_data::prelude::*;
//!
//! let pipeline = Compose::empty()
//!     .add(RandomChoice::new(vec![Box::new(flip)]))
//!     .add(Lambda::new(|s: &Sample| Ok(s.clone())));
//!
//! let output = pipeline.apply(&Sample::from(image))?;
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
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

// =============================================================================
// Module Declarations
// =============================================================================

pub mod sample;
pub mod transforms;

// =============================================================================
// Re-exports
// =============================================================================

pub use sample::Sample;
pub use transforms::{Compose, Lambda, RandomChoice, Transform};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for building pipelines.
pub mod prelude {
    pub use crate::{Compose, Lambda, RandomChoice, Sample, Transform};
    pub use patchwise_core::{Error, Result, Tensor};
}
