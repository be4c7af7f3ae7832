//! Transforms - Composable Pipeline Steps
//!
//! Provides the `Transform` trait and the generic combinators used to chain
//! steps into a pipeline: sequential composition, random choice between
//! alternatives, and ad-hoc closures.
//!
//! @version 0.1.0
//! @author `AutomataNexus` Development Team

use core::fmt;

use patchwise_core::{Error, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::{debug, trace};

use crate::sample::Sample;

// =============================================================================
// Transform Trait
// =============================================================================

/// Trait for pipeline steps.
pub trait Transform: Send + Sync {
    /// Applies the transform to a sample.
    fn apply(&self, input: &Sample) -> Result<Sample>;

    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;
}

// =============================================================================
// Compose
// =============================================================================

/// Composes multiple transforms into a single transform.
///
/// Steps run in insertion order. The first failing step stops the chain and
/// its error is returned as-is.
pub struct Compose {
    transforms: Vec<Box<dyn Transform>>,
}

impl Compose {
    /// Creates a new Compose from a vector of transforms.
    #[must_use]
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }

    /// Creates an empty Compose.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Adds a transform to the composition.
    pub fn add<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns true if there are no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Step names in application order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Transform for Compose {
    fn apply(&self, input: &Sample) -> Result<Sample> {
        let mut result = input.clone();
        for (step, transform) in self.transforms.iter().enumerate() {
            trace!(
                step,
                transform = transform.name(),
                input = result.kind(),
                "applying transform"
            );
            result = transform.apply(&result).inspect_err(|error| {
                debug!(step, transform = transform.name(), %error, "transform failed");
            })?;
        }
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Compose"
    }
}

impl fmt::Debug for Compose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// =============================================================================
// RandomChoice
// =============================================================================

/// Applies one transform picked at random from a list.
///
/// The pick is uniform unless relative weights are supplied. Randomness is
/// drawn from the thread-local generator on every `apply`.
pub struct RandomChoice {
    transforms: Vec<Box<dyn Transform>>,
    weights: Option<Vec<f64>>,
}

impl RandomChoice {
    /// Creates a uniform `RandomChoice`.
    #[must_use]
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self {
            transforms,
            weights: None,
        }
    }

    /// Sets relative selection weights, one per transform.
    #[must_use]
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> Result<usize> {
        if self.transforms.is_empty() {
            return Err(Error::EmptyChoice);
        }

        match &self.weights {
            None => Ok(rng.gen_range(0..self.transforms.len())),
            Some(weights) => {
                if weights.len() != self.transforms.len() {
                    return Err(Error::InvalidWeights {
                        message: format!(
                            "expected {} weights, got {}",
                            self.transforms.len(),
                            weights.len()
                        ),
                    });
                }
                let dist =
                    WeightedIndex::<f64>::new(weights).map_err(|e| Error::InvalidWeights {
                        message: e.to_string(),
                    })?;
                Ok(dist.sample(rng))
            }
        }
    }
}

impl Transform for RandomChoice {
    fn apply(&self, input: &Sample) -> Result<Sample> {
        let index = self.pick(&mut rand::thread_rng())?;
        let chosen = &self.transforms[index];
        trace!(index, transform = chosen.name(), "random choice");
        chosen.apply(input)
    }

    fn name(&self) -> &'static str {
        "RandomChoice"
    }
}

// =============================================================================
// Lambda Transform
// =============================================================================

/// Applies a custom function as a transform.
pub struct Lambda<F>
where
    F: Fn(&Sample) -> Result<Sample> + Send + Sync,
{
    func: F,
}

impl<F> Lambda<F>
where
    F: Fn(&Sample) -> Result<Sample> + Send + Sync,
{
    /// Creates a new Lambda transform.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Transform for Lambda<F>
where
    F: Fn(&Sample) -> Result<Sample> + Send + Sync,
{
    fn apply(&self, input: &Sample) -> Result<Sample> {
        (self.func)(input)
    }

    fn name(&self) -> &'static str {
        "Lambda"
    }
}

// =============================================================================
// Tests
// =============================================================================
