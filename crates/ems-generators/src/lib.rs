//! `ems-generators`: stochastic inputs to the simulation.
//!
//! Every stochastic generator owns its own [`SimRng`](ems_core::SimRng)
//! stream, derived from the run's root RNG with `SimRng::child`, so draws in
//! one generator never shift another's sequence.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`duration`] | `DurationGenerator` + constant / distance / Poisson / uniform / travel-time |
//! | [`location`] | `LocationGenerator` + circle / polygon / multi-polygon, `Polygon` |
//! | [`priority`] | `PriorityGenerator`, `RandomPriority`                           |
//! | [`hospital`] | `HospitalSelector` + random / fastest                           |
//! | [`error`]    | `GeneratorError`, `GeneratorResult<T>`                          |

pub mod duration;
pub mod error;
pub mod hospital;
pub mod location;
pub mod priority;


pub use duration::{
    ConstantDuration, DistanceDuration, DurationGenerator, DurationInput, DurationSample,
    PoissonDuration, TravelTimeDuration, Trip, UniformDuration,
};
pub use error::{GeneratorError, GeneratorResult};
pub use hospital::{FastestHospital, HospitalSelector, RandomHospital};
pub use location::{CircleLocation, LocationGenerator, MultiPolygonLocation, Polygon, PolygonLocation};
pub use priority::{PriorityGenerator, RandomPriority};

use rand::distributions::WeightedIndex;

/// Tolerance when checking that a probability distribution sums to one.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-9;

/// Check that `weights` has `expected_len` finite, non-negative entries
/// summing to one.
pub fn validate_distribution(weights: &[f64], expected_len: usize) -> GeneratorResult<()> {
    if weights.len() != expected_len {
        return Err(GeneratorError::LengthMismatch { expected: expected_len, found: weights.len() });
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(GeneratorError::InvalidDistribution(format!("{weights:?} has a negative or non-finite weight")));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(GeneratorError::InvalidDistribution(format!("{weights:?} sums to {sum}, expected 1")));
    }
    Ok(())
}

/// Validate `weights` as a distribution over `expected_len` outcomes and
/// build the sampler generators draw from.
pub fn weighted_index(weights: &[f64], expected_len: usize) -> GeneratorResult<WeightedIndex<f64>> {
    validate_distribution(weights, expected_len)?;
    WeightedIndex::new(weights).map_err(|e| GeneratorError::InvalidDistribution(format!("{weights:?}: {e}")))
}
