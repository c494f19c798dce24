//! Case priority generators.

use rand::distributions::WeightedIndex;

use ems_core::{Priority, SimRng, SimTime};

use crate::{weighted_index, GeneratorError, GeneratorResult};

pub trait PriorityGenerator {
    fn generate(&mut self, at: SimTime) -> Priority;
}

/// Draws a priority from a discrete distribution.
pub struct RandomPriority {
    priorities:   Vec<Priority>,
    distribution: WeightedIndex<f64>,
    rng:          SimRng,
}

impl RandomPriority {
    /// `distribution` defaults to uniform; when given it must have one
    /// weight per priority and sum to one.
    pub fn new(
        priorities: Vec<Priority>,
        distribution: Option<Vec<f64>>,
        rng: SimRng,
    ) -> GeneratorResult<Self> {
        if priorities.is_empty() {
            return Err(GeneratorError::Empty);
        }
        let n = priorities.len();
        let weights = distribution.unwrap_or_else(|| vec![1.0 / n as f64; n]);
        let distribution = weighted_index(&weights, n)?;
        Ok(Self { priorities, distribution, rng })
    }

    /// Uniform over the standard 1–4 scale.
    pub fn standard(rng: SimRng) -> GeneratorResult<Self> {
        Self::new(Priority::STANDARD.to_vec(), None, rng)
    }
}

impl PriorityGenerator for RandomPriority {
    fn generate(&mut self, _at: SimTime) -> Priority {
        self.priorities[self.rng.sample(&self.distribution)]
    }
}
