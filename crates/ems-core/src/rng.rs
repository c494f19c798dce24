//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns one root `SimRng` seeded from `SimConfig::seed`.  Every
//! stochastic collaborator (interval generator, location generator, random
//! policy, hospital selector…) receives its own child stream derived with
//! [`SimRng::child`]:
//!
//!   child_seed = root.next_u64() XOR (offset * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive offsets uniformly across the seed space.  Child
//! streams never share state, so the order in which collaborators draw does
//! not perturb each other and a fixed seed replays the same run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded, splittable RNG used by every stochastic component.
///
/// Used only in single-threaded contexts; `SimRng` is deliberately not
/// shared behind references, each owner holds its own stream.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, used to give
    /// each collaborator an independent stream from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Draw one value from a `rand` distribution, e.g. a `WeightedIndex`
    /// built once by its owner.
    #[inline]
    pub fn sample<T, D>(&mut self, distribution: &D) -> T
    where
        D: rand::distributions::Distribution<T>,
    {
        distribution.sample(&mut self.0)
    }
}
