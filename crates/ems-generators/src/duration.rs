//! Duration generators.
//!
//! One trait serves every duration the simulation draws: case inter-arrival
//! intervals, travel legs, and on-scene / at-hospital service times.  The
//! input struct carries the optional trip so each variant takes only what it
//! needs; variants that need a trip reject inputs without one.

use std::sync::Arc;
use std::time::Duration;

use ems_core::{GeoPoint, SimRng, SimTime};
use ems_spatial::TravelTimes;

use crate::{GeneratorError, GeneratorResult};

// ── Input / output ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trip {
    pub from: GeoPoint,
    pub to:   GeoPoint,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationInput {
    /// Instant the duration starts.
    pub at:   SimTime,
    pub trip: Option<Trip>,
}

impl DurationInput {
    /// A duration with no spatial component (e.g. an arrival interval).
    pub fn at(at: SimTime) -> Self {
        Self { at, trip: None }
    }

    pub fn trip(at: SimTime, from: GeoPoint, to: GeoPoint) -> Self {
        Self { at, trip: Some(Trip { from, to }) }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationSample {
    pub duration: Duration,
    /// Percentage error between the simulated and real trip distance.
    pub error:    Option<f64>,
    /// Snapped destination used for a matrix lookup.
    pub sim_destination: Option<GeoPoint>,
}

impl DurationSample {
    pub fn of(duration: Duration) -> Self {
        Self { duration, error: None, sim_destination: None }
    }
}

pub trait DurationGenerator {
    fn generate(&mut self, input: &DurationInput) -> GeneratorResult<DurationSample>;
}

// ── ConstantDuration ──────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
pub struct ConstantDuration(pub Duration);

impl DurationGenerator for ConstantDuration {
    fn generate(&mut self, _input: &DurationInput) -> GeneratorResult<DurationSample> {
        Ok(DurationSample::of(self.0))
    }
}

// ── DistanceDuration ──────────────────────────────────────────────────────────

/// Haversine distance divided by a constant velocity, truncated to whole
/// seconds.
#[derive(Copy, Clone, Debug)]
pub struct DistanceDuration {
    km_per_sec: f64,
}

impl DistanceDuration {
    pub fn new(km_per_sec: f64) -> GeneratorResult<Self> {
        if !km_per_sec.is_finite() || km_per_sec <= 0.0 {
            return Err(GeneratorError::InvalidParameter(format!(
                "velocity must be positive, got {km_per_sec} km/s"
            )));
        }
        Ok(Self { km_per_sec })
    }

    /// Convenience constructor from km/h.
    pub fn from_kmh(kmh: f64) -> GeneratorResult<Self> {
        Self::new(kmh / 3_600.0)
    }
}

impl DurationGenerator for DistanceDuration {
    fn generate(&mut self, input: &DurationInput) -> GeneratorResult<DurationSample> {
        let trip = input.trip.ok_or(GeneratorError::MissingTrip("DistanceDuration"))?;
        let secs = trip.from.distance_km(trip.to) / self.km_per_sec;
        Ok(DurationSample::of(Duration::from_secs(secs as u64)))
    }
}

// ── PoissonDuration ───────────────────────────────────────────────────────────

/// Exponentially distributed gaps for a Poisson arrival process.
///
/// `lambda` is the expected number of events per minute; e.g. 1 000 cases
/// over 40 000 minutes gives `lambda = 1/40`.
pub struct PoissonDuration {
    lambda_per_min: f64,
    rng:            SimRng,
}

impl PoissonDuration {
    pub fn new(lambda_per_min: f64, rng: SimRng) -> GeneratorResult<Self> {
        if !lambda_per_min.is_finite() || lambda_per_min <= 0.0 {
            return Err(GeneratorError::InvalidParameter(format!(
                "lambda must be positive, got {lambda_per_min}"
            )));
        }
        Ok(Self { lambda_per_min, rng })
    }
}

impl DurationGenerator for PoissonDuration {
    fn generate(&mut self, _input: &DurationInput) -> GeneratorResult<DurationSample> {
        let u: f64 = self.rng.random();
        let minutes = -(1.0 - u).ln() / self.lambda_per_min;
        let gap = Duration::try_from_secs_f64(minutes * 60.0).map_err(|e| {
            GeneratorError::InvalidParameter(format!(
                "lambda {} gave an unrepresentable gap of {minutes} min: {e}",
                self.lambda_per_min
            ))
        })?;
        Ok(DurationSample::of(gap))
    }
}

// ── UniformDuration ───────────────────────────────────────────────────────────

/// Whole seconds drawn uniformly from `[lower, upper]` (bounds given in
/// minutes, both inclusive).
pub struct UniformDuration {
    lower_secs: u64,
    upper_secs: u64,
    rng:        SimRng,
}

impl UniformDuration {
    pub fn new(lower_min: f64, upper_min: f64, rng: SimRng) -> GeneratorResult<Self> {
        if !lower_min.is_finite() || !upper_min.is_finite() || lower_min < 0.0 || upper_min < lower_min {
            return Err(GeneratorError::InvalidParameter(format!(
                "uniform bounds must satisfy 0 <= lower <= upper, got [{lower_min}, {upper_min}] min"
            )));
        }
        Ok(Self {
            lower_secs: (lower_min * 60.0).round() as u64,
            upper_secs: (upper_min * 60.0).round() as u64,
            rng,
        })
    }
}

impl DurationGenerator for UniformDuration {
    fn generate(&mut self, _input: &DurationInput) -> GeneratorResult<DurationSample> {
        let secs = self.rng.gen_range(self.lower_secs..=self.upper_secs);
        Ok(DurationSample::of(Duration::from_secs(secs)))
    }
}

// ── TravelTimeDuration ────────────────────────────────────────────────────────

const FEET_PER_METRE: f64 = 3.280_839_895;

/// Travel time looked up from the oracle after snapping both trip ends.
///
/// Also reports the snapped destination and the relative error between the
/// snapped and the real trip distance:
///
/// ```text
/// error = 100 · (sim − real) · real / (real² + ε)      (distances in feet)
/// ```
///
/// `ε` keeps the error defined for zero-length trips.
pub struct TravelTimeDuration {
    times:   Arc<TravelTimes>,
    epsilon: f64,
}

impl TravelTimeDuration {
    pub fn new(times: Arc<TravelTimes>, epsilon: f64) -> GeneratorResult<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(GeneratorError::InvalidParameter(format!(
                "epsilon must be non-negative, got {epsilon}"
            )));
        }
        Ok(Self { times, epsilon })
    }
}

impl DurationGenerator for TravelTimeDuration {
    fn generate(&mut self, input: &DurationInput) -> GeneratorResult<DurationSample> {
        let trip = input.trip.ok_or(GeneratorError::MissingTrip("TravelTimeDuration"))?;
        let origin = self.times.nearest_origin(trip.from);
        let dest = self.times.nearest_destination(trip.to);

        let sim_ft = origin.point.distance_m(dest.point) * FEET_PER_METRE;
        let real_ft = trip.from.distance_m(trip.to) * FEET_PER_METRE;
        let denom = real_ft * real_ft + self.epsilon;
        let error = if denom > 0.0 { 100.0 * (sim_ft - real_ft) * real_ft / denom } else { 0.0 };

        Ok(DurationSample {
            duration:        self.times.time(origin.index, dest.index),
            error:           Some(error),
            sim_destination: Some(dest.point),
        })
    }
}
