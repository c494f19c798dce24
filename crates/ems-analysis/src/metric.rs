//! Coverage metrics sampled after every simulation step.
//!
//! Each metric exposes one or more column tags and returns one value per tag.
//! A `None` value means "not defined at this instant" (e.g. radius coverage
//! with no available vehicle).

use std::collections::VecDeque;

use ems_core::SimTime;
use ems_model::{Case, Vehicle};

use crate::{CoverageTracker, Radius};

// ── Context ───────────────────────────────────────────────────────────────────

/// Read-only view of simulation state handed to every metric.
pub struct MetricContext<'a> {
    pub now:      SimTime,
    pub vehicles: &'a [Vehicle],
    /// Cases waiting for a vehicle, oldest first.
    pub pending:  &'a VecDeque<Case>,
    /// The live tracker synced with `vehicles`.
    pub coverage: &'a CoverageTracker,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

pub trait CoverageMetric {
    /// Column names, in the order `calculate` returns values.
    fn tags(&self) -> Vec<&str>;

    fn calculate(&mut self, ctx: &MetricContext<'_>) -> Vec<Option<f64>>;
}

// ── PercentCoverage ───────────────────────────────────────────────────────────

/// Fraction of demand points covered at one radius.
pub struct PercentCoverage {
    tag:    String,
    radius: Radius,
}

impl PercentCoverage {
    pub fn new(radius: Radius) -> Self {
        Self { tag: "percent_coverage".into(), radius }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

impl Default for PercentCoverage {
    fn default() -> Self {
        Self::new(Radius::Primary)
    }
}

impl CoverageMetric for PercentCoverage {
    fn tags(&self) -> Vec<&str> {
        vec![self.tag.as_str()]
    }

    fn calculate(&mut self, ctx: &MetricContext<'_>) -> Vec<Option<f64>> {
        vec![Some(ctx.coverage.percent_coverage(self.radius))]
    }
}

// ── DoubleCoverageMetric ──────────────────────────────────────────────────────

/// Primary and redundant coverage fractions.
pub struct DoubleCoverageMetric {
    tags: [String; 2],
}

impl DoubleCoverageMetric {
    pub fn new() -> Self {
        Self { tags: ["primary_coverage".into(), "secondary_coverage".into()] }
    }

    pub fn with_tags(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self { tags: [primary.into(), secondary.into()] }
    }
}

impl Default for DoubleCoverageMetric {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverageMetric for DoubleCoverageMetric {
    fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    fn calculate(&mut self, ctx: &MetricContext<'_>) -> Vec<Option<f64>> {
        let dc = ctx.coverage.double_coverage();
        vec![Some(dc.primary), Some(dc.secondary)]
    }
}

// ── RadiusCoverage ────────────────────────────────────────────────────────────

/// Worst-case response time: over all demand points, the largest travel
/// time (seconds) from the nearest available vehicle.
#[derive(Default)]
pub struct RadiusCoverage;

impl CoverageMetric for RadiusCoverage {
    fn tags(&self) -> Vec<&str> {
        vec!["radius_coverage"]
    }

    fn calculate(&mut self, ctx: &MetricContext<'_>) -> Vec<Option<f64>> {
        let times = ctx.coverage.times();
        let origins: Vec<_> = ctx
            .vehicles
            .iter()
            .filter(|v| v.is_available())
            .map(|v| times.nearest_origin(v.location()).index)
            .collect();
        if origins.is_empty() {
            return vec![None];
        }

        let worst = ctx
            .coverage
            .demand_snaps()
            .iter()
            .filter_map(|&d| origins.iter().map(|&o| times.time(o, d)).min())
            .max();
        vec![worst.map(|t| t.as_secs_f64())]
    }
}

// ── CountPending ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct CountPending;

impl CoverageMetric for CountPending {
    fn tags(&self) -> Vec<&str> {
        vec!["count_pending"]
    }

    fn calculate(&mut self, ctx: &MetricContext<'_>) -> Vec<Option<f64>> {
        vec![Some(ctx.pending.len() as f64)]
    }
}

// ── TotalDelay ────────────────────────────────────────────────────────────────

/// Sum of the waiting times, in seconds, of all pending cases.
#[derive(Default)]
pub struct TotalDelay;

impl CoverageMetric for TotalDelay {
    fn tags(&self) -> Vec<&str> {
        vec!["total_delay"]
    }

    fn calculate(&mut self, ctx: &MetricContext<'_>) -> Vec<Option<f64>> {
        let total: f64 = ctx.pending.iter().map(|c| c.delay(ctx.now).as_secs_f64()).sum();
        vec![Some(total)]
    }
}
