//! Metric registry and time series.

use rustc_hash::FxHashSet;

use ems_core::SimTime;

use crate::{
    AnalysisError, AnalysisResult, CountPending, CoverageMetric, DoubleCoverageMetric,
    MetricContext, PercentCoverage, RadiusCoverage, TotalDelay,
};

/// One sample of every registered metric.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricRow {
    pub time:   SimTime,
    /// One value per tag, in [`MetricAggregator::tags`] order.
    pub values: Vec<Option<f64>>,
}

/// Runs a fixed set of metrics and keeps every row it produced.
pub struct MetricAggregator {
    metrics: Vec<Box<dyn CoverageMetric>>,
    tags:    Vec<String>,
    rows:    Vec<MetricRow>,
}

impl MetricAggregator {
    /// Fails with [`AnalysisError::DuplicateTag`] if two metrics share a tag.
    pub fn new(metrics: Vec<Box<dyn CoverageMetric>>) -> AnalysisResult<Self> {
        let mut seen = FxHashSet::default();
        let mut tags = Vec::new();
        for m in &metrics {
            for tag in m.tags() {
                if !seen.insert(tag.to_owned()) {
                    return Err(AnalysisError::DuplicateTag(tag.to_owned()));
                }
                tags.push(tag.to_owned());
            }
        }
        Ok(Self { metrics, tags, rows: Vec::new() })
    }

    /// Percent, double and radius coverage plus the queue metrics.
    pub fn standard() -> Self {
        let metrics: Vec<Box<dyn CoverageMetric>> = vec![
            Box::new(PercentCoverage::default()),
            Box::new(DoubleCoverageMetric::new()),
            Box::new(RadiusCoverage),
            Box::new(CountPending),
            Box::new(TotalDelay),
        ];
        let tags = metrics.iter().flat_map(|m| m.tags()).map(str::to_owned).collect();
        Self { metrics, tags, rows: Vec::new() }
    }

    /// An aggregator that records timestamps only.
    pub fn empty() -> Self {
        Self { metrics: Vec::new(), tags: Vec::new(), rows: Vec::new() }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Sample every metric at `ctx.now` and store the row.
    pub fn calculate(&mut self, ctx: &MetricContext<'_>) -> &MetricRow {
        let mut values = Vec::with_capacity(self.tags.len());
        for m in &mut self.metrics {
            values.extend(m.calculate(ctx));
        }
        self.rows.push(MetricRow { time: ctx.now, values });
        &self.rows[self.rows.len() - 1]
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    pub fn last(&self) -> Option<&MetricRow> {
        self.rows.last()
    }

    /// Latest value of `tag`, if both the tag and a row exist.
    pub fn latest(&self, tag: &str) -> Option<f64> {
        let col = self.tags.iter().position(|t| t == tag)?;
        self.rows.last()?.values.get(col).copied().flatten()
    }
}
