//! `ems-analysis`: incremental coverage tracking and metrics.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`coverage`]   | `CoverageTracker`, `CoverageState`, `CoverageRadii`, `Radius`, `DoubleCoverage` |
//! | [`metric`]     | `CoverageMetric` trait, `MetricContext`, built-in metrics  |
//! | [`aggregator`] | `MetricAggregator`, `MetricRow`                            |
//! | [`error`]      | `AnalysisError`, `AnalysisResult<T>`                       |

pub mod aggregator;
pub mod coverage;
pub mod error;
pub mod metric;

#[cfg(test)]
mod tests;

pub use aggregator::{MetricAggregator, MetricRow};
pub use coverage::{CoverageRadii, CoverageState, CoverageTracker, DoubleCoverage, Radius};
pub use error::{AnalysisError, AnalysisResult};
pub use metric::{
    CountPending, CoverageMetric, DoubleCoverageMetric, MetricContext, PercentCoverage,
    RadiusCoverage, TotalDelay,
};
