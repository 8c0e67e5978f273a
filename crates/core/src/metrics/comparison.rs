//! Dashboard summary and period-over-period comparison.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculator::round_ratio;
use super::status::{ClassifiedMetric, MetricStatus};
use super::types::MetricSet;

/// Headline figures of a company's latest period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSummary {
    /// Revenue.
    pub revenue: Decimal,
    /// Gross margin, %.
    pub gross_margin: Decimal,
    /// Return on sales, %.
    pub ros: Decimal,
    /// Return on assets, %.
    pub roa: Decimal,
    /// Return on equity, %.
    pub roe: Decimal,
    /// Current ratio.
    pub current_ratio: Decimal,
    /// Status per classified metric, keyed by metric name.
    pub statuses: BTreeMap<&'static str, MetricStatus>,
}

impl From<&MetricSet> for MetricsSummary {
    fn from(metrics: &MetricSet) -> Self {
        let statuses = ClassifiedMetric::ALL
            .into_iter()
            .map(|metric| (metric.key(), status_of(metrics, metric)))
            .collect();

        Self {
            revenue: metrics.revenue,
            gross_margin: metrics.gross_margin,
            ros: metrics.ros,
            roa: metrics.roa,
            roe: metrics.roe,
            current_ratio: metrics.current_ratio,
            statuses,
        }
    }
}

const fn status_of(metrics: &MetricSet, metric: ClassifiedMetric) -> MetricStatus {
    match metric {
        ClassifiedMetric::GrossMargin => metrics.gross_margin_status,
        ClassifiedMetric::Ros => metrics.ros_status,
        ClassifiedMetric::Roa => metrics.roa_status,
        ClassifiedMetric::Roe => metrics.roe_status,
        ClassifiedMetric::Liquidity => metrics.liquidity_status,
    }
}

/// Changes between a period's metrics and the previous period's.
///
/// `revenue_change` is a relative change in percent; the margin and return
/// changes are differences in percentage points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsComparison {
    /// Relative revenue change, %.
    pub revenue_change: Option<Decimal>,
    /// Gross margin change, percentage points.
    pub gross_margin_change: Option<Decimal>,
    /// Return on sales change, percentage points.
    pub ros_change: Option<Decimal>,
    /// Return on assets change, percentage points.
    pub roa_change: Option<Decimal>,
}

impl MetricsComparison {
    /// Compares `current` against `previous`.
    ///
    /// Every change is `None` without a previous period. `revenue_change` is
    /// also `None` when the previous revenue is zero.
    #[must_use]
    pub fn between(current: &MetricSet, previous: Option<&MetricSet>) -> Self {
        let Some(previous) = previous else {
            return Self::default();
        };

        let revenue_change = if previous.revenue.is_zero() {
            None
        } else {
            current
                .revenue
                .checked_sub(previous.revenue)
                .and_then(|delta| delta.checked_div(previous.revenue))
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                .map(round_ratio)
        };

        Self {
            revenue_change,
            gross_margin_change: delta(current.gross_margin, previous.gross_margin),
            ros_change: delta(current.ros, previous.ros),
            roa_change: delta(current.roa, previous.roa),
        }
    }
}

fn delta(current: Decimal, previous: Decimal) -> Option<Decimal> {
    current.checked_sub(previous).map(round_ratio)
}
