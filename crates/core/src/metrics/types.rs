//! Metric set produced for one financial period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::MetricStatus;

/// Ratios and statuses derived from a financial period.
///
/// Percent-valued fields (`gross_margin`, `ros`, `roa`, `roe`) are already
/// multiplied by 100. All ratios are rounded to four decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Revenue, carried through from the P&L.
    pub revenue: Decimal,
    /// Externally supplied revenue forecast.
    pub revenue_forecast: Option<Decimal>,
    /// Gross profit / revenue, %.
    pub gross_margin: Decimal,
    /// Net profit / revenue, %.
    pub ros: Decimal,
    /// Current plus non-current assets.
    pub total_assets: Decimal,
    /// Net profit / total assets, %.
    pub roa: Decimal,
    /// Net profit / equity, %.
    pub roe: Decimal,
    /// Current assets / current liabilities.
    pub current_ratio: Decimal,
    /// (Current assets - inventory) / current liabilities.
    pub quick_ratio: Decimal,
    /// Cash / current liabilities.
    pub cash_ratio: Decimal,
    /// Equity / total assets.
    pub autonomy_ratio: Decimal,
    /// Revenue / total assets.
    pub asset_turnover: Decimal,
    /// Current assets - current liabilities.
    pub net_working_capital: Decimal,
    /// Same value as `current_ratio`.
    pub working_capital_ratio: Decimal,
    /// Status of `gross_margin`.
    pub gross_margin_status: MetricStatus,
    /// Status of `ros`.
    pub ros_status: MetricStatus,
    /// Status of `roa`.
    pub roa_status: MetricStatus,
    /// Status of `roe`.
    pub roe_status: MetricStatus,
    /// Status of `current_ratio`.
    pub liquidity_status: MetricStatus,
}
