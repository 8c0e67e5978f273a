//! Ratio calculation over a validated financial period.

use rust_decimal::{Decimal, RoundingStrategy};

use super::balance::validate_balance_sheet;
use super::error::MetricsError;
use super::status::ClassifiedMetric;
use super::types::MetricSet;
use crate::statements::FinancialPeriod;

/// Decimal places kept on every ratio.
pub const RATIO_SCALE: u32 = 4;

/// Exclusive bound on the magnitude of any stored figure or metric
/// (`NUMERIC(20, 4)` holds values below 10^16).
pub const VALUE_LIMIT: Decimal = Decimal::from_parts(1_874_919_424, 2_328_306, 0, false, 0);

/// Stateless metrics calculator.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Computes the metric set for a period.
    ///
    /// The balance identity is checked first; ratios are then computed in a
    /// fixed order so the first zero denominator is the one reported.
    /// Statuses are classified on the exact quotients; only the stored values
    /// are rounded to [`RATIO_SCALE`] places.
    ///
    /// # Errors
    ///
    /// - `MetricsError::InvalidBalance` if the balance identity fails
    /// - `MetricsError::DivisionByZero` naming the first ratio with a zero denominator
    /// - `MetricsError::Overflow` if a value reaches [`VALUE_LIMIT`]
    pub fn compute(
        period: &FinancialPeriod,
        revenue_forecast: Option<Decimal>,
    ) -> Result<MetricSet, MetricsError> {
        let pnl = &period.pnl;
        let bs = &period.balance;

        validate_balance_sheet(bs)?;
        let total_assets = bs.total_assets().ok_or(MetricsError::Overflow {
            ratio: "total_assets",
        })?;

        let gross_margin = percent("gross_margin", pnl.gross_profit, pnl.revenue, "revenue")?;
        let ros = percent("ros", pnl.net_profit, pnl.revenue, "revenue")?;
        let roa = percent("roa", pnl.net_profit, total_assets, "total_assets")?;
        let roe = percent("roe", pnl.net_profit, bs.equity, "equity")?;
        let current_ratio = ratio(
            "current_ratio",
            bs.current_assets,
            bs.current_liabilities,
            "current_liabilities",
        )?;
        let quick_assets = bs
            .current_assets
            .checked_sub(bs.inventory)
            .ok_or(MetricsError::Overflow {
                ratio: "quick_ratio",
            })?;
        let quick_ratio = ratio(
            "quick_ratio",
            quick_assets,
            bs.current_liabilities,
            "current_liabilities",
        )?;
        let cash_ratio = ratio(
            "cash_ratio",
            bs.cash,
            bs.current_liabilities,
            "current_liabilities",
        )?;
        let autonomy_ratio = ratio("autonomy_ratio", bs.equity, total_assets, "total_assets")?;
        let asset_turnover = ratio("asset_turnover", pnl.revenue, total_assets, "total_assets")?;
        let net_working_capital = bs
            .current_assets
            .checked_sub(bs.current_liabilities)
            .ok_or(MetricsError::Overflow {
                ratio: "net_working_capital",
            })?;

        let stored_current_ratio = stored("current_ratio", current_ratio)?;

        Ok(MetricSet {
            revenue: pnl.revenue,
            revenue_forecast,
            gross_margin: stored("gross_margin", gross_margin)?,
            ros: stored("ros", ros)?,
            total_assets: within_limit("total_assets", total_assets)?,
            roa: stored("roa", roa)?,
            roe: stored("roe", roe)?,
            current_ratio: stored_current_ratio,
            quick_ratio: stored("quick_ratio", quick_ratio)?,
            cash_ratio: stored("cash_ratio", cash_ratio)?,
            autonomy_ratio: stored("autonomy_ratio", autonomy_ratio)?,
            asset_turnover: stored("asset_turnover", asset_turnover)?,
            net_working_capital: within_limit("net_working_capital", net_working_capital)?,
            working_capital_ratio: stored_current_ratio,
            gross_margin_status: ClassifiedMetric::GrossMargin.classify(gross_margin),
            ros_status: ClassifiedMetric::Ros.classify(ros),
            roa_status: ClassifiedMetric::Roa.classify(roa),
            roe_status: ClassifiedMetric::Roe.classify(roe),
            liquidity_status: ClassifiedMetric::Liquidity.classify(current_ratio),
        })
    }
}

/// Rounds to [`RATIO_SCALE`] places, half away from zero.
#[must_use]
pub fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn within_limit(name: &'static str, value: Decimal) -> Result<Decimal, MetricsError> {
    if value.abs() >= VALUE_LIMIT {
        return Err(MetricsError::Overflow { ratio: name });
    }
    Ok(value)
}

fn stored(name: &'static str, value: Decimal) -> Result<Decimal, MetricsError> {
    within_limit(name, round_ratio(value))
}

fn ratio(
    name: &'static str,
    numerator: Decimal,
    denominator: Decimal,
    denominator_name: &'static str,
) -> Result<Decimal, MetricsError> {
    if denominator.is_zero() {
        return Err(MetricsError::DivisionByZero {
            ratio: name,
            denominator: denominator_name,
        });
    }

    numerator
        .checked_div(denominator)
        .ok_or(MetricsError::Overflow { ratio: name })
}

fn percent(
    name: &'static str,
    numerator: Decimal,
    denominator: Decimal,
    denominator_name: &'static str,
) -> Result<Decimal, MetricsError> {
    ratio(name, numerator, denominator, denominator_name)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(MetricsError::Overflow { ratio: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BalanceError, MetricStatus};
    use crate::statements::{BalanceSheet, ProfitAndLoss};
    use rust_decimal_macros::dec;

    fn period() -> FinancialPeriod {
        FinancialPeriod {
            pnl: ProfitAndLoss {
                revenue: dec!(1000),
                cost_of_goods_sold: dec!(600),
                gross_profit: dec!(400),
                operating_expenses: dec!(250),
                ebit: dec!(150),
                net_profit: dec!(80),
            },
            balance: BalanceSheet {
                current_assets: dec!(150),
                non_current_assets: dec!(850),
                current_liabilities: dec!(100),
                non_current_liabilities: dec!(300),
                equity: dec!(600),
                cash: dec!(40),
                receivables: dec!(60),
                inventory: dec!(30),
            },
        }
    }

    #[test]
    fn test_compute_reference_period() {
        let m = MetricsCalculator::compute(&period(), Some(dec!(1200))).unwrap();

        assert_eq!(m.revenue, dec!(1000));
        assert_eq!(m.revenue_forecast, Some(dec!(1200)));
        assert_eq!(m.gross_margin, dec!(40));
        assert_eq!(m.ros, dec!(8));
        assert_eq!(m.total_assets, dec!(1000));
        assert_eq!(m.roa, dec!(8));
        assert_eq!(m.roe, dec!(13.3333));
        assert_eq!(m.current_ratio, dec!(1.5));
        assert_eq!(m.quick_ratio, dec!(1.2));
        assert_eq!(m.cash_ratio, dec!(0.4));
        assert_eq!(m.autonomy_ratio, dec!(0.6));
        assert_eq!(m.asset_turnover, dec!(1));
        assert_eq!(m.net_working_capital, dec!(50));
        assert_eq!(m.working_capital_ratio, m.current_ratio);

        assert_eq!(m.gross_margin_status, MetricStatus::Good);
        assert_eq!(m.ros_status, MetricStatus::Warning);
        assert_eq!(m.roa_status, MetricStatus::Good);
        assert_eq!(m.roe_status, MetricStatus::Warning);
        assert_eq!(m.liquidity_status, MetricStatus::Good);
    }

    #[test]
    fn test_current_ratio_just_below_one_is_bad() {
        let mut p = period();
        p.balance.current_assets = dec!(99);
        p.balance.non_current_assets = dec!(901);

        let m = MetricsCalculator::compute(&p, None).unwrap();

        assert_eq!(m.current_ratio, dec!(0.99));
        assert_eq!(m.liquidity_status, MetricStatus::Bad);
    }

    #[test]
    fn test_net_working_capital() {
        let mut p = period();
        p.balance.current_assets = dec!(200);
        p.balance.current_liabilities = dec!(120);
        p.balance.non_current_assets = dec!(800);
        p.balance.non_current_liabilities = dec!(280);

        let m = MetricsCalculator::compute(&p, None).unwrap();

        assert_eq!(m.net_working_capital, dec!(80));
    }

    #[test]
    fn test_ratios_round_half_away_from_zero() {
        assert_eq!(round_ratio(dec!(1.23455)), dec!(1.2346));
        assert_eq!(round_ratio(dec!(-1.23455)), dec!(-1.2346));
        assert_eq!(round_ratio(dec!(1.23454)), dec!(1.2345));
    }

    #[test]
    fn test_zero_revenue_names_gross_margin() {
        let mut p = period();
        p.pnl.revenue = Decimal::ZERO;

        assert_eq!(
            MetricsCalculator::compute(&p, None),
            Err(MetricsError::DivisionByZero {
                ratio: "gross_margin",
                denominator: "revenue",
            })
        );
    }

    #[test]
    fn test_zero_equity_names_roe() {
        let mut p = period();
        p.balance.equity = Decimal::ZERO;
        p.balance.non_current_liabilities = dec!(900);

        assert_eq!(
            MetricsCalculator::compute(&p, None),
            Err(MetricsError::DivisionByZero {
                ratio: "roe",
                denominator: "equity",
            })
        );
    }

    #[test]
    fn test_zero_current_liabilities_names_current_ratio() {
        let mut p = period();
        p.balance.current_liabilities = Decimal::ZERO;
        p.balance.non_current_liabilities = dec!(400);

        assert_eq!(
            MetricsCalculator::compute(&p, None),
            Err(MetricsError::DivisionByZero {
                ratio: "current_ratio",
                denominator: "current_liabilities",
            })
        );
    }

    #[test]
    fn test_unbalanced_period_is_rejected_before_ratios() {
        let mut p = period();
        p.pnl.revenue = Decimal::ZERO;
        p.balance.equity = dec!(100);

        assert!(matches!(
            MetricsCalculator::compute(&p, None),
            Err(MetricsError::InvalidBalance(BalanceError::Unbalanced { .. }))
        ));
    }

    #[test]
    fn test_negative_profit_is_classified_bad() {
        let mut p = period();
        p.pnl.net_profit = dec!(-50);

        let m = MetricsCalculator::compute(&p, None).unwrap();

        assert_eq!(m.ros, dec!(-5));
        assert_eq!(m.ros_status, MetricStatus::Bad);
        assert_eq!(m.roe_status, MetricStatus::Bad);
    }

    #[test]
    fn test_status_uses_unrounded_gross_margin() {
        let mut p = period();
        p.pnl.revenue = dec!(10_000_000);
        p.pnl.gross_profit = dec!(2_999_996);
        p.pnl.cost_of_goods_sold = dec!(7_000_004);

        let m = MetricsCalculator::compute(&p, None).unwrap();

        // 29.99996% is stored as 30.0000 but stays below the good band.
        assert_eq!(m.gross_margin, dec!(30.0000));
        assert_eq!(m.gross_margin_status, MetricStatus::Warning);
    }

    #[test]
    fn test_status_uses_unrounded_current_ratio() {
        let mut p = period();
        p.balance.current_assets = dec!(149.9999);
        p.balance.non_current_assets = dec!(850.0001);

        let m = MetricsCalculator::compute(&p, None).unwrap();

        assert_eq!(m.current_ratio, dec!(1.5));
        assert_eq!(m.liquidity_status, MetricStatus::Warning);
    }

    #[test]
    fn test_ratio_beyond_storage_range_overflows() {
        let p = FinancialPeriod {
            pnl: ProfitAndLoss {
                revenue: dec!(10_000_000_000_000),
                cost_of_goods_sold: Decimal::ZERO,
                gross_profit: dec!(10_000_000_000_000),
                operating_expenses: Decimal::ZERO,
                ebit: Decimal::ZERO,
                net_profit: Decimal::ZERO,
            },
            balance: BalanceSheet {
                current_assets: dec!(0.0002),
                non_current_assets: Decimal::ZERO,
                current_liabilities: dec!(0.0001),
                non_current_liabilities: Decimal::ZERO,
                equity: dec!(0.0001),
                cash: Decimal::ZERO,
                receivables: Decimal::ZERO,
                inventory: Decimal::ZERO,
            },
        };

        assert_eq!(
            MetricsCalculator::compute(&p, None),
            Err(MetricsError::Overflow {
                ratio: "asset_turnover"
            })
        );
    }

    #[test]
    fn test_value_limit_is_ten_to_the_sixteenth() {
        assert_eq!(VALUE_LIMIT, dec!(10_000_000_000_000_000));
    }
}
