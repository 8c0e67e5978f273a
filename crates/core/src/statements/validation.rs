//! Input rules for submitted statements.
//!
//! These run before the metrics engine sees the figures. The balance identity
//! is checked last so that field-level errors are reported first.

use rust_decimal::Decimal;

use super::error::StatementError;
use super::types::{FinancialPeriod, PeriodMetadata};
use crate::metrics::{VALUE_LIMIT, validate_balance_sheet};

/// Maximum period name length.
pub const PERIOD_NAME_MAX: usize = 100;
/// Maximum source filename length.
pub const SOURCE_FILENAME_MAX: usize = 255;
/// Maximum source file type length.
pub const SOURCE_FILE_TYPE_MAX: usize = 20;
/// Maximum decimal places on a monetary figure.
pub const AMOUNT_SCALE: u32 = 4;

/// Checks that an amount fits the stored precision and range.
///
/// Trailing zeros do not count towards the scale.
///
/// # Errors
///
/// - `StatementError::TooPrecise` if more than [`AMOUNT_SCALE`] places remain
/// - `StatementError::OutOfRange` if the magnitude reaches [`VALUE_LIMIT`]
pub fn check_amount(field: &'static str, value: Decimal) -> Result<(), StatementError> {
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(StatementError::TooPrecise {
            field,
            max_scale: AMOUNT_SCALE,
        });
    }
    if value.abs() >= VALUE_LIMIT {
        return Err(StatementError::OutOfRange { field });
    }
    Ok(())
}

/// Validates the figures of a period, including the balance identity.
///
/// # Errors
///
/// Returns the first rule the figures break.
pub fn validate_figures(period: &FinancialPeriod) -> Result<(), StatementError> {
    let pnl = &period.pnl;
    let balance = &period.balance;

    let amounts = [
        ("revenue", pnl.revenue),
        ("cost_of_goods_sold", pnl.cost_of_goods_sold),
        ("gross_profit", pnl.gross_profit),
        ("operating_expenses", pnl.operating_expenses),
        ("ebit", pnl.ebit),
        ("net_profit", pnl.net_profit),
        ("current_assets", balance.current_assets),
        ("non_current_assets", balance.non_current_assets),
        ("current_liabilities", balance.current_liabilities),
        ("non_current_liabilities", balance.non_current_liabilities),
        ("equity", balance.equity),
        ("cash", balance.cash),
        ("receivables", balance.receivables),
        ("inventory", balance.inventory),
    ];
    for (field, value) in amounts {
        check_amount(field, value)?;
    }

    if pnl.revenue <= Decimal::ZERO {
        return Err(StatementError::NonPositive { field: "revenue" });
    }

    let non_negative = [
        ("cost_of_goods_sold", pnl.cost_of_goods_sold),
        ("operating_expenses", pnl.operating_expenses),
        ("current_assets", balance.current_assets),
        ("non_current_assets", balance.non_current_assets),
        ("current_liabilities", balance.current_liabilities),
        ("non_current_liabilities", balance.non_current_liabilities),
        ("cash", balance.cash),
        ("receivables", balance.receivables),
        ("inventory", balance.inventory),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(StatementError::Negative { field });
        }
    }

    validate_balance_sheet(balance)?;

    Ok(())
}

/// Validates the descriptive fields of a period.
///
/// # Errors
///
/// Returns the first rule the metadata breaks.
pub fn validate_metadata(metadata: &PeriodMetadata) -> Result<(), StatementError> {
    let name_len = metadata.period_name.trim().chars().count();
    if name_len == 0 || metadata.period_name.chars().count() > PERIOD_NAME_MAX {
        return Err(StatementError::InvalidPeriodName {
            max: PERIOD_NAME_MAX,
        });
    }

    if metadata.period_start > metadata.period_end {
        return Err(StatementError::InvalidDateRange);
    }

    check_len(
        "source_filename",
        metadata.source_filename.as_deref(),
        SOURCE_FILENAME_MAX,
    )?;
    check_len(
        "source_file_type",
        metadata.source_file_type.as_deref(),
        SOURCE_FILE_TYPE_MAX,
    )?;

    Ok(())
}

fn check_len(field: &'static str, value: Option<&str>, max: usize) -> Result<(), StatementError> {
    match value {
        Some(v) if v.chars().count() > max => Err(StatementError::FieldTooLong { field, max }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::BalanceError;
    use crate::statements::{BalanceSheet, ProfitAndLoss};
    use chrono::NaiveDate;
    use rstest::rstest;
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

    fn metadata() -> PeriodMetadata {
        PeriodMetadata {
            period_name: "Q1 2025".to_string(),
            period_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            source_filename: None,
            source_file_type: None,
            upload_notes: None,
        }
    }

    #[test]
    fn test_valid_figures_pass() {
        assert_eq!(validate_figures(&period()), Ok(()));
    }

    #[test]
    fn test_zero_revenue_rejected() {
        let mut p = period();
        p.pnl.revenue = Decimal::ZERO;
        assert_eq!(
            validate_figures(&p),
            Err(StatementError::NonPositive { field: "revenue" })
        );
    }

    #[test]
    fn test_negative_inventory_rejected() {
        let mut p = period();
        p.balance.inventory = dec!(-1);
        assert_eq!(
            validate_figures(&p),
            Err(StatementError::Negative { field: "inventory" })
        );
    }

    #[test]
    fn test_negative_net_profit_and_equity_allowed() {
        let mut p = period();
        p.pnl.net_profit = dec!(-50);
        p.pnl.ebit = dec!(-20);
        assert_eq!(validate_figures(&p), Ok(()));
    }

    #[test]
    fn test_unbalanced_figures_rejected() {
        let mut p = period();
        p.balance.equity = dec!(500);
        assert!(matches!(
            validate_figures(&p),
            Err(StatementError::InvalidBalance(BalanceError::Unbalanced { .. }))
        ));
    }

    #[test]
    fn test_zero_assets_rejected() {
        let mut p = period();
        p.balance = BalanceSheet {
            current_assets: Decimal::ZERO,
            non_current_assets: Decimal::ZERO,
            current_liabilities: Decimal::ZERO,
            non_current_liabilities: Decimal::ZERO,
            equity: Decimal::ZERO,
            cash: Decimal::ZERO,
            receivables: Decimal::ZERO,
            inventory: Decimal::ZERO,
        };
        assert_eq!(
            validate_figures(&p),
            Err(StatementError::InvalidBalance(BalanceError::ZeroAssets))
        );
    }

    #[test]
    fn test_valid_metadata_passes() {
        assert_eq!(validate_metadata(&metadata()), Ok(()));
    }

    #[test]
    fn test_blank_period_name_rejected() {
        let mut m = metadata();
        m.period_name = "   ".to_string();
        assert_eq!(
            validate_metadata(&m),
            Err(StatementError::InvalidPeriodName { max: 100 })
        );

        m.period_name = "x".repeat(101);
        assert!(validate_metadata(&m).is_err());
    }

    #[test]
    fn test_start_after_end_rejected() {
        let mut m = metadata();
        m.period_start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(validate_metadata(&m), Err(StatementError::InvalidDateRange));
    }

    #[test]
    fn test_single_day_period_allowed() {
        let mut m = metadata();
        m.period_end = m.period_start;
        assert_eq!(validate_metadata(&m), Ok(()));
    }

    #[test]
    fn test_long_file_type_rejected() {
        let mut m = metadata();
        m.source_file_type = Some("x".repeat(21));
        assert_eq!(
            validate_metadata(&m),
            Err(StatementError::FieldTooLong {
                field: "source_file_type",
                max: 20
            })
        );
    }

    #[test]
    fn test_sub_cent_precision_rejected() {
        let mut p = period();
        p.pnl.revenue = dec!(0.00001);
        assert_eq!(
            validate_figures(&p),
            Err(StatementError::TooPrecise {
                field: "revenue",
                max_scale: 4
            })
        );
    }

    #[test]
    fn test_trailing_zeros_within_scale() {
        let mut p = period();
        p.pnl.revenue = dec!(1000.000000);
        assert_eq!(validate_figures(&p), Ok(()));
    }

    #[test]
    fn test_amount_at_storage_limit_rejected() {
        let mut p = period();
        p.pnl.net_profit = dec!(-10_000_000_000_000_000);
        assert_eq!(
            validate_figures(&p),
            Err(StatementError::OutOfRange {
                field: "net_profit"
            })
        );
    }

    #[rstest]
    #[case(dec!(9_999_999_999_999_999.9999), Ok(()))]
    #[case(dec!(0.0001), Ok(()))]
    #[case(dec!(0.00015), Err(StatementError::TooPrecise { field: "cash", max_scale: 4 }))]
    #[case(dec!(10_000_000_000_000_000), Err(StatementError::OutOfRange { field: "cash" }))]
    fn test_check_amount(#[case] value: Decimal, #[case] expected: Result<(), StatementError>) {
        assert_eq!(check_amount("cash", value), expected);
    }
}
