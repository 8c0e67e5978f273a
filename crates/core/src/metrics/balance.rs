//! Accounting identity check: assets = liabilities + equity.

use rust_decimal::Decimal;

use super::error::BalanceError;
use crate::statements::BalanceSheet;

/// Maximum relative difference between assets and liabilities plus equity (0.1%).
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Verifies `|assets - (liabilities + equity)| / |assets| < BALANCE_TOLERANCE`.
///
/// # Errors
///
/// Returns `BalanceError::ZeroAssets` if `assets` is zero, and
/// `BalanceError::Unbalanced` if the relative difference reaches the tolerance.
pub fn validate_balance(
    assets: Decimal,
    liabilities: Decimal,
    equity: Decimal,
) -> Result<(), BalanceError> {
    if assets.is_zero() {
        return Err(BalanceError::ZeroAssets);
    }

    let liabilities_and_equity = liabilities
        .checked_add(equity)
        .ok_or(BalanceError::Overflow)?;

    let within_tolerance = assets
        .checked_sub(liabilities_and_equity)
        .and_then(|diff| diff.abs().checked_div(assets.abs()))
        .is_some_and(|relative| relative < BALANCE_TOLERANCE);

    if within_tolerance {
        Ok(())
    } else {
        Err(BalanceError::Unbalanced {
            assets,
            liabilities_and_equity,
        })
    }
}

/// Runs [`validate_balance`] over a balance sheet's totals.
///
/// # Errors
///
/// Same as [`validate_balance`], plus `BalanceError::Overflow` if the totals
/// cannot be summed.
pub fn validate_balance_sheet(balance: &BalanceSheet) -> Result<(), BalanceError> {
    let assets = balance.total_assets().ok_or(BalanceError::Overflow)?;
    let liabilities = balance.total_liabilities().ok_or(BalanceError::Overflow)?;
    validate_balance(assets, liabilities, balance.equity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_balance_passes() {
        assert_eq!(validate_balance(dec!(1000), dec!(400), dec!(600)), Ok(()));
    }

    #[test]
    fn test_difference_below_tolerance_passes() {
        // 0.09% off
        assert_eq!(validate_balance(dec!(10000), dec!(4000), dec!(5991)), Ok(()));
    }

    #[test]
    fn test_difference_at_tolerance_fails() {
        // exactly 0.1% off; the bound is strict
        assert_eq!(
            validate_balance(dec!(10000), dec!(4000), dec!(5990)),
            Err(BalanceError::Unbalanced {
                assets: dec!(10000),
                liabilities_and_equity: dec!(9990),
            })
        );
    }

    #[test]
    fn test_liabilities_exceeding_assets_fails() {
        assert!(validate_balance(dec!(1000), dec!(600), dec!(600)).is_err());
    }

    #[test]
    fn test_zero_assets_fails() {
        assert_eq!(
            validate_balance(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            Err(BalanceError::ZeroAssets)
        );
    }

    #[test]
    fn test_negative_equity_can_balance() {
        assert_eq!(validate_balance(dec!(500), dec!(700), dec!(-200)), Ok(()));
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        assert_eq!(
            validate_balance(Decimal::MAX, Decimal::MAX, Decimal::MAX),
            Err(BalanceError::Overflow)
        );
    }
}
