//! Statement figures for a single reporting period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit & loss figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLoss {
    /// Revenue for the period.
    pub revenue: Decimal,
    /// Cost of goods sold.
    pub cost_of_goods_sold: Decimal,
    /// Gross profit as reported.
    pub gross_profit: Decimal,
    /// Operating expenses.
    pub operating_expenses: Decimal,
    /// Earnings before interest and taxes.
    pub ebit: Decimal,
    /// Net profit (may be negative).
    pub net_profit: Decimal,
}

/// Balance sheet figures at period end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Current assets.
    pub current_assets: Decimal,
    /// Non-current assets.
    pub non_current_assets: Decimal,
    /// Current liabilities.
    pub current_liabilities: Decimal,
    /// Non-current liabilities.
    pub non_current_liabilities: Decimal,
    /// Equity (may be negative).
    pub equity: Decimal,
    /// Cash and equivalents.
    pub cash: Decimal,
    /// Accounts receivable.
    pub receivables: Decimal,
    /// Inventory.
    pub inventory: Decimal,
}

impl BalanceSheet {
    /// Current plus non-current assets, `None` on overflow.
    #[must_use]
    pub fn total_assets(&self) -> Option<Decimal> {
        self.current_assets.checked_add(self.non_current_assets)
    }

    /// Current plus non-current liabilities, `None` on overflow.
    #[must_use]
    pub fn total_liabilities(&self) -> Option<Decimal> {
        self.current_liabilities
            .checked_add(self.non_current_liabilities)
    }

    /// Total liabilities plus equity, `None` on overflow.
    #[must_use]
    pub fn liabilities_and_equity(&self) -> Option<Decimal> {
        self.total_liabilities()?.checked_add(self.equity)
    }
}

/// One reporting period's figures: the input of the metrics engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    /// Profit & loss statement.
    pub pnl: ProfitAndLoss,
    /// Balance sheet.
    pub balance: BalanceSheet,
}

/// Descriptive fields stored alongside a period's figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodMetadata {
    /// Display name, e.g. "Q1 2025".
    pub period_name: String,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Name of the uploaded source file, if any.
    pub source_filename: Option<String>,
    /// Type of the uploaded source file, if any.
    pub source_file_type: Option<String>,
    /// Free-form notes.
    pub upload_notes: Option<String>,
}
