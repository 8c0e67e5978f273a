//! `SeaORM` Entity for financial_periods table.

use finreport_core::statements::{BalanceSheet, FinancialPeriod, PeriodMetadata, ProfitAndLoss};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub period_start: Date,
    pub period_end: Date,
    pub period_name: String,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub revenue: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub cost_of_goods_sold: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub gross_profit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub operating_expenses: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub ebit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub net_profit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub current_assets: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub non_current_assets: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub current_liabilities: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub non_current_liabilities: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub equity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub cash: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub receivables: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub inventory: Decimal,
    pub source_filename: Option<String>,
    pub source_file_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub upload_notes: Option<String>,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Companies,
    #[sea_orm(has_one = "super::metric_sets::Entity")]
    MetricSets,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::metric_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MetricSets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Figures of this period as the metrics engine input.
    #[must_use]
    pub fn to_domain(&self) -> FinancialPeriod {
        FinancialPeriod {
            pnl: ProfitAndLoss {
                revenue: self.revenue,
                cost_of_goods_sold: self.cost_of_goods_sold,
                gross_profit: self.gross_profit,
                operating_expenses: self.operating_expenses,
                ebit: self.ebit,
                net_profit: self.net_profit,
            },
            balance: BalanceSheet {
                current_assets: self.current_assets,
                non_current_assets: self.non_current_assets,
                current_liabilities: self.current_liabilities,
                non_current_liabilities: self.non_current_liabilities,
                equity: self.equity,
                cash: self.cash,
                receivables: self.receivables,
                inventory: self.inventory,
            },
        }
    }

    /// Descriptive fields of this period.
    #[must_use]
    pub fn metadata(&self) -> PeriodMetadata {
        PeriodMetadata {
            period_name: self.period_name.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            source_filename: self.source_filename.clone(),
            source_file_type: self.source_file_type.clone(),
            upload_notes: self.upload_notes.clone(),
        }
    }
}
