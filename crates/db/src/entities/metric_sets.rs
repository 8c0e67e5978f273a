//! `SeaORM` Entity for metric_sets table.

use finreport_core::metrics::MetricSet;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MetricStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "metric_sets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    #[sea_orm(unique)]
    pub financial_period_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub revenue: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))", nullable)]
    pub revenue_forecast: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub gross_margin: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub ros: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub total_assets: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub roa: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub roe: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub current_ratio: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub quick_ratio: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub cash_ratio: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub autonomy_ratio: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub asset_turnover: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub net_working_capital: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 4)))")]
    pub working_capital_ratio: Decimal,
    pub gross_margin_status: MetricStatus,
    pub ros_status: MetricStatus,
    pub roa_status: MetricStatus,
    pub roe_status: MetricStatus,
    pub liquidity_status: MetricStatus,
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
    #[sea_orm(
        belongs_to = "super::financial_periods::Entity",
        from = "Column::FinancialPeriodId",
        to = "super::financial_periods::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    FinancialPeriods,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::financial_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialPeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored values as a domain metric set.
    #[must_use]
    pub fn to_domain(&self) -> MetricSet {
        MetricSet {
            revenue: self.revenue,
            revenue_forecast: self.revenue_forecast,
            gross_margin: self.gross_margin,
            ros: self.ros,
            total_assets: self.total_assets,
            roa: self.roa,
            roe: self.roe,
            current_ratio: self.current_ratio,
            quick_ratio: self.quick_ratio,
            cash_ratio: self.cash_ratio,
            autonomy_ratio: self.autonomy_ratio,
            asset_turnover: self.asset_turnover,
            net_working_capital: self.net_working_capital,
            working_capital_ratio: self.working_capital_ratio,
            gross_margin_status: self.gross_margin_status.into(),
            ros_status: self.ros_status.into(),
            roa_status: self.roa_status.into(),
            roe_status: self.roe_status.into(),
            liquidity_status: self.liquidity_status.into(),
        }
    }
}
