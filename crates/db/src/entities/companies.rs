//! `SeaORM` Entity for companies table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{CompanySize, Industry};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub inn: String,
    pub industry: Industry,
    pub size: CompanySize,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Users,
    #[sea_orm(has_many = "super::financial_periods::Entity")]
    FinancialPeriods,
    #[sea_orm(has_many = "super::metric_sets::Entity")]
    MetricSets,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::financial_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialPeriods.def()
    }
}

impl Related<super::metric_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MetricSets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
