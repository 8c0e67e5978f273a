//! `SeaORM` entity definitions.

pub mod prelude;

pub mod companies;
pub mod financial_periods;
pub mod metric_sets;
pub mod sea_orm_active_enums;
pub mod users;
