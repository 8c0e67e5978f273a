//! `SeaORM` Entity for users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub telegram_id: i64,
    pub telegram_username: Option<String>,
    pub telegram_first_name: Option<String>,
    pub telegram_last_name: Option<String>,
    pub telegram_photo_url: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub last_login_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::companies::Entity")]
    Companies,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name derived from the Telegram profile.
    #[must_use]
    pub fn full_name(&self) -> String {
        finreport_core::auth::full_name(
            self.telegram_first_name.as_deref(),
            self.telegram_last_name.as_deref(),
            self.telegram_username.as_deref(),
            self.telegram_id,
        )
    }
}
