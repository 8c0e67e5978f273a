//! User repository for database operations.

use finreport_core::auth::TelegramAuthData;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::users;

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a user by Telegram ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::TelegramId.eq(telegram_id))
            .one(&self.db)
            .await
    }

    /// Creates or refreshes a user from a verified widget payload.
    ///
    /// Existing users get their Telegram profile fields and `last_login_at`
    /// overwritten. Returns the user and whether it was just created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn upsert_from_telegram(
        &self,
        data: &TelegramAuthData,
    ) -> Result<(users::Model, bool), DbErr> {
        let now = chrono::Utc::now().into();

        if let Some(existing) = self.find_by_telegram_id(data.id).await? {
            let mut active: users::ActiveModel = existing.into();
            active.telegram_username = Set(data.username.clone());
            active.telegram_first_name = Set(Some(data.first_name.clone()));
            active.telegram_last_name = Set(data.last_name.clone());
            active.telegram_photo_url = Set(data.photo_url.clone());
            active.last_login_at = Set(Some(now));
            active.updated_at = Set(now);

            let user = active.update(&self.db).await?;
            tracing::info!(user_id = %user.id, telegram_id = user.telegram_id, "User logged in");
            return Ok((user, false));
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            telegram_id: Set(data.id),
            telegram_username: Set(data.username.clone()),
            telegram_first_name: Set(Some(data.first_name.clone())),
            telegram_last_name: Set(data.last_name.clone()),
            telegram_photo_url: Set(data.photo_url.clone()),
            email: Set(None),
            is_active: Set(true),
            is_superuser: Set(false),
            last_login_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let user = user.insert(&self.db).await?;
        tracing::info!(user_id = %user.id, telegram_id = user.telegram_id, "User registered");
        Ok((user, true))
    }
}
