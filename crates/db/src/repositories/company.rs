//! Company repository for database operations.

use finreport_core::company::{CompanyProfile, CompanySize, Industry};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{companies, financial_periods, metric_sets};

/// Error types for company operations.
#[derive(Debug, thiserror::Error)]
pub enum CompanyRepositoryError {
    /// The owner already has a company with this INN.
    #[error("Company with INN '{0}' already exists")]
    DuplicateInn(String),

    /// Company not found or not owned by the caller.
    #[error("Company not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for updating a company. Outer `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyInput {
    /// Company name.
    pub name: Option<String>,
    /// Normalized INN.
    pub inn: Option<String>,
    /// Industry.
    pub industry: Option<Industry>,
    /// Size class.
    pub size: Option<CompanySize>,
    /// Description.
    pub description: Option<Option<String>>,
    /// Postal address.
    pub address: Option<Option<String>>,
    /// Phone number.
    pub phone: Option<Option<String>>,
    /// Website URL.
    pub website: Option<Option<String>>,
}

/// Company repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

/// Finds a company only if it belongs to `owner_id`.
pub(crate) async fn find_owned_company<C: ConnectionTrait>(
    conn: &C,
    company_id: Uuid,
    owner_id: Uuid,
) -> Result<Option<companies::Model>, DbErr> {
    companies::Entity::find_by_id(company_id)
        .filter(companies::Column::OwnerId.eq(owner_id))
        .one(conn)
        .await
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a company for `owner_id` from a validated profile.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateInn` if the owner already has a company with the
    /// same INN, or a database error.
    pub async fn create(
        &self,
        owner_id: Uuid,
        profile: CompanyProfile,
    ) -> Result<companies::Model, CompanyRepositoryError> {
        if self.inn_exists_for_owner(owner_id, &profile.inn, None).await? {
            return Err(CompanyRepositoryError::DuplicateInn(profile.inn));
        }

        let now = chrono::Utc::now().into();
        let company = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            name: Set(profile.name),
            inn: Set(profile.inn),
            industry: Set(profile.industry.into()),
            size: Set(profile.size.into()),
            description: Set(profile.description),
            address: Set(profile.address),
            phone: Set(profile.phone),
            website: Set(profile.website),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let company = company.insert(&self.db).await?;
        tracing::info!(company_id = %company.id, owner_id = %owner_id, "Company created");
        Ok(company)
    }

    /// Lists the owner's companies, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<companies::Model>, DbErr> {
        companies::Entity::find()
            .filter(companies::Column::OwnerId.eq(owner_id))
            .order_by_desc(companies::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a company owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_owned(
        &self,
        company_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<companies::Model>, DbErr> {
        find_owned_company(&self.db, company_id, owner_id).await
    }

    /// Checks whether the owner already has a company with this INN.
    ///
    /// `exclude` skips one company, for updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn inn_exists_for_owner(
        &self,
        owner_id: Uuid,
        inn: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut query = companies::Entity::find()
            .filter(companies::Column::OwnerId.eq(owner_id))
            .filter(companies::Column::Inn.eq(inn));

        if let Some(id) = exclude {
            query = query.filter(companies::Column::Id.ne(id));
        }

        Ok(query.one(&self.db).await?.is_some())
    }

    /// Applies a partial update to an owned company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `DuplicateInn`, or a database error.
    pub async fn update(
        &self,
        company_id: Uuid,
        owner_id: Uuid,
        input: UpdateCompanyInput,
    ) -> Result<companies::Model, CompanyRepositoryError> {
        let company = self
            .find_owned(company_id, owner_id)
            .await?
            .ok_or(CompanyRepositoryError::NotFound(company_id))?;

        if let Some(inn) = &input.inn
            && *inn != company.inn
            && self
                .inn_exists_for_owner(owner_id, inn, Some(company_id))
                .await?
        {
            return Err(CompanyRepositoryError::DuplicateInn(inn.clone()));
        }

        let mut active: companies::ActiveModel = company.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(inn) = input.inn {
            active.inn = Set(inn);
        }
        if let Some(industry) = input.industry {
            active.industry = Set(industry.into());
        }
        if let Some(size) = input.size {
            active.size = Set(size.into());
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(website) = input.website {
            active.website = Set(website);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an owned company with its periods and metric sets.
    ///
    /// Metric sets, then periods, then the company are removed in one
    /// transaction; foreign keys do not cascade.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error. Nothing is deleted on error.
    pub async fn delete_with_dependents(
        &self,
        company_id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), CompanyRepositoryError> {
        let txn = self.db.begin().await?;

        let company = find_owned_company(&txn, company_id, owner_id)
            .await?
            .ok_or(CompanyRepositoryError::NotFound(company_id))?;

        let metrics = metric_sets::Entity::delete_many()
            .filter(metric_sets::Column::CompanyId.eq(company_id))
            .exec(&txn)
            .await?;
        let periods = financial_periods::Entity::delete_many()
            .filter(financial_periods::Column::CompanyId.eq(company_id))
            .exec(&txn)
            .await?;
        company.delete(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            company_id = %company_id,
            periods_deleted = periods.rows_affected,
            metric_sets_deleted = metrics.rows_affected,
            "Company deleted"
        );
        Ok(())
    }
}
