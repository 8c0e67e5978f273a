//! Financial period repository.
//!
//! Periods and their metric sets are written together in one transaction so
//! a stored period always has metrics computed from its current figures.

use finreport_core::metrics::{MetricsCalculator, MetricsError};
use finreport_core::statements::{FinancialPeriod, PeriodMetadata};
use finreport_shared::types::Page;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::company::find_owned_company;
use super::metric_set::save_metric_set;
use crate::entities::{financial_periods, metric_sets};

/// Error types for financial period and metric set operations.
#[derive(Debug, thiserror::Error)]
pub enum PeriodRepositoryError {
    /// Company not found or not owned by the caller.
    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    /// Period not found in the company.
    #[error("Financial period not found: {0}")]
    NotFound(Uuid),

    /// Figures rejected by the metrics engine.
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for storing a period.
#[derive(Debug, Clone)]
pub struct CreatePeriodInput {
    /// Descriptive fields.
    pub metadata: PeriodMetadata,
    /// Statement figures.
    pub figures: FinancialPeriod,
    /// Optional externally supplied forecast.
    pub revenue_forecast: Option<Decimal>,
}

/// Financial period repository.
#[derive(Debug, Clone)]
pub struct FinancialPeriodRepository {
    db: DatabaseConnection,
}

impl FinancialPeriodRepository {
    /// Creates a new financial period repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_company(&self, owner_id: Uuid, company_id: Uuid) -> Result<(), PeriodRepositoryError> {
        find_owned_company(&self.db, company_id, owner_id)
            .await?
            .map(|_| ())
            .ok_or(PeriodRepositoryError::CompanyNotFound(company_id))
    }

    /// Stores a period and its computed metric set.
    ///
    /// Metrics are computed before anything is written; a rejected period
    /// leaves no rows behind.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound`, `Metrics`, or a database error.
    pub async fn create_with_metrics(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        input: CreatePeriodInput,
    ) -> Result<(financial_periods::Model, metric_sets::Model), PeriodRepositoryError> {
        self.ensure_company(owner_id, company_id).await?;

        let metrics = MetricsCalculator::compute(&input.figures, input.revenue_forecast)?;

        let now = chrono::Utc::now().into();
        let CreatePeriodInput {
            metadata, figures, ..
        } = input;
        let FinancialPeriod { pnl, balance } = figures;

        let period = financial_periods::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id),
            period_start: Set(metadata.period_start),
            period_end: Set(metadata.period_end),
            period_name: Set(metadata.period_name),
            revenue: Set(pnl.revenue),
            cost_of_goods_sold: Set(pnl.cost_of_goods_sold),
            gross_profit: Set(pnl.gross_profit),
            operating_expenses: Set(pnl.operating_expenses),
            ebit: Set(pnl.ebit),
            net_profit: Set(pnl.net_profit),
            current_assets: Set(balance.current_assets),
            non_current_assets: Set(balance.non_current_assets),
            current_liabilities: Set(balance.current_liabilities),
            non_current_liabilities: Set(balance.non_current_liabilities),
            equity: Set(balance.equity),
            cash: Set(balance.cash),
            receivables: Set(balance.receivables),
            inventory: Set(balance.inventory),
            source_filename: Set(metadata.source_filename),
            source_file_type: Set(metadata.source_file_type),
            upload_notes: Set(metadata.upload_notes),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let txn = self.db.begin().await?;
        let period = period.insert(&txn).await?;
        let metric_set = save_metric_set(&txn, &period, &metrics).await?;
        txn.commit().await?;

        tracing::info!(
            period_id = %period.id,
            company_id = %company_id,
            "Financial period stored"
        );
        Ok((period, metric_set))
    }

    /// Lists an owned company's periods, latest `period_end` first.
    ///
    /// Returns the page of periods and the total count.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound` or a database error.
    pub async fn list(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        page: Page,
    ) -> Result<(Vec<financial_periods::Model>, u64), PeriodRepositoryError> {
        self.ensure_company(owner_id, company_id).await?;

        let paginator = financial_periods::Entity::find()
            .filter(financial_periods::Column::CompanyId.eq(company_id))
            .order_by_desc(financial_periods::Column::PeriodEnd)
            .order_by_desc(financial_periods::Column::CreatedAt)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let periods = paginator.fetch_page(page.index()).await?;

        Ok((periods, total))
    }

    /// Finds a period of an owned company.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound`, `NotFound`, or a database error.
    pub async fn find(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        period_id: Uuid,
    ) -> Result<financial_periods::Model, PeriodRepositoryError> {
        self.ensure_company(owner_id, company_id).await?;

        financial_periods::Entity::find_by_id(period_id)
            .filter(financial_periods::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await?
            .ok_or(PeriodRepositoryError::NotFound(period_id))
    }

    /// Replaces a period's figures and metadata, bumps its version and
    /// recomputes its metric set.
    ///
    /// The stored revenue forecast is kept.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound`, `NotFound`, `Metrics`, or a database error.
    pub async fn update_figures(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        period_id: Uuid,
        metadata: PeriodMetadata,
        figures: FinancialPeriod,
    ) -> Result<(financial_periods::Model, metric_sets::Model), PeriodRepositoryError> {
        let period = self.find(owner_id, company_id, period_id).await?;

        let txn = self.db.begin().await?;

        let forecast = period
            .find_related(metric_sets::Entity)
            .one(&txn)
            .await?
            .and_then(|m| m.revenue_forecast);
        let metrics = MetricsCalculator::compute(&figures, forecast)?;

        let version = period.version + 1;
        let FinancialPeriod { pnl, balance } = figures;
        let mut active: financial_periods::ActiveModel = period.into();
        active.period_name = Set(metadata.period_name);
        active.period_start = Set(metadata.period_start);
        active.period_end = Set(metadata.period_end);
        active.source_filename = Set(metadata.source_filename);
        active.source_file_type = Set(metadata.source_file_type);
        active.upload_notes = Set(metadata.upload_notes);
        active.revenue = Set(pnl.revenue);
        active.cost_of_goods_sold = Set(pnl.cost_of_goods_sold);
        active.gross_profit = Set(pnl.gross_profit);
        active.operating_expenses = Set(pnl.operating_expenses);
        active.ebit = Set(pnl.ebit);
        active.net_profit = Set(pnl.net_profit);
        active.current_assets = Set(balance.current_assets);
        active.non_current_assets = Set(balance.non_current_assets);
        active.current_liabilities = Set(balance.current_liabilities);
        active.non_current_liabilities = Set(balance.non_current_liabilities);
        active.equity = Set(balance.equity);
        active.cash = Set(balance.cash);
        active.receivables = Set(balance.receivables);
        active.inventory = Set(balance.inventory);
        active.version = Set(version);
        active.updated_at = Set(chrono::Utc::now().into());

        let period = active.update(&txn).await?;
        let metric_set = save_metric_set(&txn, &period, &metrics).await?;

        txn.commit().await?;

        tracing::info!(period_id = %period_id, version, "Financial period updated");
        Ok((period, metric_set))
    }

    /// Deletes a period and its metric set in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound`, `NotFound`, or a database error.
    pub async fn delete(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        period_id: Uuid,
    ) -> Result<(), PeriodRepositoryError> {
        let period = self.find(owner_id, company_id, period_id).await?;

        let txn = self.db.begin().await?;
        metric_sets::Entity::delete_many()
            .filter(metric_sets::Column::FinancialPeriodId.eq(period.id))
            .exec(&txn)
            .await?;
        period.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(period_id = %period_id, company_id = %company_id, "Financial period deleted");
        Ok(())
    }
}
