//! Metric set repository.
//!
//! A metric set is derived data: it is written only through
//! `save_metric_set`, whenever its period's figures are stored or changed.

use finreport_core::metrics::{MetricSet, MetricsCalculator};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::company::find_owned_company;
use super::financial_period::PeriodRepositoryError;
use crate::entities::{financial_periods, metric_sets};

/// Inserts or replaces the metric set of a period.
pub(crate) async fn save_metric_set<C: ConnectionTrait>(
    conn: &C,
    period: &financial_periods::Model,
    metrics: &MetricSet,
) -> Result<metric_sets::Model, DbErr> {
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();
    let existing = metric_sets::Entity::find()
        .filter(metric_sets::Column::FinancialPeriodId.eq(period.id))
        .one(conn)
        .await?;

    if let Some(model) = existing {
        let mut active: metric_sets::ActiveModel = model.into();
        apply_metrics(&mut active, metrics, now);
        return active.update(conn).await;
    }

    let mut active = metric_sets::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(period.company_id),
        financial_period_id: Set(period.id),
        created_at: Set(now),
        ..Default::default()
    };
    apply_metrics(&mut active, metrics, now);
    active.insert(conn).await
}

fn apply_metrics(
    active: &mut metric_sets::ActiveModel,
    metrics: &MetricSet,
    now: DateTimeWithTimeZone,
) {
    active.revenue = Set(metrics.revenue);
    active.revenue_forecast = Set(metrics.revenue_forecast);
    active.gross_margin = Set(metrics.gross_margin);
    active.ros = Set(metrics.ros);
    active.total_assets = Set(metrics.total_assets);
    active.roa = Set(metrics.roa);
    active.roe = Set(metrics.roe);
    active.current_ratio = Set(metrics.current_ratio);
    active.quick_ratio = Set(metrics.quick_ratio);
    active.cash_ratio = Set(metrics.cash_ratio);
    active.autonomy_ratio = Set(metrics.autonomy_ratio);
    active.asset_turnover = Set(metrics.asset_turnover);
    active.net_working_capital = Set(metrics.net_working_capital);
    active.working_capital_ratio = Set(metrics.working_capital_ratio);
    active.gross_margin_status = Set(metrics.gross_margin_status.into());
    active.ros_status = Set(metrics.ros_status.into());
    active.roa_status = Set(metrics.roa_status.into());
    active.roe_status = Set(metrics.roe_status.into());
    active.liquidity_status = Set(metrics.liquidity_status.into());
    active.updated_at = Set(now);
}

/// Metric set repository.
#[derive(Debug, Clone)]
pub struct MetricSetRepository {
    db: DatabaseConnection,
}

impl MetricSetRepository {
    /// Creates a new metric set repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn owned_period(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        period_id: Uuid,
    ) -> Result<financial_periods::Model, PeriodRepositoryError> {
        find_owned_company(&self.db, company_id, owner_id)
            .await?
            .ok_or(PeriodRepositoryError::CompanyNotFound(company_id))?;

        financial_periods::Entity::find_by_id(period_id)
            .filter(financial_periods::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await?
            .ok_or(PeriodRepositoryError::NotFound(period_id))
    }

    /// Returns the stored metric set of an owned period.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound` or `NotFound` if the company or period is not
    /// visible to the owner, or a database error.
    pub async fn find_by_period(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        period_id: Uuid,
    ) -> Result<Option<(financial_periods::Model, metric_sets::Model)>, PeriodRepositoryError> {
        let period = self.owned_period(owner_id, company_id, period_id).await?;
        let metrics = metric_sets::Entity::find()
            .filter(metric_sets::Column::FinancialPeriodId.eq(period.id))
            .one(&self.db)
            .await?;

        Ok(metrics.map(|m| (period, m)))
    }

    /// Recomputes and stores the metric set of an owned period.
    ///
    /// A supplied `revenue_forecast` replaces the stored one; `None` keeps it.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound`, `NotFound`, `Metrics` if the stored figures
    /// cannot be computed, or a database error.
    pub async fn recalculate(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
        period_id: Uuid,
        revenue_forecast: Option<Decimal>,
    ) -> Result<metric_sets::Model, PeriodRepositoryError> {
        let period = self.owned_period(owner_id, company_id, period_id).await?;

        let txn = self.db.begin().await?;

        let forecast = match revenue_forecast {
            Some(value) => Some(value),
            None => metric_sets::Entity::find()
                .filter(metric_sets::Column::FinancialPeriodId.eq(period.id))
                .one(&txn)
                .await?
                .and_then(|m| m.revenue_forecast),
        };

        let metrics = MetricsCalculator::compute(&period.to_domain(), forecast)?;
        let saved = save_metric_set(&txn, &period, &metrics).await?;

        txn.commit().await?;

        tracing::info!(period_id = %period_id, company_id = %company_id, "Metrics recalculated");
        Ok(saved)
    }

    /// Returns the latest period (by `period_end`) of an owned company that
    /// has a metric set.
    ///
    /// # Errors
    ///
    /// Returns `CompanyNotFound` or a database error.
    pub async fn latest_for_company(
        &self,
        owner_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<(financial_periods::Model, metric_sets::Model)>, PeriodRepositoryError> {
        find_owned_company(&self.db, company_id, owner_id)
            .await?
            .ok_or(PeriodRepositoryError::CompanyNotFound(company_id))?;

        let rows = financial_periods::Entity::find()
            .filter(financial_periods::Column::CompanyId.eq(company_id))
            .order_by_desc(financial_periods::Column::PeriodEnd)
            .order_by_desc(financial_periods::Column::CreatedAt)
            .find_also_related(metric_sets::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .find_map(|(period, metrics)| metrics.map(|m| (period, m))))
    }

    /// Returns the metric set of the period ending closest before `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn previous(
        &self,
        period: &financial_periods::Model,
    ) -> Result<Option<(financial_periods::Model, metric_sets::Model)>, DbErr> {
        let rows = financial_periods::Entity::find()
            .filter(financial_periods::Column::CompanyId.eq(period.company_id))
            .filter(financial_periods::Column::PeriodEnd.lt(period.period_end))
            .order_by_desc(financial_periods::Column::PeriodEnd)
            .find_also_related(metric_sets::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .find_map(|(p, metrics)| metrics.map(|m| (p, m))))
    }
}
