//! Metric set routes: stored metrics, recalculation, comparison and summary.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::periods::check_forecast;
use crate::{ApiError, ApiResult, AppState, middleware::AuthUser};
use finreport_core::metrics::{MetricsComparison, MetricsSummary};
use finreport_db::{MetricSetRepository, entities::metric_sets};

/// Creates the metrics router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/periods/{period_id}/metrics",
            get(get_metrics),
        )
        .route(
            "/companies/{company_id}/periods/{period_id}/metrics/recalculate",
            post(recalculate),
        )
        .route(
            "/companies/{company_id}/periods/{period_id}/metrics/comparison",
            get(comparison),
        )
        .route("/companies/{company_id}/metrics/summary", get(summary))
}

/// Optional body of a recalculation.
#[derive(Debug, Default, Deserialize)]
pub struct RecalculateRequest {
    /// Replaces the stored forecast when present.
    #[serde(default)]
    pub revenue_forecast: Option<Decimal>,
}

/// A period's metrics next to the previous period's.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    /// Metrics of the requested period.
    pub current: metric_sets::Model,
    /// Metrics of the period ending just before it.
    pub previous: Option<metric_sets::Model>,
    /// Changes between the two.
    #[serde(flatten)]
    pub changes: MetricsComparison,
}

/// Headline metrics of a company's latest period.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Period the summary is taken from.
    pub period_id: Uuid,
    /// Its display name.
    pub period_name: String,
    /// Its last day.
    pub period_end: NaiveDate,
    /// The figures and statuses.
    #[serde(flatten)]
    pub summary: MetricsSummary,
}

/// GET /companies/{company_id}/periods/{period_id}/metrics
async fn get_metrics(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, period_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<metric_sets::Model>> {
    let (_, metrics) = MetricSetRepository::new((*state.db).clone())
        .find_by_period(auth.user_id(), company_id, period_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Metrics not found for this period"))?;

    Ok(Json(metrics))
}

/// POST /companies/{company_id}/periods/{period_id}/metrics/recalculate
async fn recalculate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, period_id)): Path<(Uuid, Uuid)>,
    body: Option<Json<RecalculateRequest>>,
) -> ApiResult<Json<metric_sets::Model>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    check_forecast(request.revenue_forecast)?;

    let metrics = MetricSetRepository::new((*state.db).clone())
        .recalculate(
            auth.user_id(),
            company_id,
            period_id,
            request.revenue_forecast,
        )
        .await?;

    Ok(Json(metrics))
}

/// GET /companies/{company_id}/periods/{period_id}/metrics/comparison
async fn comparison(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, period_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ComparisonResponse>> {
    let repo = MetricSetRepository::new((*state.db).clone());

    let (period, current) = repo
        .find_by_period(auth.user_id(), company_id, period_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Metrics not found for this period"))?;
    let previous = repo.previous(&period).await?.map(|(_, metrics)| metrics);

    let changes = MetricsComparison::between(
        &current.to_domain(),
        previous.as_ref().map(metric_sets::Model::to_domain).as_ref(),
    );

    Ok(Json(ComparisonResponse {
        current,
        previous,
        changes,
    }))
}

/// GET /companies/{company_id}/metrics/summary
async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
) -> ApiResult<Json<SummaryResponse>> {
    let (period, metrics) = MetricSetRepository::new((*state.db).clone())
        .latest_for_company(auth.user_id(), company_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No financial data for this company"))?;

    Ok(Json(SummaryResponse {
        period_id: period.id,
        period_name: period.period_name,
        period_end: period.period_end,
        summary: MetricsSummary::from(&metrics.to_domain()),
    }))
}
