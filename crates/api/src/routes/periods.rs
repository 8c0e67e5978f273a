//! Financial period routes.
//!
//! Figures are validated before anything is stored; a period is always
//! written together with its metric set.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiResult, AppState, middleware::AuthUser};
use finreport_core::statements::{
    BalanceSheet, FinancialPeriod, PeriodMetadata, ProfitAndLoss, StatementError,
    check_amount, validate_figures, validate_metadata,
};
use finreport_db::{
    FinancialPeriodRepository,
    entities::{financial_periods, metric_sets},
    repositories::CreatePeriodInput,
};
use finreport_shared::types::{PageRequest, PageResponse};

/// Creates the periods router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/periods",
            post(create_period).get(list_periods),
        )
        .route(
            "/companies/{company_id}/periods/{period_id}",
            get(get_period).put(update_period).delete(delete_period),
        )
}

/// Profit and loss figures as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct PnlData {
    /// Revenue.
    pub revenue: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// Gross profit.
    pub gross_profit: Decimal,
    /// Operating expenses.
    pub operating_expenses: Decimal,
    /// Earnings before interest and taxes.
    pub ebit: Decimal,
    /// Net profit.
    pub net_profit: Decimal,
}

/// Balance sheet figures as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceData {
    /// Current assets.
    pub current_assets: Decimal,
    /// Non-current assets.
    pub non_current_assets: Decimal,
    /// Current liabilities.
    pub current_liabilities: Decimal,
    /// Non-current liabilities.
    pub non_current_liabilities: Decimal,
    /// Equity.
    pub equity: Decimal,
    /// Cash.
    pub cash: Decimal,
    /// Receivables.
    pub receivables: Decimal,
    /// Inventory.
    pub inventory: Decimal,
}

/// Period figures and metadata; the body of a full update.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodPayload {
    /// Display name, e.g. `Q1 2025`.
    pub period_name: String,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// P&L figures.
    pub pl_data: PnlData,
    /// Balance sheet figures.
    pub balance_data: BalanceData,
    /// Name of the uploaded source file.
    pub source_filename: Option<String>,
    /// Type of the uploaded source file.
    pub source_file_type: Option<String>,
    /// Free-form notes.
    pub upload_notes: Option<String>,
}

impl PeriodPayload {
    /// Validates metadata, then figures, and splits them apart.
    fn into_parts(self) -> Result<(PeriodMetadata, FinancialPeriod), StatementError> {
        let metadata = PeriodMetadata {
            period_name: self.period_name.trim().to_string(),
            period_start: self.period_start,
            period_end: self.period_end,
            source_filename: self.source_filename,
            source_file_type: self.source_file_type,
            upload_notes: self.upload_notes,
        };
        let pnl = self.pl_data;
        let balance = self.balance_data;
        let figures = FinancialPeriod {
            pnl: ProfitAndLoss {
                revenue: pnl.revenue,
                cost_of_goods_sold: pnl.cogs,
                gross_profit: pnl.gross_profit,
                operating_expenses: pnl.operating_expenses,
                ebit: pnl.ebit,
                net_profit: pnl.net_profit,
            },
            balance: BalanceSheet {
                current_assets: balance.current_assets,
                non_current_assets: balance.non_current_assets,
                current_liabilities: balance.current_liabilities,
                non_current_liabilities: balance.non_current_liabilities,
                equity: balance.equity,
                cash: balance.cash,
                receivables: balance.receivables,
                inventory: balance.inventory,
            },
        };

        validate_metadata(&metadata)?;
        validate_figures(&figures)?;
        Ok((metadata, figures))
    }
}

/// Body of a period upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePeriodRequest {
    /// Figures and metadata.
    #[serde(flatten)]
    pub period: PeriodPayload,
    /// Revenue forecast stored with the metrics.
    #[serde(default)]
    pub revenue_forecast: Option<Decimal>,
}

/// Rejects a negative or unstorable revenue forecast.
pub(crate) fn check_forecast(forecast: Option<Decimal>) -> Result<(), StatementError> {
    let Some(value) = forecast else {
        return Ok(());
    };
    if value < Decimal::ZERO {
        return Err(StatementError::Negative {
            field: "revenue_forecast",
        });
    }
    check_amount("revenue_forecast", value)
}

/// Stored period.
#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    /// Period ID.
    pub id: Uuid,
    /// Owning company.
    pub company_id: Uuid,
    /// Display name.
    pub period_name: String,
    /// First day.
    pub period_start: NaiveDate,
    /// Last day.
    pub period_end: NaiveDate,
    /// Revenue.
    pub revenue: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// Gross profit.
    pub gross_profit: Decimal,
    /// Operating expenses.
    pub operating_expenses: Decimal,
    /// EBIT.
    pub ebit: Decimal,
    /// Net profit.
    pub net_profit: Decimal,
    /// Current assets.
    pub current_assets: Decimal,
    /// Non-current assets.
    pub non_current_assets: Decimal,
    /// Current liabilities.
    pub current_liabilities: Decimal,
    /// Non-current liabilities.
    pub non_current_liabilities: Decimal,
    /// Equity.
    pub equity: Decimal,
    /// Cash.
    pub cash: Decimal,
    /// Receivables.
    pub receivables: Decimal,
    /// Inventory.
    pub inventory: Decimal,
    /// Current plus non-current assets.
    pub total_assets: Option<Decimal>,
    /// Current plus non-current liabilities.
    pub total_liabilities: Option<Decimal>,
    /// Source file name.
    pub source_filename: Option<String>,
    /// Source file type.
    pub source_file_type: Option<String>,
    /// Notes.
    pub upload_notes: Option<String>,
    /// Incremented on every figure update.
    pub version: i32,
    /// Creation time.
    pub created_at: DateTime<FixedOffset>,
    /// Last update time.
    pub updated_at: DateTime<FixedOffset>,
}

impl From<financial_periods::Model> for PeriodResponse {
    fn from(p: financial_periods::Model) -> Self {
        let balance = p.to_domain().balance;
        Self {
            id: p.id,
            company_id: p.company_id,
            period_name: p.period_name,
            period_start: p.period_start,
            period_end: p.period_end,
            revenue: p.revenue,
            cogs: p.cost_of_goods_sold,
            gross_profit: p.gross_profit,
            operating_expenses: p.operating_expenses,
            ebit: p.ebit,
            net_profit: p.net_profit,
            current_assets: p.current_assets,
            non_current_assets: p.non_current_assets,
            current_liabilities: p.current_liabilities,
            non_current_liabilities: p.non_current_liabilities,
            equity: p.equity,
            cash: p.cash,
            receivables: p.receivables,
            inventory: p.inventory,
            total_assets: balance.total_assets(),
            total_liabilities: balance.total_liabilities(),
            source_filename: p.source_filename,
            source_file_type: p.source_file_type,
            upload_notes: p.upload_notes,
            version: p.version,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// A period together with its freshly computed metrics.
#[derive(Debug, Serialize)]
pub struct PeriodWithMetrics {
    /// The period.
    #[serde(flatten)]
    pub period: PeriodResponse,
    /// Its metric set.
    pub metrics: metric_sets::Model,
}

impl From<(financial_periods::Model, metric_sets::Model)> for PeriodWithMetrics {
    fn from((period, metrics): (financial_periods::Model, metric_sets::Model)) -> Self {
        Self {
            period: period.into(),
            metrics,
        }
    }
}

/// POST /companies/{company_id}/periods - Store a period and its metrics.
async fn create_period(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreatePeriodRequest>,
) -> ApiResult<(StatusCode, Json<PeriodWithMetrics>)> {
    check_forecast(payload.revenue_forecast)?;
    let (metadata, figures) = payload.period.into_parts()?;

    let stored = FinancialPeriodRepository::new((*state.db).clone())
        .create_with_metrics(
            auth.user_id(),
            company_id,
            CreatePeriodInput {
                metadata,
                figures,
                revenue_forecast: payload.revenue_forecast,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// GET /companies/{company_id}/periods - Paginated, latest period first.
async fn list_periods(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Query(request): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<PeriodResponse>>> {
    let page = request.resolve(state.config.pagination);

    let (periods, total) = FinancialPeriodRepository::new((*state.db).clone())
        .list(auth.user_id(), company_id, page)
        .await?;

    Ok(Json(
        PageResponse::new(periods, page, total).map(PeriodResponse::from),
    ))
}

/// GET /companies/{company_id}/periods/{period_id}
async fn get_period(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, period_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<PeriodResponse>> {
    let period = FinancialPeriodRepository::new((*state.db).clone())
        .find(auth.user_id(), company_id, period_id)
        .await?;

    Ok(Json(period.into()))
}

/// PUT /companies/{company_id}/periods/{period_id} - Replace figures and
/// recompute metrics. The stored revenue forecast is kept.
async fn update_period(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, period_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<PeriodPayload>,
) -> ApiResult<Json<PeriodWithMetrics>> {
    let (metadata, figures) = payload.into_parts()?;

    let updated = FinancialPeriodRepository::new((*state.db).clone())
        .update_figures(auth.user_id(), company_id, period_id, metadata, figures)
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /companies/{company_id}/periods/{period_id}
async fn delete_period(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((company_id, period_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    FinancialPeriodRepository::new((*state.db).clone())
        .delete(auth.user_id(), company_id, period_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{bearer, json_request, send, test_state};
    use super::*;
    use crate::create_router;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    fn period_body() -> Value {
        json!({
            "period_name": "Q1 2025",
            "period_start": "2025-01-01",
            "period_end": "2025-03-31",
            "pl_data": {
                "revenue": "1000",
                "cogs": "600",
                "gross_profit": "400",
                "operating_expenses": "300",
                "ebit": "100",
                "net_profit": "80"
            },
            "balance_data": {
                "current_assets": "150",
                "non_current_assets": "850",
                "current_liabilities": "100",
                "non_current_liabilities": "300",
                "equity": "600",
                "cash": "40",
                "receivables": "60",
                "inventory": "30"
            }
        })
    }

    async fn post_period(body: &Value) -> (StatusCode, Value) {
        let state = test_state();
        let auth = bearer(&state);
        let uri = format!("/api/v1/companies/{}/periods", Uuid::new_v4());
        send(
            create_router(state),
            json_request("POST", &uri, Some(&auth), body),
        )
        .await
    }

    #[test]
    fn test_create_request_reads_forecast_next_to_period() {
        let mut body = period_body();
        body["revenue_forecast"] = json!("1200.50");

        let req: CreatePeriodRequest = serde_json::from_value(body).unwrap();

        assert_eq!(req.revenue_forecast, Some(dec!(1200.50)));
        assert_eq!(req.period.pl_data.cogs, dec!(600));
    }

    #[test]
    fn test_into_parts_trims_name_and_maps_cogs() {
        let mut body = period_body();
        body["period_name"] = json!("  Q1 2025 ");
        let payload: PeriodPayload = serde_json::from_value(body).unwrap();

        let (metadata, figures) = payload.into_parts().unwrap();

        assert_eq!(metadata.period_name, "Q1 2025");
        assert_eq!(figures.pnl.cost_of_goods_sold, dec!(600));
        assert_eq!(figures.balance.total_assets(), Some(dec!(1000)));
    }

    #[test]
    fn test_check_forecast() {
        assert!(check_forecast(None).is_ok());
        assert!(check_forecast(Some(dec!(0))).is_ok());
        assert!(check_forecast(Some(dec!(-1))).is_err());
        assert_eq!(
            check_forecast(Some(dec!(1.23456))),
            Err(StatementError::TooPrecise {
                field: "revenue_forecast",
                max_scale: 4
            })
        );
    }

    #[tokio::test]
    async fn test_create_rejects_excess_precision() {
        let mut body = period_body();
        body["pl_data"]["revenue"] = json!("0.00001");

        let (status, body) = post_period(&body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "revenue must have at most 4 decimal places");
    }

    #[tokio::test]
    async fn test_create_rejects_zero_revenue() {
        let mut body = period_body();
        body["pl_data"]["revenue"] = json!("0");

        let (status, body) = post_period(&body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "revenue must be greater than zero");
    }

    #[tokio::test]
    async fn test_create_rejects_unbalanced_sheet() {
        let mut body = period_body();
        body["balance_data"]["equity"] = json!("500");

        let (status, body) = post_period(&body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_financial_data");
    }

    #[tokio::test]
    async fn test_create_rejects_reversed_dates() {
        let mut body = period_body();
        body["period_start"] = json!("2025-04-01");

        let (status, _) = post_period(&body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_forecast() {
        let mut body = period_body();
        body["revenue_forecast"] = json!("-5");

        let (status, body) = post_period(&body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "revenue_forecast cannot be negative");
    }
}
